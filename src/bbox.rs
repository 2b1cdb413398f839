use crate::units::Px;

/// A point in 2D pixel space. The y axis grows downward, matching raster
/// canvas coordinates.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }
}

/// The tight rectangle enclosing a rendered string, expressed as its four
/// corner points relative to the text's baseline origin. For unrotated text
/// the corners are axis-aligned; for rotated text they are the rotated
/// corners of that box, so consumers should read extents through
/// [BoundingBox::width] and [BoundingBox::height] rather than assume
/// axis alignment.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub upper_left: Point,
    pub upper_right: Point,
    pub lower_right: Point,
    pub lower_left: Point,
}

impl BoundingBox {
    /// Build an axis-aligned box from its extents. `y_min` is the top edge
    /// and `y_max` the bottom edge in y-down coordinates.
    pub fn from_extents(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> BoundingBox {
        BoundingBox {
            upper_left: Point::new(x_min, y_min),
            upper_right: Point::new(x_max, y_min),
            lower_right: Point::new(x_max, y_max),
            lower_left: Point::new(x_min, y_max),
        }
    }

    /// The four corners in reading order: upper-left, upper-right,
    /// lower-right, lower-left
    pub fn corners(&self) -> [Point; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.lower_right,
            self.lower_left,
        ]
    }

    pub fn min_x(&self) -> f32 {
        self.corners().iter().map(|p| p.x).fold(f32::INFINITY, f32::min)
    }

    pub fn max_x(&self) -> f32 {
        self.corners()
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn min_y(&self) -> f32 {
        self.corners().iter().map(|p| p.y).fold(f32::INFINITY, f32::min)
    }

    pub fn max_y(&self) -> f32 {
        self.corners()
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Horizontal extent of the box: max-x minus min-x over all corners
    pub fn width(&self) -> Px {
        Px(self.max_x() - self.min_x())
    }

    /// Vertical extent of the box: bottom extremum minus top extremum
    pub fn height(&self) -> Px {
        Px(self.max_y() - self.min_y())
    }

    /// Rotate the box's corners about the origin by the given angle in
    /// degrees, counter-clockwise on screen (y-down coordinates)
    pub fn rotate(&self, angle_deg: i32) -> BoundingBox {
        if angle_deg % 360 == 0 {
            return *self;
        }
        let theta = (angle_deg as f32).to_radians();
        let (s, c) = theta.sin_cos();
        let rot = |p: Point| Point::new(p.x * c + p.y * s, -p.x * s + p.y * c);
        BoundingBox {
            upper_left: rot(self.upper_left),
            upper_right: rot(self.upper_right),
            lower_right: rot(self.lower_right),
            lower_left: rot(self.lower_left),
        }
    }
}
