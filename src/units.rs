use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sum};

/// A distance in device pixels. Measurements are kept as floats so that
/// fractional glyph advances accumulate without drift; convert to integer
/// draw coordinates with [Px::round] at the last moment.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
    Sum,
)]
pub struct Px(pub f32);

impl Px {
    /// Round to the nearest whole pixel coordinate
    pub fn round(self) -> i32 {
        self.0.round() as i32
    }
}

impl std::ops::Sub for Px {
    type Output = Px;

    fn sub(self, rhs: Px) -> Px {
        Px(self.0 - rhs.0)
    }
}

impl std::ops::Mul<f32> for Px {
    type Output = Px;

    fn mul(self, rhs: f32) -> Px {
        Px(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Px {
        Px(self.0 / rhs)
    }
}
