mod bbox;
pub use bbox::*;

mod canvas;
pub use self::canvas::*;

mod colour;
pub use colour::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// Utility functions and structures to measure, wrap, and place text
pub mod layout;
pub use layout::{LayoutResult, Line, OverlayBox, PlacedLine};

mod metrics;
pub use metrics::*;

mod raster;
pub use raster::*;

mod renderer;
pub use renderer::*;

mod units;
pub use units::*;
