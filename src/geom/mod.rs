pub mod dimensions;
pub mod hexagon;
mod parse;

pub use dimensions::TileDims;
pub use hexagon::{Family, Hexagon};
pub(crate) use hexagon::{x_profile, y_profile};
pub use parse::{parse_geojson, parse_geometry, parse_wkt};
