pub mod geo;
pub mod projection;
pub mod spherical;
pub mod vec;
pub mod viewport;

pub use geo::*;
pub use projection::*;
pub use spherical::*;
pub use vec::*;
pub use viewport::*;
