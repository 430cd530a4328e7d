pub mod datasets;
pub mod geojson;
pub mod metrics;
pub mod sanitize;
pub mod validate;

pub use datasets::*;
pub use geojson::*;
pub use metrics::*;
pub use validate::*;
