//! Question bank: curated familiarity tables, quiz modes and the builders
//! that turn sanitized datasets into per-mode question pools.

pub mod builder;
pub mod mode;
pub mod question;
pub mod tables;

pub use builder::*;
pub use mode::*;
pub use question::*;
