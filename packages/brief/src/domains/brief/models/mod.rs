//! Brief domain models.

pub mod brief;
pub mod source;

pub use brief::*;
pub use source::*;
