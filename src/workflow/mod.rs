pub mod artifact;
pub mod definition;
pub mod summary;

pub use definition::*;
pub use summary::*;
