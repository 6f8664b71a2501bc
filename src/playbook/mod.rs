pub mod definition;
pub mod loading;
pub mod node_ref;

pub use definition::*;
pub use node_ref::*;
