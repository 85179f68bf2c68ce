pub mod definition;
pub mod naming;
pub mod position;

pub use definition::*;
pub use naming::*;
pub use position::*;
