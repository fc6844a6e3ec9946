pub mod edit;
pub mod forms;
pub mod load;

pub use edit::*;
pub use load::*;
