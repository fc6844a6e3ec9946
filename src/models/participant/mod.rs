pub mod aggregate;
pub mod types;

pub use aggregate::*;
pub use types::*;
