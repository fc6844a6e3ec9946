pub mod input;
pub mod rules;
pub mod summary;

pub use input::*;
pub use rules::{propose, resolve, resolve_name, DEFAULT_ATTENDANCE, RULES};
pub use summary::*;
