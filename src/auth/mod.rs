pub mod bearer;
pub mod operator;

pub use bearer::BearerToken;
