pub mod attendance;
pub mod meeting;
pub mod participant;
pub mod poll;
