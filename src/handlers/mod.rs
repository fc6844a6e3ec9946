pub mod api;
pub mod meeting_handlers;
pub mod review_handlers;
