//! Request extractors shared by the resource handlers.

pub mod body;
pub mod unit_of_work;

pub use body::ApiJson;
