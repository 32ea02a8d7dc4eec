//! API request/response types

pub mod ack;
pub mod error;
pub mod json;

pub use ack::{Ack, AckContext};
pub use error::ApiError;
pub use json::Json;
