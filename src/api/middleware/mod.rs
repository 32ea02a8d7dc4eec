//! API middleware components

pub mod access;
pub mod logging;

pub use access::RequireAccess;
pub use logging::logging_middleware;
