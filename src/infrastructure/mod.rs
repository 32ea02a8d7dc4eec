//! Infrastructure layer - External service implementations

pub mod elastic;
pub mod logging;
pub mod services;
