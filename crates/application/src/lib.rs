//! Application layer - Use cases and orchestration
//!
//! Defines the ports the forecast pipeline talks to and the service that
//! composes them. Adapters in the infrastructure layer implement the ports.

pub mod ports;
pub mod services;

pub use ports::*;
pub use services::*;
