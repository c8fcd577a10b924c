//! Domain layer for addrcast
//!
//! Address and coordinate value objects, the forecast period entity, the
//! coverage rules and the single error type shared by every layer. This
//! crate performs no I/O.

pub mod coverage;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::{ApiError, ErrorKind};
pub use value_objects::*;
