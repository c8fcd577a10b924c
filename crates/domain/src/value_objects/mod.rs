//! Value Objects - Immutable, identity-less domain primitives

mod address;
mod coordinates;

pub use address::{
    AddressInput, GeocodeOptions, MIN_ADDRESS_LEN, PUERTO_RICO_ZIP_PREFIXES, ReturnType,
    SearchType, StructuredAddress, validate_address,
};
pub use coordinates::{Coordinates, InvalidCoordinates, to_fixed};
