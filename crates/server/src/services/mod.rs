//! External service clients and document generation.

pub mod geocoder;
pub mod manifest;
