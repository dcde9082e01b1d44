//! Client geolocation via a third-party lookup service.
//!
//! This module resolves the client's address from request metadata, asks the
//! configured provider about it, and maps the provider-specific response into a
//! stable `GeoProfile`.

mod extract;
mod lookup;
mod provider;
mod types;

// Re-export public API
pub use extract::{client_ip, lookup_address};
pub use lookup::{resolve_geo, GeoLookup, HttpGeoLookup};
pub use provider::parse_profile;
pub use types::{GeoProfile, MeasurementRequest};
