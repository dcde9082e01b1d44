//! Provider response adapters.
//!
//! Each supported response schema has one parsing function here; nothing else
//! in the crate reads provider field names. Required fields: `ip`, `isp`,
//! `country`. The remaining fields default to an empty string when absent.

use serde_json::Value;

use super::types::GeoProfile;
use crate::config::GeoSchema;
use crate::error_handling::ProbeError;

impl GeoSchema {
    /// Query parameter names for the API key and the looked-up address.
    pub fn query_names(self) -> (&'static str, &'static str) {
        match self {
            GeoSchema::Ipgeolocation => ("apiKey", "ip"),
            GeoSchema::Abstract => ("api_key", "ip_address"),
        }
    }
}

/// Maps a provider body into a `GeoProfile`.
///
/// # Errors
///
/// Returns `ProbeError::Schema` naming the first required field that is
/// missing or not a string.
pub fn parse_profile(schema: GeoSchema, body: &Value) -> Result<GeoProfile, ProbeError> {
    match schema {
        GeoSchema::Ipgeolocation => parse_ipgeolocation(body),
        GeoSchema::Abstract => parse_abstract(body),
    }
}

fn parse_ipgeolocation(body: &Value) -> Result<GeoProfile, ProbeError> {
    Ok(GeoProfile {
        ip: required(body, "ip", &[&["ip"], &["ip_address"]])?,
        isp: required(body, "isp", &[&["isp"]])?,
        organization: optional(body, &["organization"]),
        city: optional(body, &["city"]),
        region: optional(body, &["state_prov"]),
        country: required(body, "country_name", &[&["country_name"]])?,
    })
}

fn parse_abstract(body: &Value) -> Result<GeoProfile, ProbeError> {
    Ok(GeoProfile {
        ip: required(body, "ip_address", &[&["ip_address"]])?,
        isp: required(body, "connection.isp_name", &[&["connection", "isp_name"]])?,
        organization: optional(body, &["connection", "autonomous_system_organization"]),
        city: optional(body, &["city"]),
        region: optional(body, &["region"]),
        country: required(body, "country", &[&["country"]])?,
    })
}

fn string_at<'a>(body: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(body, |node, key| node.get(key))
        .and_then(Value::as_str)
}

fn required(body: &Value, name: &'static str, paths: &[&[&str]]) -> Result<String, ProbeError> {
    paths
        .iter()
        .find_map(|path| string_at(body, path))
        .map(str::to_string)
        .ok_or(ProbeError::Schema(name))
}

fn optional(body: &Value, path: &[&str]) -> String {
    string_at(body, path).unwrap_or_default().to_string()
}
