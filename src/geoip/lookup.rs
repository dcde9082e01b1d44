//! Geolocation lookups.

use async_trait::async_trait;

use super::extract::{client_ip, lookup_address};
use super::provider::parse_profile;
use super::types::{GeoProfile, MeasurementRequest};
use crate::config::GeoSchema;
use crate::error_handling::ProbeError;

/// Geolocation backend.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Looks up `ip`, or the caller's own address when `None`.
    async fn lookup(&self, ip: Option<&str>) -> Result<GeoProfile, ProbeError>;
}

/// Geolocation through an HTTP JSON API.
#[derive(Debug, Clone)]
pub struct HttpGeoLookup {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    schema: GeoSchema,
}

impl HttpGeoLookup {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        schema: GeoSchema,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            schema,
        }
    }
}

#[async_trait]
impl GeoLookup for HttpGeoLookup {
    async fn lookup(&self, ip: Option<&str>) -> Result<GeoProfile, ProbeError> {
        let api_key = self.api_key.as_deref().ok_or(ProbeError::MissingApiKey)?;
        let (key_param, ip_param) = self.schema.query_names();

        let mut query = vec![(key_param, api_key)];
        if let Some(ip) = ip {
            query.push((ip_param, ip));
        }

        let response = self.client.get(&self.endpoint).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        parse_profile(self.schema, &body)
    }
}

/// Resolves the geolocation profile of the client behind `request`.
///
/// Failures are logged here; the caller decides on placeholders.
pub async fn resolve_geo(
    lookup: &dyn GeoLookup,
    request: &MeasurementRequest,
) -> Result<GeoProfile, ProbeError> {
    let client = client_ip(request);
    let query_ip = client.as_deref().and_then(lookup_address);

    match lookup.lookup(query_ip).await {
        Ok(profile) => {
            log::debug!(
                "Geolocated {} as {} ({}, {})",
                client.as_deref().unwrap_or("caller"),
                profile.isp,
                profile.city,
                profile.country
            );
            Ok(profile)
        }
        Err(e) => {
            log::warn!(
                "Geolocation of {} failed: {}",
                client.as_deref().unwrap_or("caller"),
                e
            );
            Err(e)
        }
    }
}
