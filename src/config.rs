//! Client configuration.
//!
//! Endpoints and client identification are passed to the clients explicitly;
//! nothing in the crate reads them from globals.

use std::env;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

pub const GEOCOORD_DEFAULT_ENDPOINT: &str = "http://localhost:8888";
pub const GEOCOORD_CLIENT_HEADER: &str = "X-GeoCoord-Client";
pub const GEOCOORD_CLIENT_NAME: &str = "Rust-API";

pub const GEOXP_DEFAULT_ENDPOINT: &str = "http://api.geoxp.com/api/v0";
pub const GEOXP_CLIENT_HEADER: &str = "User-Agent";
pub const GEOXP_CLIENT_NAME: &str = "GeoXP Rust API";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: Url,
    client_header: (String, String),
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(
        endpoint: &str,
        header_name: impl Into<String>,
        header_value: impl Into<String>,
    ) -> Result<Self> {
        Ok(ClientConfig {
            endpoint: parse_endpoint(endpoint)?,
            client_header: (header_name.into(), header_value.into()),
            timeout: None,
        })
    }

    /// Configuration for the GeoCoord API at `endpoint`.
    pub fn geocoord(endpoint: &str) -> Result<Self> {
        ClientConfig::new(endpoint, GEOCOORD_CLIENT_HEADER, GEOCOORD_CLIENT_NAME)
    }

    /// Configuration for the GeoXP API rooted at `base`.
    pub fn geoxp(base: &str) -> Result<Self> {
        ClientConfig::new(base, GEOXP_CLIENT_HEADER, GEOXP_CLIENT_NAME)
    }

    /// Override endpoint and timeout from `<PREFIX>_ENDPOINT` and
    /// `<PREFIX>_TIMEOUT_MS` when they are set.
    pub fn with_env(self, prefix: &str) -> Result<Self> {
        self.with_lookup(prefix, |name| env::var(name).ok())
    }

    fn with_lookup<F>(mut self, prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(&format!("{}_ENDPOINT", prefix)) {
            self.endpoint = parse_endpoint(&endpoint)?;
        }
        let timeout_var = format!("{}_TIMEOUT_MS", prefix);
        if let Some(timeout) = lookup(&timeout_var) {
            let millis = timeout
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("{}: {}", timeout_var, e)))?;
            self.timeout = Some(Duration::from_millis(millis));
        }
        Ok(self)
    }

    pub fn with_client_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.client_header = (name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn client_header(&self) -> (&str, &str) {
        (&self.client_header.0, &self.client_header.1)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolve an API path below the endpoint, keeping any base path the
    /// endpoint has.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("{} cannot be a base URL", self.endpoint)))?
            .pop_if_empty()
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}

/// Endpoints are a scheme, authority and optional base path; API paths are
/// appended to them, so a query or fragment has nowhere to go.
fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)?;
    if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
        return Err(Error::Config(format!(
            "endpoint must not carry a query or fragment: {}",
            url
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_url_for_keeps_base_path() {
        let config = ClientConfig::geoxp(GEOXP_DEFAULT_ENDPOINT).unwrap();
        assert_eq!(
            config.url_for("/layer/create").unwrap().as_str(),
            "http://api.geoxp.com/api/v0/layer/create"
        );
        let config = ClientConfig::geocoord("http://localhost:8888/").unwrap();
        let url = config.url_for("/api/layer/create").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8888/api/layer/create");
        assert_eq!(url.path(), "/api/layer/create");
    }

    #[test]
    fn test_client_headers() {
        let config = ClientConfig::geocoord(GEOCOORD_DEFAULT_ENDPOINT).unwrap();
        assert_eq!(config.client_header(), ("X-GeoCoord-Client", "Rust-API"));
        let config = config.with_client_header("X-GeoCoord-Client", "Other");
        assert_eq!(config.client_header(), ("X-GeoCoord-Client", "Other"));
        let config = ClientConfig::geoxp(GEOXP_DEFAULT_ENDPOINT).unwrap();
        assert_eq!(config.client_header(), ("User-Agent", "GeoXP Rust API"));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            ClientConfig::geocoord("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_with_query_or_fragment_is_rejected() {
        assert!(matches!(
            ClientConfig::geocoord("http://h:8888?x=1"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::geoxp("http://api.geoxp.com/api/v0#top"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::geocoord("mailto:ops@example.com"),
            Err(Error::Config(_))
        ));
        let result = ClientConfig::geocoord(GEOCOORD_DEFAULT_ENDPOINT)
            .unwrap()
            .with_lookup("GEOCOORD", |name| {
                if name.ends_with("_ENDPOINT") {
                    Some("http://h:8888/?x=1".to_string())
                } else {
                    None
                }
            });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_url_for_base_path_with_trailing_slash() {
        let config = ClientConfig::geoxp("http://api.geoxp.com/api/v0/").unwrap();
        let url = config.url_for("layer/retrieve").unwrap();
        assert_eq!(url.as_str(), "http://api.geoxp.com/api/v0/layer/retrieve");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = vec![
            ("GEOCOORD_ENDPOINT", "http://api.example.com:9000"),
            ("GEOCOORD_TIMEOUT_MS", "2500"),
        ]
        .into_iter()
        .collect();
        let config = ClientConfig::geocoord(GEOCOORD_DEFAULT_ENDPOINT)
            .unwrap()
            .with_lookup("GEOCOORD", |name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.endpoint().as_str(), "http://api.example.com:9000/");
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));

        let unchanged = ClientConfig::geocoord(GEOCOORD_DEFAULT_ENDPOINT)
            .unwrap()
            .with_lookup("GEOCOORD", |_| None)
            .unwrap();
        assert_eq!(unchanged.endpoint().as_str(), "http://localhost:8888/");
        assert_eq!(unchanged.timeout(), None);
    }

    #[test]
    fn test_lookup_rejects_bad_timeout() {
        let result = ClientConfig::geocoord(GEOCOORD_DEFAULT_ENDPOINT)
            .unwrap()
            .with_lookup("GEOCOORD", |name| {
                if name.ends_with("_TIMEOUT_MS") {
                    Some("soon".to_string())
                } else {
                    None
                }
            });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
