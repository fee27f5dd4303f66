//! Client for the GeoCoord API, whose requests carry an HMAC-SHA256 `sig`.

use chrono::Utc;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, CONTENT_TYPE, FORM_URLENCODED};
use crate::parameters::Parameters;
use crate::signer::ApiSigner;

pub const LAYER_CREATE_PATH: &str = "/api/layer/create";

const PARAM_ID: &str = "id";
const PARAM_TIMESTAMP: &str = "ts";
const PARAM_NAME: &str = "name";
const PARAM_PRIVACY: &str = "privacy";

const PRIVACY_PUBLIC: &str = "public";
const PRIVACY_PRIVATE: &str = "private";

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// GeoCoord API client.
///
/// Holds the endpoint, the caller id (`gcuid`) and the signing key; every
/// operation is a single signed POST whose response is returned as is.
#[derive(Debug)]
pub struct Api<T> {
    config: ClientConfig,
    signer: ApiSigner,
    gcuid: String,
    transport: T,
    clock: fn() -> i64,
}

#[cfg(feature = "reqwest")]
impl Api<crate::http::ReqwestTransport> {
    /// Client sending through reqwest, honouring the configured timeout.
    pub fn connect(
        config: ClientConfig,
        signer: ApiSigner,
        gcuid: impl Into<String>,
    ) -> Result<Self> {
        let transport = crate::http::ReqwestTransport::with_timeout(config.timeout())?;
        Ok(Api::new(config, signer, gcuid, transport))
    }
}

impl<T: Transport> Api<T> {
    pub fn new(
        config: ClientConfig,
        signer: ApiSigner,
        gcuid: impl Into<String>,
        transport: T,
    ) -> Self {
        Api {
            config,
            signer,
            gcuid: gcuid.into(),
            transport,
            clock: now_millis,
        }
    }

    /// Replace the source of the `ts` parameter (milliseconds since epoch).
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the signed request creating a layer named `name`.
    ///
    /// NOTE: `public_layer == true` is sent as `privacy=private` and `false`
    /// as `privacy=public`. The service has always been called this way.
    pub fn build_create_layer(&self, name: &str, public_layer: bool) -> Result<HttpRequest> {
        let mut params = self.base_params();
        params.insert(PARAM_NAME, name);
        if !public_layer {
            params.insert(PARAM_PRIVACY, PRIVACY_PUBLIC);
        } else {
            params.insert(PARAM_PRIVACY, PRIVACY_PRIVATE);
        }
        self.signed_request(HttpMethod::Post, LAYER_CREATE_PATH, params)
    }

    pub fn create_layer(&self, name: &str, public_layer: bool) -> Result<HttpResponse> {
        let request = self.build_create_layer(name, public_layer)?;
        self.send(&request)
    }

    /// Send an already built request.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = request.method.as_str(), url = %request.url, "sending GeoCoord request");
        self.transport.send(request)
    }

    fn base_params(&self) -> Parameters {
        let mut params = Parameters::new();
        params
            .insert(PARAM_ID, self.gcuid.as_str())
            .insert(PARAM_TIMESTAMP, (self.clock)());
        params
    }

    fn signed_request(
        &self,
        method: HttpMethod,
        path: &str,
        mut params: Parameters,
    ) -> Result<HttpRequest> {
        let url = self.config.url_for(path)?;
        // the signature covers the request path, not the full URL
        self.signer.sign_into(method.as_str(), url.path(), &mut params);
        let names = params.names().collect::<Vec<_>>();
        debug!(method = method.as_str(), path = url.path(), params = ?names, "built signed request");

        let (header_name, header_value) = self.config.client_header();
        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                (header_name.to_string(), header_value.to_string()),
                (CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string()),
            ],
            body: params.to_form_body(),
        })
    }
}
