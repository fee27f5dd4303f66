//! Client for the GeoXP API, authenticated with two-legged OAuth 1.0.
//!
//! Structured arguments (layers, atoms, queries) are sent as JSON text in a
//! single form parameter.

use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, CONTENT_TYPE, FORM_URLENCODED};
use crate::oauth1::{Consumer, OAuthSigner, Rfc5849Signer};
use crate::parameters::Parameters;

pub const LAYER_CREATE_PATH: &str = "/layer/create";
pub const LAYER_RETRIEVE_PATH: &str = "/layer/retrieve";
pub const LAYER_UPDATE_PATH: &str = "/layer/update";
pub const ATOM_STORE_PATH: &str = "/atom/store";
pub const ATOM_RETRIEVE_PATH: &str = "/atom/retrieve";
pub const SEARCH_ATOMS_PATH: &str = "/search/atoms";

/// GeoXP API client. Works with user or layer based OAuth credentials.
#[derive(Debug)]
pub struct GeoXp<T, S = Rfc5849Signer> {
    config: ClientConfig,
    consumer: Consumer,
    oauth: S,
    transport: T,
}

#[cfg(feature = "reqwest")]
impl GeoXp<crate::http::ReqwestTransport> {
    pub fn connect(config: ClientConfig, consumer: Consumer) -> Result<Self> {
        let transport = crate::http::ReqwestTransport::with_timeout(config.timeout())?;
        Ok(GeoXp::new(config, consumer, transport))
    }
}

impl<T: Transport> GeoXp<T> {
    pub fn new(config: ClientConfig, consumer: Consumer, transport: T) -> Self {
        GeoXp::with_signer(config, consumer, Rfc5849Signer::new(), transport)
    }
}

impl<T: Transport, S: OAuthSigner> GeoXp<T, S> {
    pub fn with_signer(config: ClientConfig, consumer: Consumer, oauth: S, transport: T) -> Self {
        GeoXp {
            config,
            consumer,
            oauth,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_layer_create<L: Serialize + ?Sized>(&self, layer: &L) -> Result<HttpRequest> {
        let mut params = Parameters::new();
        params.insert("layer", serde_json::to_string(layer)?);
        self.oauth_post(LAYER_CREATE_PATH, params)
    }

    pub fn layer_create<L: Serialize + ?Sized>(&self, layer: &L) -> Result<HttpResponse> {
        self.send(&self.build_layer_create(layer)?)
    }

    pub fn build_layer_retrieve(&self, layer_name: &str) -> Result<HttpRequest> {
        let mut params = Parameters::new();
        params.insert("name", layer_name);
        self.oauth_post(LAYER_RETRIEVE_PATH, params)
    }

    pub fn layer_retrieve(&self, layer_name: &str) -> Result<HttpResponse> {
        self.send(&self.build_layer_retrieve(layer_name)?)
    }

    pub fn build_layer_update<L: Serialize + ?Sized>(&self, layer: &L) -> Result<HttpRequest> {
        let mut params = Parameters::new();
        params.insert("layer", serde_json::to_string(layer)?);
        self.oauth_post(LAYER_UPDATE_PATH, params)
    }

    pub fn layer_update<L: Serialize + ?Sized>(&self, layer: &L) -> Result<HttpResponse> {
        self.send(&self.build_layer_update(layer)?)
    }

    pub fn build_atom_store<A: Serialize + ?Sized>(
        &self,
        layer_id: &str,
        atom_type: &str,
        atom: &A,
    ) -> Result<HttpRequest> {
        let mut params = Parameters::new();
        params
            .insert("type", atom_type)
            .insert("atom", serde_json::to_string(atom)?)
            .insert("layer", layer_id);
        self.oauth_post(ATOM_STORE_PATH, params)
    }

    pub fn atom_store<A: Serialize + ?Sized>(
        &self,
        layer_id: &str,
        atom_type: &str,
        atom: &A,
    ) -> Result<HttpResponse> {
        self.send(&self.build_atom_store(layer_id, atom_type, atom)?)
    }

    pub fn build_atom_retrieve(&self, layer: &str, atom: &str) -> Result<HttpRequest> {
        let mut params = Parameters::new();
        params.insert("atom", atom).insert("layer", layer);
        self.oauth_post(ATOM_RETRIEVE_PATH, params)
    }

    pub fn atom_retrieve(&self, layer: &str, atom: &str) -> Result<HttpResponse> {
        self.send(&self.build_atom_retrieve(layer, atom)?)
    }

    pub fn build_search_atoms<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<HttpRequest> {
        let mut params = Parameters::new();
        params.insert("q", serde_json::to_string(query)?);
        self.oauth_post(SEARCH_ATOMS_PATH, params)
    }

    pub fn search_atoms<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<HttpResponse> {
        self.send(&self.build_search_atoms(query)?)
    }

    /// Send an already built request.
    pub fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = request.method.as_str(), url = %request.url, "sending GeoXP request");
        self.transport.send(request)
    }

    fn oauth_post(&self, path: &str, mut params: Parameters) -> Result<HttpRequest> {
        let method = HttpMethod::Post;
        let url = self.config.url_for(path)?;
        self.oauth
            .sign_request(method.as_str(), &url, &mut params, &self.consumer, None);
        let names = params.names().collect::<Vec<_>>();
        debug!(url = %url, params = ?names, "built OAuth signed request");

        let (header_name, header_value) = self.config.client_header();
        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                (CONTENT_TYPE.to_string(), FORM_URLENCODED.to_string()),
                (header_name.to_string(), header_value.to_string()),
            ],
            body: params.to_form_body(),
        })
    }
}
