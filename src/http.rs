//! HTTP requests and responses as plain data, and the [`Transport`] that
//! carries them.
//!
//! Clients build a fully signed [`HttpRequest`] and hand it to their
//! transport. Whatever comes back is returned untouched: a 4xx or 5xx status
//! is a normal [`HttpResponse`], only failures to get a response at all are
//! errors.

use std::borrow::Cow;
use url::Url;

use crate::error::Result;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Sends one request and waits for its response.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        (**self).send(request)
    }
}

#[cfg(feature = "reqwest")]
pub use self::blocking::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod blocking {
    use std::time::Duration;
    use tracing::debug;

    use super::{HttpMethod, HttpRequest, HttpResponse, Transport};
    use crate::error::{Error, Result};

    /// [`Transport`] backed by reqwest's blocking client.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::blocking::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Result<Self> {
            ReqwestTransport::with_timeout(None)
        }

        /// `None` keeps reqwest's default timeout.
        ///
        /// Idle connections are never kept: every request opens its own
        /// connection, which is closed once the response has been read.
        pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
            let mut builder = reqwest::blocking::Client::builder().pool_max_idle_per_host(0);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder.build().map_err(Error::transport)?;
            Ok(ReqwestTransport { client })
        }
    }

    impl Transport for ReqwestTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
            };
            let mut builder = self.client.request(method, request.url.clone());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let response = builder
                .body(request.body.clone())
                .send()
                .map_err(Error::transport)?;

            let status = response.status();
            debug!(status = status.as_u16(), url = %request.url, "received response");
            let headers = response
                .headers()
                .iter()
                .map(|(k, v)| {
                    (
                        k.as_str().to_string(),
                        String::from_utf8_lossy(v.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response.bytes().map_err(Error::transport)?.to_vec();
            Ok(HttpResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                headers,
                body,
            })
        }
    }
}
