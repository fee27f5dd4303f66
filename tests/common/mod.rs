#![allow(dead_code)]

use std::cell::RefCell;

use geocoord::{Error, HttpRequest, HttpResponse, Parameters, Result, Transport};

/// Transport that records every request and answers with a canned response.
pub struct RecordingTransport {
    pub requests: RefCell<Vec<HttpRequest>>,
    status: u16,
    reason: &'static str,
    body: &'static str,
}

impl RecordingTransport {
    pub fn new(status: u16, reason: &'static str, body: &'static str) -> Self {
        RecordingTransport {
            requests: RefCell::new(Vec::new()),
            status,
            reason,
            body,
        }
    }

    pub fn ok() -> Self {
        RecordingTransport::new(200, "OK", "{}")
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        Ok(HttpResponse {
            status: self.status,
            reason: self.reason.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: self.body.as_bytes().to_vec(),
        })
    }
}

/// Transport that never reaches the server.
pub struct RefusingTransport;

impl Transport for RefusingTransport {
    fn send(&self, _request: &HttpRequest) -> Result<HttpResponse> {
        let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        Err(Error::transport(err))
    }
}

pub fn body_params(request: &HttpRequest) -> Parameters {
    geocoord::util::query_to_parameters(&request.body).expect("form body is valid UTF-8")
}
