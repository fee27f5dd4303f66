//! GeoCoord request signatures.
//!
//! The signature is an HMAC-SHA256 over a canonical message:
//!
//! ```text
//! METHOD\r\n
//! URI\r\n
//! name=value\r\n   (one line per name/value combination, sorted)
//! ```
//!
//! Names and values are percent-encoded per RFC 3986 before sorting and the
//! `sig` parameter itself never takes part in the message.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use tracing::trace;

use crate::encoding::percent_encode;
use crate::error::Result;
use crate::parameters::Parameters;

type HmacSha256 = Hmac<Sha256>;

/// Name of the parameter carrying the signature.
pub const SIGNATURE_PARAM: &str = "sig";

const LINE_END: &str = "\r\n";

/// Build the message that gets MACed for `method`, `uri` and `params`.
pub fn canonical_message(method: &str, uri: &str, params: &Parameters) -> String {
    let mut pairs = params
        .pairs()
        .filter(|(name, _)| *name != SIGNATURE_PARAM)
        .map(|(name, value)| format!("{}={}", percent_encode(name), percent_encode(value)))
        .collect::<Vec<String>>();
    // byte order, not locale order
    pairs.sort_unstable();

    let mut message = String::with_capacity(
        method.len() + uri.len() + pairs.iter().map(|p| p.len() + 2).sum::<usize>() + 4,
    );
    message.push_str(method);
    message.push_str(LINE_END);
    message.push_str(uri);
    message.push_str(LINE_END);
    for pair in &pairs {
        message.push_str(pair);
        message.push_str(LINE_END);
    }
    message
}

/// Signs GeoCoord API requests with a fixed secret key.
#[derive(Clone)]
pub struct ApiSigner {
    key: Vec<u8>,
}

impl ApiSigner {
    pub fn new<K: Into<Vec<u8>>>(key: K) -> Self {
        ApiSigner { key: key.into() }
    }

    /// Build a signer from a hex encoded key.
    pub fn from_hex(key: &str) -> Result<Self> {
        Ok(ApiSigner::new(hex::decode(key.trim())?))
    }

    /// Compute the lowercase hex signature of a request.
    pub fn sign(&self, method: &str, uri: &str, params: &Parameters) -> String {
        let mac = self.mac(&canonical_message(method, uri, params));
        hex::encode(mac.finalize().into_bytes())
    }

    /// Same as [`sign`](#method.sign) for method and URI given as raw bytes.
    pub fn sign_raw(&self, method: &[u8], uri: &[u8], params: &Parameters) -> Result<String> {
        let method = std::str::from_utf8(method)?;
        let uri = std::str::from_utf8(uri)?;
        Ok(self.sign(method, uri, params))
    }

    /// Sign the request and store the signature under `sig`, replacing any
    /// previous value.
    pub fn sign_into(&self, method: &str, uri: &str, params: &mut Parameters) {
        let signature = self.sign(method, uri, params);
        params.insert(SIGNATURE_PARAM, signature);
    }

    /// Check the `sig` parameter of a request against its other parameters.
    pub fn verify(&self, method: &str, uri: &str, params: &Parameters) -> bool {
        let expected = match params.get(SIGNATURE_PARAM).map(hex::decode) {
            Some(Ok(sig)) => sig,
            _ => return false,
        };
        self.mac(&canonical_message(method, uri, params))
            .verify_slice(&expected)
            .is_ok()
    }

    fn mac(&self, message: &str) -> HmacSha256 {
        trace!(message_len = message.len(), "signing canonical message");
        // NOTE: HMAC accepts keys of any length.
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC-SHA256 accepts any size of keys.");
        mac.update(message.as_bytes());
        mac
    }
}

impl fmt::Debug for ApiSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSigner")
            .field("key", &"<redacted>")
            .finish()
    }
}
