use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::borrow::Cow;
use url::Url;
use uuid::Uuid;

use crate::encoding::{percent_encode, percent_encode_cow};
use crate::oauth1::*;
use crate::parameters::Parameters;
use crate::util;

type HmacSha1 = Hmac<Sha1>;

/// OAuth 1.0 signer following RFC 5849.
///
/// Nonce and timestamp are generated per request unless fixed with
/// [`oauth_nonce`](#method.oauth_nonce) and
/// [`oauth_timestamp`](#method.oauth_timestamp).
#[derive(Clone, Debug)]
pub struct Rfc5849Signer {
    signature_method: SignatureMethod,
    version: Option<String>,
    nonce: Option<String>,
    timestamp: Option<i64>,
}

impl Default for Rfc5849Signer {
    fn default() -> Self {
        Rfc5849Signer {
            signature_method: SignatureMethod::HmacSha1,
            version: Some(OAUTH_VALUE_VERSION.into()),
            nonce: None,
            timestamp: None,
        }
    }
}

impl Rfc5849Signer {
    pub fn new() -> Self {
        Rfc5849Signer::default()
    }

    pub fn oauth_signature_method(mut self, signature_method: SignatureMethod) -> Self {
        self.signature_method = signature_method;
        self
    }

    pub fn oauth_version(mut self, version: Option<impl Into<String>>) -> Self {
        self.version = version.map(|v| v.into());
        self
    }

    pub fn oauth_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn oauth_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl OAuthSigner for Rfc5849Signer {
    fn signature_method(&self) -> SignatureMethod {
        self.signature_method
    }

    fn sign(
        &self,
        method: &str,
        url: &Url,
        params: &Parameters,
        consumer: &Consumer,
        token: Option<&Token>,
    ) -> String {
        let token_secret = token.map(Token::secret);
        match self.signature_method {
            SignatureMethod::PlainText => {
                generate_signature_plaintext(consumer.secret(), token_secret)
            }
            SignatureMethod::HmacSha1 => {
                let (endpoint, query) = util::url_to_endpoint_and_queries(url);
                // join query and body parameters and sort by alphabetical order
                let mut payload = query
                    .pairs()
                    .chain(params.pairs())
                    .filter(|(k, _)| *k != OAUTH_PARAM_KEY_REALM && *k != OAUTH_PARAM_KEY_SIGNATURE)
                    .map(|(k, v)| (percent_encode_cow(k), percent_encode_cow(v)))
                    .collect::<Vec<(Cow<str>, Cow<str>)>>();
                payload.sort();
                generate_signature_hmacsha1(
                    consumer.secret(),
                    token_secret,
                    method,
                    &endpoint,
                    &payload,
                )
            }
        }
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn make_nonce(&self) -> String {
        self.nonce
            .clone()
            .unwrap_or_else(|| format!("{}", Uuid::new_v4()))
    }

    fn make_timestamp(&self) -> i64 {
        self.timestamp.unwrap_or_else(|| Utc::now().timestamp())
    }
}

fn generate_signature_plaintext(consumer_secret: &str, token_secret: Option<&str>) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or(""))
    )
}

fn generate_signature_hmacsha1(
    consumer_secret: &str,
    token_secret: Option<&str>,
    http_method: &str,
    endpoint: &str,
    encoded_params: &[(Cow<str>, Cow<str>)],
) -> String {
    // prepare contents to sign -----------------------------------------------
    let http_method = http_method.to_ascii_uppercase();
    let encoded_params = encoded_params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&");
    // parameters are encoded twice.
    let base_str = format!(
        "{}&{}&{}",
        percent_encode(&http_method),
        percent_encode(endpoint),
        percent_encode(&encoded_params)
    );

    // prepare sign key -------------------------------------------------------
    let sign_key = generate_signature_plaintext(consumer_secret, token_secret);

    // generate signature -----------------------------------------------------
    let mut mac = HmacSha1::new_from_slice(sign_key.as_bytes())
        .expect("this message is dummy; SHA-1 accepts any size of keys.");
    mac.update(base_str.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
