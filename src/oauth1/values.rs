use std::fmt;

pub const OAUTH_VALUE_VERSION: &str = "1.0";

pub const OAUTH_VALUE_SIGMETHOD_HMACSHA1: &str = "HMAC-SHA1";
pub const OAUTH_VALUE_SIGMETHOD_PLAINTEXT: &str = "PLAINTEXT";

pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_PARAM_KEY_TOKEN: &str = "oauth_token";
pub const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";

// "realm" is a special parameter which never takes part in the signature.
pub const OAUTH_PARAM_KEY_REALM: &str = "realm";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureMethod {
    PlainText,
    HmacSha1,
    // TODO: add implementation
    // RsaSha1,
}

impl SignatureMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureMethod::PlainText => OAUTH_VALUE_SIGMETHOD_PLAINTEXT,
            SignatureMethod::HmacSha1 => OAUTH_VALUE_SIGMETHOD_HMACSHA1,
        }
    }
}

impl From<SignatureMethod> for &'static str {
    fn from(method: SignatureMethod) -> Self {
        method.as_str()
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth consumer credentials.
#[derive(Clone)]
pub struct Consumer {
    key: String,
    secret: String,
}

impl Consumer {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Consumer {
            key: key.into(),
            secret: secret.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// OAuth access token. The GeoXP API signs two-legged requests, without one.
#[derive(Clone)]
pub struct Token {
    key: String,
    secret: String,
}

impl Token {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Token {
            key: key.into(),
            secret: secret.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}
