//! OAuth 1.0 request signing (RFC 5849).
//!
//! [`OAuthSigner`] is the seam the GeoXP client signs through;
//! [`Rfc5849Signer`] is the implementation used by default.

use url::Url;

use crate::parameters::Parameters;

mod signer;
mod values;

pub use signer::Rfc5849Signer;
pub use values::*;

/// Signs requests with OAuth 1.0.
pub trait OAuthSigner {
    fn signature_method(&self) -> SignatureMethod;

    /// Compute the `oauth_signature` value for a request whose protocol
    /// parameters are already present in `params`.
    ///
    /// # Parameters
    /// - method: HTTP method, ex)"GET", "POST", ...
    /// - url: request URL; its query takes part in the signature.
    /// - params: body parameters, not encoded.
    fn sign(
        &self,
        method: &str,
        url: &Url,
        params: &Parameters,
        consumer: &Consumer,
        token: Option<&Token>,
    ) -> String;

    /// Value for `oauth_version`; `None` leaves the parameter out.
    fn version(&self) -> Option<&str> {
        Some(OAUTH_VALUE_VERSION)
    }

    fn make_nonce(&self) -> String;

    /// Seconds since the epoch.
    fn make_timestamp(&self) -> i64;

    /// Add the OAuth protocol parameters to `params`, then sign and store the
    /// signature as `oauth_signature`.
    ///
    /// Nonce, timestamp and version already present in `params` are kept.
    fn sign_request(
        &self,
        method: &str,
        url: &Url,
        params: &mut Parameters,
        consumer: &Consumer,
        token: Option<&Token>,
    ) {
        params.remove(OAUTH_PARAM_KEY_SIGNATURE);
        params.insert(OAUTH_PARAM_KEY_CONSUMER_KEY, consumer.key());
        params.insert(
            OAUTH_PARAM_KEY_SIGNATURE_METHOD,
            self.signature_method().as_str(),
        );
        if let Some(token) = token {
            params.insert(OAUTH_PARAM_KEY_TOKEN, token.key());
        }
        if !params.contains(OAUTH_PARAM_KEY_NONCE) {
            params.insert(OAUTH_PARAM_KEY_NONCE, self.make_nonce());
        }
        if !params.contains(OAUTH_PARAM_KEY_TIMESTAMP) {
            params.insert(OAUTH_PARAM_KEY_TIMESTAMP, self.make_timestamp());
        }
        if let Some(version) = self.version() {
            if !params.contains(OAUTH_PARAM_KEY_VERSION) {
                params.insert(OAUTH_PARAM_KEY_VERSION, version);
            }
        }
        let signature = self.sign(method, url, params, consumer, token);
        params.insert(OAUTH_PARAM_KEY_SIGNATURE, signature);
    }
}
