//! Signed API clients for the GeoCoord and GeoXP services.
//!
//! - [`ApiSigner`] computes the HMAC-SHA256 `sig` parameter of GeoCoord
//!   requests; [`Api`] uses it to issue GeoCoord calls.
//! - [`GeoXp`] issues GeoXP calls signed with OAuth 1.0 through an
//!   [`oauth1::OAuthSigner`].
//!
//! Both clients are synchronous: one operation is one POST, and the response
//! is handed back without looking at its status.
//!
//! ```no_run
//! use geocoord::{Api, ApiSigner, ClientConfig};
//!
//! # fn main() -> geocoord::Result<()> {
//! let signer = ApiSigner::from_hex("4218ff78c075f0690d5696dad4bcbd1e60350a5a76f150e63495399b3e35345f")?;
//! let config = ClientConfig::geocoord("http://localhost:8888")?;
//! let api = Api::connect(config, signer, "6c135bb3-0d0d-4eee-bf50-53ed94bfc791")?;
//! let response = api.create_layer("test3", true)?;
//! println!("{} {} {}", response.status, response.reason, response.body_text());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod encoding;
pub mod error;
pub mod geoxp;
pub mod http;
pub mod oauth1;
pub mod parameters;
pub mod signer;
pub mod util;

pub use api::Api;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use geoxp::GeoXp;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use oauth1::{Consumer, Token};
pub use parameters::{ParamValue, Parameters};
pub use signer::{canonical_message, ApiSigner, SIGNATURE_PARAM};

#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;
