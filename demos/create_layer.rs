//! Create a layer on a GeoCoord API endpoint.
//!
//! ```text
//! GEOCOORD_ENDPOINT=http://localhost:8888 GEOCOORD_KEY=<hex key> GEOCOORD_GCUID=<uuid> \
//!     RUST_LOG=geocoord=debug cargo run --example create_layer -- test3
//! ```

use std::env;

use geocoord::config::GEOCOORD_DEFAULT_ENDPOINT;
use geocoord::{Api, ApiSigner, ClientConfig, Error};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> geocoord::Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("{} is not set", name)))
}

fn main() -> geocoord::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let name = env::args().nth(1).unwrap_or_else(|| "test3".to_string());
    let public_layer = env::args().nth(2).map_or(true, |flag| flag != "private");

    let config = ClientConfig::geocoord(GEOCOORD_DEFAULT_ENDPOINT)?.with_env("GEOCOORD")?;
    let signer = ApiSigner::from_hex(&required("GEOCOORD_KEY")?)?;
    let api = Api::connect(config, signer, required("GEOCOORD_GCUID")?)?;

    let response = api.create_layer(&name, public_layer)?;
    println!("{} {} {}", response.status, response.reason, response.body_text());
    Ok(())
}
