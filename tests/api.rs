mod common;

use std::error::Error as _;

use common::{body_params, RecordingTransport, RefusingTransport};
use geocoord::{Api, ApiSigner, ClientConfig, Error, HttpMethod, Parameters};

const KEY: &str = "4218ff78c075f0690d5696dad4bcbd1e60350a5a76f150e63495399b3e35345f";
const GCUID: &str = "6c135bb3-0d0d-4eee-bf50-53ed94bfc791";

fn signer() -> ApiSigner {
    ApiSigner::from_hex(KEY).unwrap()
}

fn api<T: geocoord::Transport>(transport: T) -> Api<T> {
    let config = ClientConfig::geocoord("http://localhost:8888").unwrap();
    Api::new(config, signer(), GCUID, transport)
}

#[test]
fn create_layer_end_to_end() {
    let transport = RecordingTransport::ok();
    let response = api(&transport).create_layer("test3", true).unwrap();
    assert_eq!(response.status, 200);

    let request = transport.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url.path(), "/api/layer/create");
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.header("X-GeoCoord-Client"), Some("Rust-API"));

    let params = body_params(&request);
    assert_eq!(params.get("id"), Some(GCUID));
    assert_eq!(params.get("name"), Some("test3"));
    assert_eq!(params.get("privacy"), Some("private"));
    let ts: i64 = params.get("ts").unwrap().parse().unwrap();
    assert!(ts > 1_500_000_000_000, "ts is in milliseconds: {}", ts);

    // the signature covers exactly the other parameters
    let mut unsigned = params.clone();
    unsigned.remove("sig");
    assert_eq!(unsigned.len(), 4);
    assert_eq!(
        params.get("sig").unwrap(),
        signer().sign("POST", "/api/layer/create", &unsigned)
    );
    assert!(signer().verify("POST", "/api/layer/create", &params));
}

#[test]
fn create_layer_signature_is_pinned() {
    let transport = RecordingTransport::ok();
    api(&transport)
        .with_clock(|| 1_300_000_000_000)
        .create_layer("test3", true)
        .unwrap();
    let params = body_params(&transport.last());
    assert_eq!(
        params.get("sig"),
        Some("0c973c44b9992201e2da4d00efa5d1643505bf732bb0b2201d62c322a5da8327")
    );
}

#[test]
fn non_success_status_is_returned_as_is() {
    let transport = RecordingTransport::new(403, "Forbidden", "bad signature");
    let response = api(&transport).create_layer("test3", false).unwrap();
    assert_eq!(response.status, 403);
    assert_eq!(response.reason, "Forbidden");
    assert_eq!(response.body_text(), "bad signature");
    assert_eq!(body_params(&transport.last()).get("privacy"), Some("public"));
}

#[test]
fn transport_failure_is_propagated() {
    let err = api(RefusingTransport).create_layer("test3", true).unwrap_err();
    match &err {
        Error::Transport(source) => {
            let io = source.downcast_ref::<std::io::Error>().unwrap();
            assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.source().is_some());
}

#[test]
fn endpoint_base_path_is_signed() {
    let transport = RecordingTransport::ok();
    let config = ClientConfig::geocoord("http://gw.example.com/geocoord/").unwrap();
    let api = Api::new(config, signer(), GCUID, &transport).with_clock(|| 42);
    api.create_layer("test3", true).unwrap();

    let request = transport.last();
    assert_eq!(request.url.as_str(), "http://gw.example.com/geocoord/api/layer/create");
    let params = body_params(&request);
    assert!(signer().verify("POST", "/geocoord/api/layer/create", &params));
    assert!(!signer().verify("POST", "/api/layer/create", &params));
}

#[test]
fn signer_shared_across_threads() {
    let signer = std::sync::Arc::new(signer());
    let params: Parameters = vec![("a", "1"), ("b", "2")].into_iter().collect();
    let expected = signer.sign("POST", "/x", &params);
    let handles = (0..4)
        .map(|_| {
            let signer = signer.clone();
            let params = params.clone();
            std::thread::spawn(move || signer.sign("POST", "/x", &params))
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
