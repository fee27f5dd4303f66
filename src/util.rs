use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::Result;
use crate::parameters::Parameters;

/// Split a URL into its endpoint (no query, no fragment) and decoded query
/// parameters.
pub fn url_to_endpoint_and_queries(url: &Url) -> (String, Parameters) {
    // queries save into parameters.
    let queries = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<Parameters>();
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    (endpoint.into(), queries)
}

#[test]
fn test_url_to_endpoint_and_queries() {
    let s = "http://example.com/example+.html?quever?=salting=parsing&&&&&vir!@$========%^&*()_=askparity++++==&パラメータ=テストパラメータ#frag";
    let u = Url::parse(s).unwrap();
    let (core, map) = url_to_endpoint_and_queries(&u);
    assert_eq!(core, "http://example.com/example+.html");
    assert_eq!(map.get("quever?"), Some("salting=parsing"));
    assert_eq!(map.get("vir!@$"), Some("=======%^"));
    assert_eq!(map.get("*()_"), Some("askparity    =="));
    assert_eq!(map.get("パラメータ"), Some("テストパラメータ"));
    let n = "https://example.com/";
    let nu = Url::parse(n).unwrap();
    let (core, map2) = url_to_endpoint_and_queries(&nu);
    assert_eq!(core, n);
    assert_eq!(map2.len(), 0);
}

/// Decode an `application/x-www-form-urlencoded` string (a request body or
/// URL query) into parameters. Fails when a decoded name or value is not
/// valid UTF-8.
pub fn query_to_parameters(query: &str) -> Result<Parameters> {
    let mut params = Parameters::new();
    for pair in query.trim_start_matches('?').split('&').filter(|s| !s.is_empty()) {
        let mut kv = pair.splitn(2, '=');
        let name = decode_component(kv.next().unwrap_or(""))?;
        let value = decode_component(kv.next().unwrap_or(""))?;
        params.append(name, value);
    }
    Ok(params)
}

fn decode_component(s: &str) -> Result<String> {
    let s = s.replace('+', " ");
    Ok(percent_decode_str(&s).decode_utf8()?.into_owned())
}

#[test]
fn test_query_to_parameters() {
    let map = query_to_parameters("parameter=value&!%40%23%24%25^%26*()_%2B=!%40%23%24%25^%26*()_%2B%3D")
        .unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("parameter"), Some("value"));
    assert_eq!(map.get("!@#$%^&*()_+"), Some("!@#$%^&*()_+="));
    let map2 = query_to_parameters("quever?=salting=parsing&&&&&vir!@$========%^&*()_=askparity++++==")
        .unwrap();
    assert_eq!(map2.len(), 3);
    assert_eq!(map2.get("quever?"), Some("salting=parsing"));
    assert_eq!(map2.get("vir!@$"), Some("=======%^"));
    assert_eq!(map2.get("*()_"), Some("askparity    =="));
    let map3 = query_to_parameters("").unwrap();
    assert_eq!(map3.len(), 0);
    let map4 = query_to_parameters("?a=1&a=2&flag").unwrap();
    assert_eq!(map4.get_all("a"), ["1", "2"]);
    assert_eq!(map4.get("flag"), Some(""));
}

#[test]
fn test_query_to_parameters_rejects_invalid_utf8() {
    let err = query_to_parameters("name=%C3%28").unwrap_err();
    assert!(matches!(err, crate::Error::Decoding(_)));
}
