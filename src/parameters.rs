use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::Result;

/// A single request parameter value before it is rendered as text.
pub enum ParamValue<'a> {
    StringValue(Cow<'a, str>),
    IntValue(i64),
    FloatValue(f64),
    BoolValue(bool),
}

impl<'a> From<&'a str> for ParamValue<'a> {
    fn from(s: &'a str) -> Self {
        ParamValue::<'a>::StringValue(s.into())
    }
}

impl<'a> From<&'a String> for ParamValue<'a> {
    fn from(s: &'a String) -> Self {
        ParamValue::<'a>::StringValue(s.as_str().into())
    }
}

impl From<String> for ParamValue<'_> {
    fn from(s: String) -> Self {
        ParamValue::StringValue(s.into())
    }
}

impl<'a> From<Cow<'a, str>> for ParamValue<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        ParamValue::StringValue(s)
    }
}

impl From<i64> for ParamValue<'_> {
    fn from(n: i64) -> Self {
        ParamValue::IntValue(n)
    }
}

impl From<i32> for ParamValue<'_> {
    fn from(n: i32) -> Self {
        ParamValue::IntValue(n.into())
    }
}

impl From<f64> for ParamValue<'_> {
    fn from(n: f64) -> Self {
        ParamValue::FloatValue(n)
    }
}

impl From<bool> for ParamValue<'_> {
    fn from(b: bool) -> Self {
        ParamValue::BoolValue(b)
    }
}

impl ParamValue<'_> {
    pub fn into_string(self) -> String {
        match self {
            ParamValue::StringValue(s) => s.into_owned(),
            ParamValue::IntValue(n) => n.to_string(),
            ParamValue::FloatValue(n) => n.to_string(),
            ParamValue::BoolValue(b) => b.to_string(),
        }
    }
}

/// Request parameters: each name maps to one or more text values.
///
/// Names are kept sorted so that form bodies come out in a stable order;
/// the signing code never relies on that order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameters {
    values: BTreeMap<String, Vec<String>>,
}

impl Parameters {
    pub fn new() -> Self {
        Parameters::default()
    }

    /// Decode raw name/value byte pairs, failing on malformed UTF-8.
    pub fn from_utf8_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let mut params = Parameters::new();
        for (name, value) in pairs {
            let name = std::str::from_utf8(name.as_ref())?;
            let value = std::str::from_utf8(value.as_ref())?;
            params.append(name, value);
        }
        Ok(params)
    }

    /// Set `name` to a single value, dropping any values it had.
    pub fn insert<'a, K, V>(&mut self, name: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<ParamValue<'a>>,
    {
        self.values
            .insert(name.into(), vec![value.into().into_string()]);
        self
    }

    /// Add one more value to `name`.
    pub fn append<'a, K, V>(&mut self, name: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<ParamValue<'a>>,
    {
        self.values
            .entry(name.into())
            .or_default()
            .push(value.into().into_string());
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.values.remove(name)
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Every (name, value) combination; a name with N values yields N pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().flat_map(|(name, values)| {
            values
                .iter()
                .map(move |value| (name.as_str(), value.as_str()))
        })
    }

    /// Number of (name, value) pairs.
    pub fn len(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize as an `application/x-www-form-urlencoded` body.
    pub fn to_form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

impl<'a, K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<ParamValue<'a>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        params.extend(iter);
        params
    }
}

impl<'a, K, V> Extend<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<ParamValue<'a>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    #[test]
    fn test_insert_replaces_and_append_accumulates() {
        let mut params = Parameters::new();
        params.insert("a", "1").append("a", "2").insert("b", "x");
        assert_eq!(params.get_all("a"), ["1", "2"]);
        assert_eq!(params.len(), 3);

        params.insert("a", 3i32);
        assert_eq!(params.get_all("a"), ["3"]);
        assert_eq!(params.get("b"), Some("x"));
        assert_eq!(params.get("missing"), None);
        assert!(params.get_all("missing").is_empty());
    }

    #[test]
    fn test_value_rendering() {
        let mut params = Parameters::new();
        params
            .insert("ts", 1_300_000_000_000i64)
            .insert("n", 7i32)
            .insert("f", 0.5)
            .insert("flag", true)
            .insert("owned", String::from("o"));
        assert_eq!(params.get("ts"), Some("1300000000000"));
        assert_eq!(params.get("n"), Some("7"));
        assert_eq!(params.get("f"), Some("0.5"));
        assert_eq!(params.get("flag"), Some("true"));
        assert_eq!(params.get("owned"), Some("o"));
    }

    #[test]
    fn test_pairs_expand_multiple_values() {
        let params: Parameters = vec![("b", "2"), ("a", "1"), ("a", "2")]
            .into_iter()
            .collect();
        let pairs = params.pairs().collect::<Vec<_>>();
        assert_eq!(pairs, vec![("a", "1"), ("a", "2"), ("b", "2")]);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove() {
        let mut params: Parameters = vec![("sig", "abc"), ("id", "x")].into_iter().collect();
        assert_eq!(params.remove("sig"), Some(vec!["abc".to_string()]));
        assert!(!params.contains("sig"));
        assert_eq!(params.remove("sig"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_form_body() {
        let params: Parameters = vec![("name", "my layer"), ("q", "{\"a\":1}"), ("x", "à&b")]
            .into_iter()
            .collect();
        assert_eq!(
            params.to_form_body(),
            "name=my+layer&q=%7B%22a%22%3A1%7D&x=%C3%A0%26b"
        );
        assert_eq!(Parameters::new().to_form_body(), "");
        assert!(Parameters::new().is_empty());
    }

    #[test]
    fn test_from_utf8_pairs() {
        let params = Parameters::from_utf8_pairs(vec![
            ("à".as_bytes(), "val1".as_bytes()),
            ("à".as_bytes(), "val2".as_bytes()),
        ])
        .unwrap();
        assert_eq!(params.get_all("à"), ["val1", "val2"]);

        let invalid = vec![(b"name".to_vec(), b"\xC3\x28".to_vec())];
        assert!(matches!(
            Parameters::from_utf8_pairs(invalid),
            Err(Error::Decoding(_))
        ));
    }
}
