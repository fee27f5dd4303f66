use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};
use std::borrow::Cow;

// https://tools.ietf.org/html/rfc3986#section-2.3
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other bytes of the UTF-8 encoding MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
pub const ENCODE_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode every byte outside the RFC 3986 unreserved set.
pub fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, ENCODE_SET)
}

pub fn percent_encode_str<'a, T: Into<Cow<'a, str>>>(input: T) -> String {
    let input: Cow<'a, str> = input.into();
    percent_encode(&input).to_string()
}

pub fn percent_encode_cow<'a, T: Into<Cow<'a, str>>>(input: T) -> Cow<'a, str> {
    let input: Cow<'a, str> = input.into();
    match input {
        Cow::Borrowed(r) => Cow::from(percent_encode(r)),
        Cow::Owned(v) => Cow::from(percent_encode(&v).to_string()),
    }
}
