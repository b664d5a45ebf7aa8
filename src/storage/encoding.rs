use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Bytes escaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `URI_COMPONENT` minus the reserved characters kept literal in cookie values.
const COOKIE_VALUE: &AsciiSet = &URI_COMPONENT
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'/')
    .remove(b':')
    .remove(b'<')
    .remove(b'=')
    .remove(b'>')
    .remove(b'?')
    .remove(b'@')
    .remove(b'[')
    .remove(b']')
    .remove(b'^')
    .remove(b'`')
    .remove(b'{')
    .remove(b'|')
    .remove(b'}');

/// Percent-encodes `value` for storage in a cookie.
///
/// Equivalent to `encodeURIComponent` followed by decoding `%23 %24 %26 %2B %2F %3A
/// %3C %3D %3E %3F %40 %5B %5D %5E %60 %7B %7C %7D` back to their characters.
/// `%`, `;`, `,`, `"`, `\` and whitespace stay escaped.
///
/// ```rust
/// use cookie_storage::storage::encode_cookie_value;
///
/// assert_eq!(encode_cookie_value("a/b?c=d"), "a/b?c=d");
/// assert_eq!(encode_cookie_value("a b;c"), "a%20b%3Bc");
/// ```
pub fn encode_cookie_value(value: &str) -> String {
    utf8_percent_encode(value, COOKIE_VALUE).to_string()
}

/// Reverses [`encode_cookie_value`]. Invalid UTF-8 sequences are replaced.
pub fn decode_cookie_value(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}
