//! Form-body parameter lookup.
//!
//! Bodies are `application/x-www-form-urlencoded`. Lookup is by key prefix
//! including the `=` (e.g. `"volume="`), matching only at a parameter
//! boundary, so `xvolume=1` does not answer for `volume=`. The first match
//! wins; later duplicates are ignored. This is stricter than a plain
//! substring search, which would also match inside another key or a value.
//!
//! Decoding never fails: `+` becomes a space, valid `%XX` escapes are
//! unescaped, malformed escapes are kept as-is, and invalid UTF-8 is
//! replaced. Numeric parsing of the result happens elsewhere with
//! `str::parse`, which is locale-independent.

use std::borrow::Cow;

/// Find `key` (including its trailing `=`) and return the decoded value.
///
/// Returns `None` when the key is absent. A present key with an empty value
/// yields `Some("")`.
pub fn decode(body: &[u8], key: &str) -> Option<String> {
    let raw = find_raw(body, key.as_bytes())?;
    Some(unescape(raw))
}

/// Like [`decode`], returning `default` unchanged when the key is absent.
pub fn decode_or(body: &[u8], key: &str, default: &str) -> String {
    decode(body, key).unwrap_or_else(|| default.to_string())
}

/// Decode and parse as `f64`. Absent, unparseable and NaN all give `None`.
pub fn decode_f64(body: &[u8], key: &str) -> Option<f64> {
    decode(body, key)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
}

fn find_raw<'a>(body: &'a [u8], key: &[u8]) -> Option<&'a [u8]> {
    if key.is_empty() {
        return None;
    }
    let mut start = 0;
    while start <= body.len() {
        let rest = &body[start..];
        let end = rest.iter().position(|&b| b == b'&').unwrap_or(rest.len());
        let pair = &rest[..end];
        if let Some(value) = pair.strip_prefix(key) {
            return Some(value);
        }
        start += end + 1;
    }
    None
}

fn unescape(raw: &[u8]) -> String {
    let plus_as_space: Cow<'_, [u8]> = if raw.contains(&b'+') {
        Cow::Owned(raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect())
    } else {
        Cow::Borrowed(raw)
    };
    let bytes = urlencoding::decode_binary(&plus_as_space);
    String::from_utf8_lossy(&bytes).into_owned()
}
