//! Endpoint path templating.
//!
//! A method path such as `:network/fungible/issue` is turned into the final
//! request path in three steps:
//!
//! 1. every `:name` token whose whole name matches a url parameter is replaced
//!    with the encoded value (a token is `:` followed by `[A-Za-z0-9_]+`, so
//!    `:network` never matches inside `:networkId`);
//! 2. query pairs are appended as `?k=v&...` in insertion order;
//! 3. runs of two or more `/` are collapsed into one.
//!
//! Tokens with no matching parameter are passed through untouched.

use std::fmt::Display;

/// URL and query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    url: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value substituted for the `:name` token.
    pub fn url(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.url.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.url.push((name, value)),
        }
        self
    }

    /// Append a query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query pair only when `value` is present.
    pub fn query_opt<V: Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    fn url_value(&self, name: &str) -> Option<&str> {
        self.url
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Format `template` with `params`, returning the path relative to the API root.
pub fn format_method_path(template: &str, params: &Params) -> String {
    let mut path = substitute_tokens(template, params);

    if !params.query.is_empty() {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.query.iter())
            .finish();
        path.push('?');
        path.push_str(&query);
    }

    collapse_slashes(&path)
}

fn substitute_tokens(template: &str, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(colon) = rest.find(':') {
        out.push_str(&rest[..colon]);
        let after = &rest[colon + 1..];
        let name_len = after
            .find(|c: char| !is_word_char(c))
            .unwrap_or(after.len());
        let name = &after[..name_len];

        match params.url_value(name) {
            Some(value) if !name.is_empty() => out.push_str(&encode_uri(value)),
            _ => {
                out.push(':');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' && prev_slash {
            continue;
        }
        prev_slash = c == '/';
        out.push(c);
    }
    out
}

/// Percent-encode everything except the unreserved and reserved URI characters.
fn encode_uri(value: &str) -> String {
    const KEEP: &[u8] = b"-_.!~*'();/?:@&=+$,#";

    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || KEEP.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
