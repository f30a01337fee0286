//! Declarative endpoint descriptions and parameter binding.
//!
//! Every endpoint group exports a static table of [`Endpoint`] values. The
//! dispatcher turns an endpoint plus a serialisable parameter struct into an
//! [`HttpRequest`](crate::HttpRequest): `{name}` placeholders in the path are
//! filled first, whatever is left goes to the query string or the JSON body
//! depending on the method.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::http::HttpMethod;

/// One remote operation: its name, HTTP verb and path template relative to
/// the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn get(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Get,
            path,
        }
    }

    pub const fn post(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Post,
            path,
        }
    }

    /// Fill the path template from `params`, returning the concrete path and
    /// the parameters that were not consumed by it.
    pub fn bind(&self, mut params: Map<String, Value>) -> Result<(String, Map<String, Value>)> {
        let mut path = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(open) = rest.find('{') {
            let close = rest[open..].find('}').map(|i| open + i).ok_or_else(|| {
                Error::Config(format!("unterminated placeholder in path {:?}", self.path))
            })?;
            path.push_str(&rest[..open]);
            let key = &rest[open + 1..close];
            let value = params
                .remove(key)
                .filter(|v| !v.is_null())
                .ok_or_else(|| {
                    Error::Serialization(format!("{}: missing path parameter `{key}`", self.name))
                })?;
            path.push_str(&urlencoding::encode(&scalar(self.name, key, &value)?));
            rest = &rest[close + 1..];
        }
        path.push_str(rest);
        Ok((path, params))
    }
}

/// Serialise a parameter struct into a flat JSON object, dropping nulls.
///
/// `()` and `None` produce an empty map so parameterless endpoints can share
/// the same code path.
pub fn to_params<P: Serialize + ?Sized>(endpoint: &Endpoint, params: &P) -> Result<Map<String, Value>> {
    let value = serde_json::to_value(params)
        .map_err(|e| Error::Serialization(format!("{}: {e}", endpoint.name)))?;
    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => Err(Error::Serialization(format!(
            "{}: parameters must serialize to an object, got {other}",
            endpoint.name
        ))),
    }
}

/// Encode `params` as `k=v&k=v`, keys in map order.
pub fn encode_query(endpoint: &Endpoint, params: &Map<String, Value>) -> Result<String> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        let value = scalar(endpoint.name, key, value)?;
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(&value)
        ));
    }
    Ok(pairs.join("&"))
}

fn scalar(endpoint: &str, key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::Serialization(format!(
            "{endpoint}: parameter `{key}` is not a scalar"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn bind_without_placeholders_keeps_every_param() {
        let ep = Endpoint::get("list", "list_movies.json");
        let (path, rest) = ep.bind(map(json!({"limit": 20}))).unwrap();
        assert_eq!(path, "list_movies.json");
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn bind_fills_and_consumes_placeholders() {
        let ep = Endpoint::get("details", "movies/{movie_id}/details.json");
        let (path, rest) = ep
            .bind(map(json!({"movie_id": 15, "with_images": true})))
            .unwrap();
        assert_eq!(path, "movies/15/details.json");
        assert!(rest.get("movie_id").is_none());
        assert_eq!(rest["with_images"], true);
    }

    #[test]
    fn bind_encodes_placeholder_values() {
        let ep = Endpoint::get("search", "search/{term}");
        let (path, _) = ep.bind(map(json!({"term": "a b/c"}))).unwrap();
        assert_eq!(path, "search/a%20b%2Fc");
    }

    #[test]
    fn bind_reports_missing_placeholder() {
        let ep = Endpoint::get("details", "movies/{movie_id}");
        let err = ep.bind(Map::new()).unwrap_err();
        assert!(matches!(err, Error::Serialization(msg) if msg.contains("movie_id")));
    }

    #[test]
    fn to_params_drops_nulls() {
        let ep = Endpoint::get("list", "list_movies.json");
        let params = to_params(&ep, &json!({"limit": 1, "genre": null})).unwrap();
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn to_params_accepts_unit() {
        let ep = Endpoint::get("upcoming", "list_upcoming.json");
        assert!(to_params(&ep, &()).unwrap().is_empty());
    }

    #[test]
    fn to_params_rejects_non_objects() {
        let ep = Endpoint::get("list", "list_movies.json");
        assert!(matches!(to_params(&ep, &42), Err(Error::Serialization(_))));
    }

    #[test]
    fn encode_query_escapes_values() {
        let ep = Endpoint::get("list", "list_movies.json");
        let query = encode_query(&ep, &map(json!({"query_term": "the matrix & co"}))).unwrap();
        assert_eq!(query, "query_term=the%20matrix%20%26%20co");
    }

    #[test]
    fn encode_query_rejects_nested_values() {
        let ep = Endpoint::get("list", "list_movies.json");
        let err = encode_query(&ep, &map(json!({"genres": ["a", "b"]}))).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
