//! Typed access to path parameters and query values
//!
//! `get` returns an optional value; `require` turns absence into the
//! matching bad-request error so handlers decide at the call site.

use crate::error::HandlerError;

/// Parameters bound by the matched route pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: Vec<(String, String)>,
}

impl PathParams {
    pub(crate) fn insert(&mut self, name: &str, value: &str) {
        self.values.push((name.to_string(), value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn require(&self, name: &str) -> Result<&str, HandlerError> {
        self.get(name)
            .ok_or_else(|| HandlerError::MissingParameter(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decoded query string; the first occurrence of a key wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let values = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn require(&self, key: &str) -> Result<&str, HandlerError> {
        self.get(key)
            .ok_or_else(|| HandlerError::MissingQuery(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params() {
        let mut params = PathParams::default();
        assert!(params.is_empty());
        params.insert("region", "thai");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("region"), Some("thai"));
        assert_eq!(params.get("location"), None);
        assert!(matches!(
            params.require("location"),
            Err(HandlerError::MissingParameter(name)) if name == "location"
        ));
    }

    #[test]
    fn test_query_params() {
        let query = QueryParams::parse(Some("keyword=deep+dish&page=2&page=3"));
        assert_eq!(query.get("keyword"), Some("deep dish"));
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.require("page").unwrap(), "2");
        assert!(matches!(
            query.require("sort"),
            Err(HandlerError::MissingQuery(key)) if key == "sort"
        ));
    }

    #[test]
    fn test_query_decoding_and_empty() {
        let query = QueryParams::parse(Some("path=my%20photo.jpg&flag"));
        assert_eq!(query.get("path"), Some("my photo.jpg"));
        assert_eq!(query.get("flag"), Some(""));
        assert_eq!(QueryParams::parse(None), QueryParams::default());
    }
}
