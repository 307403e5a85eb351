//! Route pattern parsing and segment matching
//!
//! A pattern is a `/`-separated list of segments:
//! - `name` matches the literal text exactly
//! - `:name` matches one non-empty segment and binds it to `name`
//! - `*` matches exactly one segment and discards it
//! - `**` matches zero or more trailing segments; only valid last

use std::borrow::Cow;
use std::str::Utf8Error;

use super::params::PathParams;
use crate::error::ConfigError;

/// One parsed pattern segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
    Rest,
}

/// Per-segment rank used to order competing matches.
///
/// Declaration order is significant: later variants win. `End` marks the end
/// of a fixed-length pattern so that `/a` beats `/a/**` on the path `/a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
    Rest,
    Wildcard,
    Param,
    Literal,
    End,
}

impl Segment {
    const fn specificity(&self) -> Specificity {
        match self {
            Self::Literal(_) => Specificity::Literal,
            Self::Param(_) => Specificity::Param,
            Self::Wildcard => Specificity::Wildcard,
            Self::Rest => Specificity::Rest,
        }
    }

    /// Same matching behaviour, ignoring parameter names
    fn same_kind(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Param(_), Self::Param(_))
            | (Self::Wildcard, Self::Wildcard)
            | (Self::Rest, Self::Rest) => true,
            _ => false,
        }
    }
}

/// Parsed, immutable route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        let parts = split_path(raw);
        let mut segments = Vec::with_capacity(parts.len());

        for (index, part) in parts.iter().enumerate() {
            let segment = match *part {
                "" => return Err(invalid("empty segment")),
                "**" => {
                    if index + 1 != parts.len() {
                        return Err(ConfigError::MisplacedRestWildcard(raw.to_string()));
                    }
                    Segment::Rest
                }
                "*" => Segment::Wildcard,
                p => match p.strip_prefix(':') {
                    Some("") => return Err(invalid("parameter without a name")),
                    Some(name) => {
                        let taken = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(n) if n == name));
                        if taken {
                            return Err(invalid(&format!("parameter `{name}` appears twice")));
                        }
                        Segment::Param(name.to_string())
                    }
                    None => Segment::Literal(p.to_string()),
                },
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Ranking key; a greater key is a more specific match
    pub fn specificity(&self) -> Vec<Specificity> {
        let mut key: Vec<Specificity> = self.segments.iter().map(Segment::specificity).collect();
        if !matches!(self.segments.last(), Some(Segment::Rest)) {
            key.push(Specificity::End);
        }
        key
    }

    /// True when both patterns accept exactly the same paths
    pub fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a.same_kind(b))
    }

    /// Match already split and decoded path segments, binding parameters
    pub fn matches(&self, path: &[Cow<'_, str>]) -> Option<PathParams> {
        let mut params = PathParams::default();

        for (index, segment) in self.segments.iter().enumerate() {
            if *segment == Segment::Rest {
                return Some(params);
            }
            let input = path.get(index)?;
            match segment {
                Segment::Literal(text) => {
                    if text.as_str() != input.as_ref() {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if input.is_empty() {
                        return None;
                    }
                    params.insert(name, input);
                }
                Segment::Wildcard | Segment::Rest => {}
            }
        }

        (path.len() == self.segments.len()).then_some(params)
    }
}

/// Split a path on `/`, dropping one leading and one trailing delimiter
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// Split and percent-decode request path segments
///
/// Fails when a segment decodes to bytes that are not UTF-8; such a value
/// cannot be bound to a parameter unchanged.
pub fn decode_path(path: &str) -> Result<Vec<Cow<'_, str>>, Utf8Error> {
    split_path(path)
        .into_iter()
        .map(|segment| percent_encoding::percent_decode_str(segment).decode_utf8())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> RoutePattern {
        RoutePattern::parse(raw).unwrap()
    }

    #[test]
    fn test_split_path() {
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
        assert_eq!(split_path("/a/b"), vec!["a", "b"]);
        assert_eq!(split_path("/a/b/"), vec!["a", "b"]);
        assert_eq!(split_path("//a"), vec!["", "a"]);
    }

    #[test]
    fn test_parse_segments() {
        let p = pattern("/restaurants/:location/*/**");
        assert_eq!(
            p.segments(),
            &[
                Segment::Literal("restaurants".into()),
                Segment::Param("location".into()),
                Segment::Wildcard,
                Segment::Rest,
            ]
        );
        assert_eq!(p.as_str(), "/restaurants/:location/*/**");
        assert!(pattern("/").segments().is_empty());
    }

    #[test]
    fn test_rest_must_be_last() {
        assert!(matches!(
            RoutePattern::parse("/routeany/**/endpoint"),
            Err(ConfigError::MisplacedRestWildcard(_))
        ));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            RoutePattern::parse("/hello/:"),
            Err(ConfigError::InvalidPattern { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("/a//b"),
            Err(ConfigError::InvalidPattern { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("/:id/x/:id"),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_match_binds_params() {
        let p = pattern("/restaurants/:location/speciality/:region");
        let path = decode_path("/restaurants/paris/speciality/thai").unwrap();
        let params = p.matches(&path).unwrap();
        assert_eq!(params.get("location"), Some("paris"));
        assert_eq!(params.get("region"), Some("thai"));
        assert!(p.matches(&decode_path("/restaurants/paris/speciality").unwrap()).is_none());
    }

    #[test]
    fn test_match_decodes_segments() {
        let p = pattern("/hello/:name");
        let params = p.matches(&decode_path("/hello/Jane%20Doe").unwrap()).unwrap();
        assert_eq!(params.get("name"), Some("Jane Doe"));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(decode_path("/restaurants/speciality/%FF").is_err());
        assert!(decode_path("/restaurants/speciality/%C3%A9").is_ok());
    }

    #[test]
    fn test_rest_absorbs_zero_or_more() {
        let p = pattern("/routeany/**");
        assert!(p.matches(&decode_path("/routeany").unwrap()).is_some());
        assert!(p.matches(&decode_path("/routeany/a").unwrap()).is_some());
        assert!(p.matches(&decode_path("/routeany/a/b/c").unwrap()).is_some());
        assert!(p.matches(&decode_path("/other/a").unwrap()).is_none());
    }

    #[test]
    fn test_wildcard_consumes_exactly_one() {
        let p = pattern("/routeany/*");
        assert!(p.matches(&decode_path("/routeany/a").unwrap()).is_some());
        assert!(p.matches(&decode_path("/routeany").unwrap()).is_none());
        assert!(p.matches(&decode_path("/routeany/a/b").unwrap()).is_none());
    }

    #[test]
    fn test_specificity_order() {
        let literal = pattern("/restaurants/speciality/chinese").specificity();
        let param = pattern("/restaurants/speciality/:region").specificity();
        assert!(literal > param);

        let single = pattern("/routeany/*").specificity();
        let rest = pattern("/routeany/**").specificity();
        assert!(single > rest);

        let root = pattern("/").specificity();
        let catch_all = pattern("/**").specificity();
        assert!(root > catch_all);
    }

    #[test]
    fn test_same_shape_ignores_param_names() {
        assert!(pattern("/hello/:name").same_shape(&pattern("/hello/:who")));
        assert!(!pattern("/hello/:name").same_shape(&pattern("/hello/*")));
        assert!(!pattern("/a/b").same_shape(&pattern("/a/c")));
    }
}
