//! Route path matching logic.
//!
//! # Responsibilities
//! - Parse a route path into literal, parameter and wildcard segments
//! - Match a pattern against the leading remaining URL segments
//! - Capture `:name` parameters
//!
//! # Design Decisions
//! - Literal matching is case-sensitive
//! - Empty pattern = matches without consuming (index routes)
//! - `**` consumes every remaining segment, including none
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;

/// One segment of a route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    Literal(String),
    Param(String),
    Wildcard,
}

/// Result of matching a pattern against URL segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatch {
    /// Number of URL segments consumed.
    pub consumed: usize,
    /// Captured parameters.
    pub params: BTreeMap<String, String>,
}

/// A compiled route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<PatternSegment>,
}

impl PathPattern {
    /// Parse a path leniently. Segments after `**` are ignored.
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        for raw in path.split('/').filter(|s| !s.is_empty()) {
            let segment = match raw {
                "**" => PatternSegment::Wildcard,
                _ => match raw.strip_prefix(':') {
                    Some(name) => PatternSegment::Param(name.to_string()),
                    None => PatternSegment::Literal(raw.to_string()),
                },
            };
            let done = segment == PatternSegment::Wildcard;
            segments.push(segment);
            if done {
                break;
            }
        }
        Self {
            source: path.to_string(),
            segments,
        }
    }

    /// Parse a path, rejecting a misplaced wildcard or an unnamed parameter.
    pub fn try_parse(path: &str) -> Result<Self, String> {
        let raw: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if let Some(pos) = raw.iter().position(|s| *s == "**") {
            if pos + 1 != raw.len() {
                return Err("'**' must be the last path segment".to_string());
            }
        }
        if raw.iter().any(|s| *s == ":") {
            return Err("parameter segment has no name".to_string());
        }
        Ok(Self::parse(path))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// True for the empty (index) pattern.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Match against the leading URL segments.
    pub fn match_segments(&self, url: &[String]) -> Option<PatternMatch> {
        let mut result = PatternMatch::default();
        for segment in &self.segments {
            match segment {
                PatternSegment::Wildcard => {
                    result.consumed = url.len();
                    return Some(result);
                }
                PatternSegment::Literal(expected) => {
                    if url.get(result.consumed)? != expected {
                        return None;
                    }
                }
                PatternSegment::Param(name) => {
                    let value = url.get(result.consumed)?;
                    result.params.insert(name.clone(), value.clone());
                }
            }
            result.consumed += 1;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        path.split('/').filter(|s| !s.is_empty()).map(String::from).collect()
    }

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("feature-one");
        let m = pattern.match_segments(&segs("feature-one/inner")).unwrap();
        assert_eq!(m.consumed, 1);
        assert!(pattern.match_segments(&segs("feature-two")).is_none());
        assert!(pattern.match_segments(&segs("FEATURE-ONE")).is_none()); // Case sensitive
        assert!(pattern.match_segments(&[]).is_none());
    }

    #[test]
    fn test_multi_segment_and_params() {
        let pattern = PathPattern::parse("users/:id/posts/:post");
        let m = pattern.match_segments(&segs("users/42/posts/7/edit")).unwrap();
        assert_eq!(m.consumed, 4);
        assert_eq!(m.params["id"], "42");
        assert_eq!(m.params["post"], "7");

        assert!(pattern.match_segments(&segs("users/42")).is_none());
    }

    #[test]
    fn test_empty_and_wildcard() {
        let index = PathPattern::parse("");
        assert!(index.is_empty());
        assert_eq!(index.match_segments(&segs("anything")).unwrap().consumed, 0);

        let wildcard = PathPattern::parse("**");
        assert_eq!(wildcard.match_segments(&segs("a/b/c")).unwrap().consumed, 3);
        assert_eq!(wildcard.match_segments(&[]).unwrap().consumed, 0);

        let docs = PathPattern::parse("docs/**");
        assert_eq!(docs.match_segments(&segs("docs/a/b")).unwrap().consumed, 3);
    }

    #[test]
    fn test_try_parse() {
        assert!(PathPattern::try_parse("a/**").is_ok());
        assert!(PathPattern::try_parse("**/a").is_err());
        assert!(PathPattern::try_parse("a/:").is_err());
    }
}
