//! Navigation URL parsing.

use std::fmt;

/// A navigation target split into path segments, query and fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationUrl {
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
}

impl NavigationUrl {
    /// Parse a URL such as `/feature-one/inner?tab=2#top`.
    ///
    /// Leading, trailing and repeated slashes are ignored.
    pub fn parse(url: &str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (url, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (rest, Vec::new()),
        };

        Self {
            segments: split_path(path),
            query,
            fragment,
        }
    }

    /// Same query and fragment, different path.
    pub fn with_segments(&self, segments: Vec<String>) -> Self {
        Self {
            segments,
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        }
    }

    /// Path part only, without a leading slash.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for NavigationUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            if value.is_empty() {
                write!(f, "{}{}", sep, key)?;
            } else {
                write!(f, "{}{}={}", sep, key, value)?;
            }
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

pub(crate) fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}
