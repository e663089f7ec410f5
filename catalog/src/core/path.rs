//! Group paths: the topic → subtopic nesting of a demonstration.

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Ordered group segments, rendered as `a/b/c`. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct GroupPath(Vec<String>);

impl GroupPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from raw segments. Segments are checked at registration.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// True if `prefix` names this group or one of its ancestors.
    pub fn starts_with(&self, prefix: &GroupPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for GroupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl FromStr for GroupPath {
    type Err = anyhow::Error;

    /// Parse `a/b/c`; surrounding slashes are ignored, empty input is the root.
    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            let segment = segment.trim();
            if segment.is_empty() {
                bail!("group path {input:?} has an empty segment");
            }
            segments.push(segment.to_string());
        }
        Ok(Self(segments))
    }
}

impl From<GroupPath> for String {
    fn from(path: GroupPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for GroupPath {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for GroupPath {
    fn from(segments: [S; N]) -> Self {
        Self::new(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_and_parses_slash_separated() {
        let path = GroupPath::from(["strings", "repeat"]);
        assert_eq!(path.to_string(), "strings/repeat");
        assert_eq!("strings/repeat".parse::<GroupPath>().expect("parse"), path);
        assert_eq!("/strings/repeat/".parse::<GroupPath>().expect("parse"), path);
    }

    #[test]
    fn empty_input_is_root() {
        let path: GroupPath = "".parse().expect("parse");
        assert!(path.is_root());
    }

    #[test]
    fn rejects_empty_segments() {
        let err = "a//b".parse::<GroupPath>().expect_err("empty segment");
        assert!(err.to_string().contains("empty segment"));
    }

    #[test]
    fn prefix_matching_is_segment_wise() {
        let path = GroupPath::from(["strings", "repeat", "throws"]);
        assert!(path.starts_with(&GroupPath::root()));
        assert!(path.starts_with(&GroupPath::from(["strings"])));
        assert!(path.starts_with(&path));
        assert!(!path.starts_with(&GroupPath::from(["str"])));
        assert!(!GroupPath::from(["strings"]).starts_with(&path));
    }
}
