// ABOUTME: Image reference as written by users: [registry/]repository[:tag][@digest].
// ABOUTME: Validates locally so malformed names never reach the daemon.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageNameError {
    #[error("image name cannot be empty")]
    Empty,

    #[error("invalid character in image name: {0:?}")]
    InvalidChar(char),

    #[error("image name has an empty {0}")]
    EmptyComponent(&'static str),
}

/// A validated image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageName {
    repository: String,
    tag: Option<String>,
    digest: Option<String>,
}

const DEFAULT_TAG: &str = "latest";

fn allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '-' | '_' | '@')
}

impl ImageName {
    pub fn parse(input: &str) -> Result<Self, ImageNameError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ImageNameError::Empty);
        }
        if let Some(bad) = input.chars().find(|c| !allowed(*c)) {
            return Err(ImageNameError::InvalidChar(bad));
        }

        let (named, digest) = match input.split_once('@') {
            Some((_, "")) => return Err(ImageNameError::EmptyComponent("digest")),
            Some((named, digest)) => (named, Some(digest.to_string())),
            None => (input, None),
        };

        // A colon followed by a slash belongs to a registry port, not a tag.
        let (repository, tag) = match named.rsplit_once(':') {
            Some((_, tag)) if tag.contains('/') => (named, None),
            Some((_, "")) => return Err(ImageNameError::EmptyComponent("tag")),
            Some((repo, tag)) => (repo, Some(tag.to_string())),
            None => (named, None),
        };

        if repository.is_empty() || repository.split('/').any(str::is_empty) {
            return Err(ImageNameError::EmptyComponent("repository"));
        }

        Ok(Self {
            repository: repository.to_string(),
            tag,
            digest,
        })
    }

    /// Repository path including any registry host.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Registry host, when the first path component names one.
    pub fn registry(&self) -> Option<&str> {
        let (first, _) = self.repository.split_once('/')?;
        (first.contains('.') || first.contains(':') || first == "localhost").then_some(first)
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Reference sent to the daemon. Untagged, undigested names resolve to `latest`.
    pub fn reference(&self) -> String {
        match (&self.tag, &self.digest) {
            (None, None) => format!("{}:{}", self.repository, DEFAULT_TAG),
            _ => self.to_string(),
        }
    }
}

impl FromStr for ImageName {
    type Err = ImageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repository)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}
