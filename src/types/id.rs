// ABOUTME: Phantom-typed identifiers for daemon-side resources.
// ABOUTME: Keeps container ids, image ids, and volume names from being swapped.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types. Empty enums cannot be instantiated.
pub enum ContainerMarker {}
pub enum ImageMarker {}
pub enum VolumeMarker {}

/// An opaque identifier assigned or accepted by the daemon.
///
/// The marker parameter makes a `ContainerId` and an `ImageId` distinct types
/// even though both are strings on the wire.
///
/// ```compile_fail,E0308
/// use berth::types::{ContainerId, VolumeName};
///
/// let volume = VolumeName::new("data");
/// let _container: ContainerId = volume;
/// ```
#[must_use = "ids reference daemon-side resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

/// Length of the abbreviated form the Docker CLI prints.
const SHORT_LEN: usize = 12;

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// First twelve characters, with any `sha256:` prefix dropped.
    pub fn short(&self) -> &str {
        let bare = self.value.strip_prefix("sha256:").unwrap_or(&self.value);
        match bare.char_indices().nth(SHORT_LEN) {
            Some((idx, _)) => &bare[..idx],
            None => bare,
        }
    }
}

// Implemented by hand so that `T` needs none of these traits.

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

pub type ContainerId = Id<ContainerMarker>;
pub type ImageId = Id<ImageMarker>;
pub type VolumeName = Id<VolumeMarker>;
