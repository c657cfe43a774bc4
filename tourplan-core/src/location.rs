//! Opaque identifiers for places on a tour.

use std::{borrow::Borrow, fmt};

/// Name of a stop or origin as stored in the cost matrix.
///
/// The identifier is compared byte-for-byte; no normalisation is applied.
///
/// # Examples
///
/// ```
/// use tourplan_core::LocationId;
///
/// let hotel = LocationId::from("Marina Bay Sands");
/// assert_eq!(hotel.as_str(), "Marina Bay Sands");
/// assert_eq!(hotel.to_string(), "Marina Bay Sands");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LocationId(String);

impl LocationId {
    /// Wrap a place name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the place name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LocationId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for LocationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
