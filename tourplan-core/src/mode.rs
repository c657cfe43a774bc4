//! Transport modes available on each leg of a tour.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A transport mode the cost matrix holds data for.
///
/// `Fast` is the quickest and costliest mode (a taxi in practice). `Bus` and
/// `Walk` are the cheaper alternatives a leg may be downgraded to.
///
/// # Examples
///
/// ```
/// use tourplan_core::TransportMode;
///
/// let mode: TransportMode = "bus".parse().expect("known mode");
/// assert_eq!(mode, TransportMode::Bus);
/// assert_eq!(TransportMode::Walk.as_str(), "walk");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// Fastest, costliest mode.
    Fast,
    /// Public transport.
    Bus,
    /// On foot; always free.
    Walk,
}

impl TransportMode {
    /// All modes in the order the cost matrix is queried.
    pub const ALL: [Self; 3] = [Self::Fast, Self::Bus, Self::Walk];

    /// Stable lowercase name used in storage and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Bus => "bus",
            Self::Walk => "walk",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TransportMode`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transport mode {0:?} (expected fast, bus or walk)")]
pub struct ParseTransportModeError(pub String);

impl FromStr for TransportMode {
    type Err = ParseTransportModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(Self::Fast),
            "bus" => Ok(Self::Bus),
            "walk" => Ok(Self::Walk),
            other => Err(ParseTransportModeError(other.to_owned())),
        }
    }
}

/// The cheaper mode a leg falls back to when the budget is tight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AltMode {
    /// Public transport.
    Bus,
    /// On foot.
    Walk,
}

impl From<AltMode> for TransportMode {
    fn from(mode: AltMode) -> Self {
        match mode {
            AltMode::Bus => Self::Bus,
            AltMode::Walk => Self::Walk,
        }
    }
}

/// Which of a leg's two options is currently in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActiveMode {
    /// The fast mode; every leg starts here.
    #[default]
    Fast,
    /// The leg's chosen alternative mode.
    Alt,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn names_parse_back() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.as_str().parse::<TransportMode>(), Ok(mode));
        }
    }

    #[rstest]
    fn rejects_unknown_names() {
        let err = "taxi"
            .parse::<TransportMode>()
            .expect_err("taxi is not a stored mode");
        assert_eq!(err, ParseTransportModeError("taxi".to_owned()));
    }

    #[rstest]
    fn alternatives_map_to_transport_modes() {
        assert_eq!(TransportMode::from(AltMode::Bus), TransportMode::Bus);
        assert_eq!(TransportMode::from(AltMode::Walk), TransportMode::Walk);
    }
}
