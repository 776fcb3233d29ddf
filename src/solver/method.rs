use std::{fmt, str::FromStr};

use thiserror::Error;

/// Finite-difference time-stepping scheme.
///
/// The set is closed. Variants are declared in tie-break priority order:
/// when two schemes score equally, the later one wins, so `Ord` compares
/// by that priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    /// Explicit forward-time, centered-space.
    Forward,
    /// Implicit backward-difference.
    Backward,
    /// Explicit three-level DuFort–Frankel.
    DufortFrankel,
    /// Implicit trapezoidal Crank–Nicolson.
    CrankNicolson,
}

/// Returned when parsing an unrecognized scheme name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method: {0:?}")]
pub struct UnknownMethod(pub String);

impl Method {
    /// All schemes, in priority order.
    pub const ALL: [Method; 4] = [
        Method::Forward,
        Method::Backward,
        Method::DufortFrankel,
        Method::CrankNicolson,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::DufortFrankel => "dufort-frankel",
            Self::CrankNicolson => "crank-nicolson",
        }
    }

    /// Position of this scheme in [`Method::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "backward" | "backward-difference" => Ok(Self::Backward),
            "dufort-frankel" | "dufort_frankel" => Ok(Self::DufortFrankel),
            "crank-nicolson" | "crank_nicolson" => Ok(Self::CrankNicolson),
            _ => Err(UnknownMethod(s.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
