//! Ordinal levels
//!
//! Every axis of the model is a small closed ordinal scale. Each one is an
//! enum so that out-of-range values are rejected once, at the boundary
//! (`TryFrom<u8>` and deserialization), and never reach the geometry code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

macro_rules! ordinal_level {
    (
        $(#[$meta:meta])*
        $name:ident, prefix = $prefix:literal, error = $err:ident,
        [$($variant:ident = $value:literal),+ $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $(
                #[allow(missing_docs)]
                $variant = $value,
            )+
        }

        impl $name {
            /// All levels, ascending
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Lowest level
            pub const MIN: $name = Self::ALL[0];

            /// Highest level
            pub const MAX: $name = Self::ALL[Self::ALL.len() - 1];

            /// Numeric value (1-based)
            #[inline]
            #[must_use]
            pub const fn as_u8(self) -> u8 {
                self as u8
            }

            /// Zero-based index into per-level tables
            #[inline]
            #[must_use]
            pub const fn index(self) -> usize {
                self as usize - 1
            }

            /// Parse a numeric level
            ///
            /// # Errors
            #[doc = concat!("Returns [`GovernanceError::", stringify!($err), "`] outside the scale.")]
            pub fn new(value: u8) -> Result<Self, GovernanceError> {
                match value {
                    $($value => Ok($name::$variant),)+
                    other => Err(GovernanceError::$err(other)),
                }
            }

            /// Next level up, if any
            #[inline]
            #[must_use]
            pub fn next(self) -> Option<Self> {
                Self::ALL.get(self.index() + 1).copied()
            }

            /// Next level down, if any
            #[inline]
            #[must_use]
            pub fn prev(self) -> Option<Self> {
                self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
            }
        }

        impl TryFrom<u8> for $name {
            type Error = GovernanceError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u8 {
            fn from(level: $name) -> u8 {
                level.as_u8()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.as_u8())
            }
        }
    };
}

ordinal_level! {
    /// Blast radius: how severe and hard to reverse a mistake is
    ImpactLevel, prefix = "B", error = InvalidImpact,
    [B1 = 1, B2 = 2, B3 = 3, B4 = 4, B5 = 5]
}

ordinal_level! {
    /// Autonomy: how much human oversight is removed from the loop
    AutonomyLevel, prefix = "A", error = InvalidAutonomy,
    [A1 = 1, A2 = 2, A3 = 3, A4 = 4, A5 = 5]
}

ordinal_level! {
    /// Infrastructure control tier gating autonomy
    InfraLevel, prefix = "I", error = InvalidInfraLevel,
    [I1 = 1, I2 = 2, I3 = 3, I4 = 4, I5 = 5]
}

ordinal_level! {
    /// Business value; only drives dot size
    BizValue, prefix = "V", error = InvalidBizValue,
    [V1 = 1, V2 = 2, V3 = 3, V4 = 4]
}

impl Default for BizValue {
    fn default() -> Self {
        Self::V1
    }
}

impl From<InfraLevel> for AutonomyLevel {
    /// Infra tier `n` is the control set that unlocks autonomy `n`.
    fn from(level: InfraLevel) -> Self {
        AutonomyLevel::ALL[level.index()]
    }
}
