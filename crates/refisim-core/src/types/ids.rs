//! Simulation identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

/// Identifier of a single simulation run, formatted `SIM-XXXXXXXX`.
///
/// The suffix is eight upper-case alphanumerics. Generated identifiers take
/// them from a random v4 UUID, so no financial figure depends on them.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationId(String);

impl SimulationId {
    /// Prefix shared by every simulation id.
    pub const PREFIX: &'static str = "SIM-";

    /// Number of characters after the prefix.
    pub const SUFFIX_LEN: usize = 8;

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        let simple = Uuid::new_v4().simple().to_string().to_ascii_uppercase();
        Self(format!("{}{}", Self::PREFIX, &simple[..Self::SUFFIX_LEN]))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(value: &str) -> bool {
        value.strip_prefix(Self::PREFIX).is_some_and(|suffix| {
            suffix.len() == Self::SUFFIX_LEN
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        })
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SimulationId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::invalid_simulation_id(s))
        }
    }
}
