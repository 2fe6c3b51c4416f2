//! On/off settings that accept the spellings operators use in files and the
//! environment.
//!
//! A plain `bool` field becomes a clap `SetTrue` flag whose absent value still
//! reaches the merge as `false`, masking the environment and file layers.
//! [`Switch`] takes a value instead, so an unset flag stays absent.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A boolean setting parsed from `true`/`false`, `1`/`0`, `yes`/`no` or
/// `on`/`off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch(bool);

impl Switch {
    /// Switched on.
    pub const ON: Self = Self(true);
    /// Switched off.
    pub const OFF: Self = Self(false);

    /// Whether the switch is on.
    #[must_use]
    pub const fn is_on(self) -> bool {
        self.0
    }
}

/// Raised when text does not name an on/off state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected true/false, 1/0, yes/no or on/off, got '{0}'")]
pub struct SwitchParseError(String);

impl FromStr for Switch {
    type Err = SwitchParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Self::ON),
            "false" | "0" | "no" | "off" => Ok(Self::OFF),
            _ => Err(SwitchParseError(input.to_owned())),
        }
    }
}

impl Serialize for Switch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

struct SwitchVisitor;

impl Visitor<'_> for SwitchVisitor {
    type Value = Switch;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a boolean, 0 or 1, or an on/off string")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Switch, E> {
        Ok(Switch(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Switch, E> {
        match value {
            0 => Ok(Switch::OFF),
            1 => Ok(Switch::ON),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Switch, E> {
        match value {
            0 => Ok(Switch::OFF),
            1 => Ok(Switch::ON),
            other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Switch, E> {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

impl<'de> Deserialize<'de> for Switch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SwitchVisitor)
    }
}
