//! Errors for loading runtime settings
//!
//! The simulation itself cannot fail; only reading a settings file can.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    Io(io::Error),
    /// Settings file is not valid JSON for [`crate::Settings`]
    Parse(serde_json::Error),
    /// A value parsed but is outside its allowed range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read settings: {err}"),
            Self::Parse(err) => write!(f, "could not parse settings: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
