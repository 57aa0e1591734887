//! Synchronization mode
//!
//! Two independent gates decide what flows: `mapping_enabled` turns
//! source-to-log reveals on, `bidirectional_enabled` additionally turns
//! log-to-source navigation on.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Operating mode of the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Selection events are ignored.
    #[default]
    Off,
    /// Only source-to-log: moving in a source file reveals the log.
    Single,
    /// Source-to-log plus log-to-source.
    Bidirectional,
}

impl Mode {
    pub fn from_gates(mapping_enabled: bool, bidirectional_enabled: bool) -> Self {
        match (mapping_enabled, bidirectional_enabled) {
            (false, _) => Mode::Off,
            (true, false) => Mode::Single,
            (true, true) => Mode::Bidirectional,
        }
    }

    pub fn mapping_enabled(&self) -> bool {
        !matches!(self, Mode::Off)
    }

    pub fn bidirectional_enabled(&self) -> bool {
        matches!(self, Mode::Bidirectional)
    }

    /// Next mode for the toggle command: Off goes to Single, then Single and
    /// Bidirectional alternate.
    pub fn toggled(&self) -> Self {
        match self {
            Mode::Off | Mode::Bidirectional => Mode::Single,
            Mode::Single => Mode::Bidirectional,
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "disabled" => Ok(Mode::Off),
            "single" => Ok(Mode::Single),
            "bidirectional" | "bidi" => Ok(Mode::Bidirectional),
            _ => Err(Error::configuration(format!("unknown mode: {s}"))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Off => write!(f, "off"),
            Mode::Single => write!(f, "single"),
            Mode::Bidirectional => write!(f, "bidirectional"),
        }
    }
}
