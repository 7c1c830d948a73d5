//! Four-valued logic scalar used at UDP ports.
//!
//! Unlike [`aion_common::Logic`](https://docs.rs/aion_common), this value
//! carries no arithmetic (`&`, `|`, `^`, `!`): UDP evaluation never computes
//! a logic function over `LogicValue` directly, it only looks rows up in a
//! table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 4-state logic value at a UDP port or output.
///
/// `Z` (high-impedance) only ever appears as an *input* value; for matching
/// purposes it is folded into `X` (see [`LogicValue::fold_z`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LogicValue {
    /// Logic low.
    V0,
    /// Logic high.
    V1,
    /// Unknown.
    Vx,
    /// High-impedance.
    Vz,
}

impl LogicValue {
    /// Parses the four-character rule-row alphabet: `0`, `1`, `x`/`X`, `z`/`Z`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(LogicValue::V0),
            '1' => Some(LogicValue::V1),
            'x' | 'X' => Some(LogicValue::Vx),
            'z' | 'Z' => Some(LogicValue::Vz),
            _ => None,
        }
    }

    /// Folds `Vz` to `Vx`; all other values pass through unchanged.
    ///
    /// Every input value that reaches mask matching goes through this
    /// first: z on an input is observationally equivalent to x.
    pub fn fold_z(self) -> Self {
        match self {
            LogicValue::Vz => LogicValue::Vx,
            other => other,
        }
    }
}

impl fmt::Display for LogicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicValue::V0 => write!(f, "0"),
            LogicValue::V1 => write!(f, "1"),
            LogicValue::Vx => write!(f, "x"),
            LogicValue::Vz => write!(f, "z"),
        }
    }
}
