//! Tagged-variant pattern alphabet for UDP rule-row characters.
//!
//! Replacing string scanning with an exhaustive match keeps the compiler's
//! hot path branch-complete: adding a pattern character means adding a
//! variant here, and every `match` on [`LevelPattern`]/[`EdgePattern`]
//! fails to build until it is handled.

use serde::{Deserialize, Serialize};

/// A port pattern that matches on the port's current level only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LevelPattern {
    /// `0` — accepts `{0}`.
    Zero,
    /// `1` — accepts `{1}`.
    One,
    /// `x` — accepts `{x}`.
    Unknown,
    /// `b` — accepts `{0,1}`.
    Both01,
    /// `l` — accepts `{0,x}`.
    Low0X,
    /// `h` — accepts `{1,x}`.
    High1X,
    /// `?` — accepts `{0,1,x}`.
    Any,
}

impl LevelPattern {
    /// Parses one of the seven level-pattern characters.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(LevelPattern::Zero),
            '1' => Some(LevelPattern::One),
            'x' => Some(LevelPattern::Unknown),
            'b' => Some(LevelPattern::Both01),
            'l' => Some(LevelPattern::Low0X),
            'h' => Some(LevelPattern::High1X),
            '?' => Some(LevelPattern::Any),
            _ => None,
        }
    }

    /// Returns which of `(m0, m1, mx)` this pattern sets.
    pub fn mask_bits(self) -> (bool, bool, bool) {
        match self {
            LevelPattern::Zero => (true, false, false),
            LevelPattern::One => (false, true, false),
            LevelPattern::Unknown => (false, false, true),
            LevelPattern::Both01 => (true, true, false),
            LevelPattern::Low0X => (true, false, true),
            LevelPattern::High1X => (false, true, true),
            LevelPattern::Any => (true, true, true),
        }
    }
}

/// A port pattern that matches on a transition into the current cycle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum EdgePattern {
    /// `f` — falling, 1→0.
    Falling,
    /// `r` — rising, 0→1.
    Rising,
    /// `q` — any transition into x (0→x or 1→x).
    ToUnknown,
}

impl EdgePattern {
    /// Parses one of the three edge-pattern characters implemented by this
    /// core.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'f' => Some(EdgePattern::Falling),
            'r' => Some(EdgePattern::Rising),
            'q' => Some(EdgePattern::ToUnknown),
            _ => None,
        }
    }

    /// Which of `(m0, m1, mx)` is set for the matched port's *current*
    /// value.
    pub fn level_bit(self) -> (bool, bool, bool) {
        match self {
            EdgePattern::Falling => (true, false, false),
            EdgePattern::Rising => (false, true, false),
            EdgePattern::ToUnknown => (false, false, true),
        }
    }

    /// Which previous value(s) are acceptable on the matched port, as
    /// `(prev0, prev1, prevx)`.
    pub fn allowed_prev(self) -> (bool, bool, bool) {
        match self {
            EdgePattern::Falling => (false, true, false),
            EdgePattern::Rising => (true, false, false),
            EdgePattern::ToUnknown => (true, true, false),
        }
    }
}

/// A single port column's pattern: either a level or an edge pattern.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PortPattern {
    /// A level-only pattern.
    Level(LevelPattern),
    /// An edge pattern (sequential rows only).
    Edge(EdgePattern),
}

impl PortPattern {
    /// Parses a port-column character as either a level or an edge pattern.
    ///
    /// Edge characters are only valid in sequential rows; the compiler is
    /// responsible for rejecting them in combinational context and in the
    /// output-slot column.
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(level) = LevelPattern::from_char(c) {
            Some(PortPattern::Level(level))
        } else {
            EdgePattern::from_char(c).map(PortPattern::Edge)
        }
    }

    /// `true` iff this is an edge pattern.
    pub fn is_edge(self) -> bool {
        matches!(self, PortPattern::Edge(_))
    }
}
