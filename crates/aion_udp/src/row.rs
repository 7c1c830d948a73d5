//! Compiled rule rows: [`LevelRow`], [`EdgeRow`], and the output-class tag
//! that decides which bucket a row belongs in.

use serde::{Deserialize, Serialize};

use crate::state::InputState;

/// The output class trailing a rule row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RowClass {
    /// Output is driven to `0`.
    Zero,
    /// Output is driven to `1`.
    One,
    /// Output is driven to `x` (combinational: discarded at compile time;
    /// sequential: an explicit, matchable `x` output, distinct from the
    /// no-match fallback).
    Unknown,
    /// Output is unchanged ("hold"); sequential only.
    Hold,
}

impl RowClass {
    /// Parses the single trailing output-class character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(RowClass::Zero),
            '1' => Some(RowClass::One),
            'x' => Some(RowClass::Unknown),
            '-' => Some(RowClass::Hold),
            _ => None,
        }
    }
}

/// A compiled level-matching rule: the set of `InputState`s it accepts,
/// expressed as three "acceptable bits" masks over the same index space as
/// [`InputState`].
///
/// A row matches a state `cur` iff every bit `cur` has set in a given mask
/// is also set in the row's corresponding mask: `cur.mX &
/// row.mX == cur.mX`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LevelRow {
    /// Ports (and, for sequential rows, the output slot) whose `0` value is
    /// accepted.
    pub m0: u64,
    /// Ports whose `1` value is accepted.
    pub m1: u64,
    /// Ports whose `x` value is accepted.
    pub mx: u64,
}

impl LevelRow {
    /// An empty row accepting nothing (used as a builder seed).
    pub fn empty() -> Self {
        Self { m0: 0, m1: 0, mx: 0 }
    }

    /// Sets the accept-bits for `index` from a pattern's `(m0, m1, mx)`
    /// contribution.
    pub fn set_port(&mut self, index: u32, bits: (bool, bool, bool)) {
        let bit = 1u64 << index;
        let (b0, b1, bx) = bits;
        if b0 {
            self.m0 |= bit;
        }
        if b1 {
            self.m1 |= bit;
        }
        if bx {
            self.mx |= bit;
        }
    }

    /// `true` iff `cur`'s chosen bit at every port lies within this row's
    /// accepted set, i.e. this row matches `cur`.
    pub fn matches(&self, cur: InputState) -> bool {
        (cur.m0 & self.m0) == cur.m0
            && (cur.m1 & self.m1) == cur.m1
            && (cur.mx & self.mx) == cur.mx
    }
}

/// A compiled edge-matching rule: a [`LevelRow`] over the *current* state
/// plus the edge descriptor identifying which port carries the transition
/// and which previous value(s) are acceptable there.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EdgeRow {
    /// Level masks matched against the current `InputState` (including the
    /// output slot, for sequential rows).
    pub level: LevelRow,
    /// The port index carrying the edge.
    pub edge_position: u32,
    /// `true` if the previous value `0` is acceptable at `edge_position`.
    pub prev0: bool,
    /// `true` if the previous value `1` is acceptable at `edge_position`.
    pub prev1: bool,
    /// `true` if the previous value `x` is acceptable at `edge_position`.
    pub prevx: bool,
}

impl EdgeRow {
    /// `true` iff the previous value actually observed at `edge_position`
    /// (given as which of `prev0`/`prev1`/`prevx` was true for the
    /// transition) is permitted by this row.
    pub fn accepts_prev(&self, prev0: bool, prev1: bool, prevx: bool) -> bool {
        (prev0 && self.prev0) || (prev1 && self.prev1) || (prevx && self.prevx)
    }
}
