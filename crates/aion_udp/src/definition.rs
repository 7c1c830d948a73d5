//! Compiled, immutable UDP definitions.

use serde::{Deserialize, Serialize};

use crate::logic::LogicValue;
use crate::row::{EdgeRow, LevelRow};
use crate::state::InputState;

/// Whether a UDP is purely combinational or has sequential (edge/hold)
/// behaviour.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UdpKind {
    /// Output depends only on the current input levels.
    Combinational,
    /// Output may depend on edges and the previously held output.
    Sequential,
}

/// A compiled, immutable UDP: port count, kind, and row buckets grouped by
/// target output class.
///
/// Constructed once by [`crate::compiler::compile`] and shared by reference
/// thereafter — there is no API to mutate a `UdpDefinition`
/// after compilation.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct UdpDefinition {
    pub(crate) port_count: u32,
    pub(crate) kind: UdpKind,

    // Combinational buckets.
    pub(crate) l0: Vec<LevelRow>,
    pub(crate) l1: Vec<LevelRow>,

    // Sequential level buckets.
    pub(crate) seq_l0: Vec<LevelRow>,
    pub(crate) seq_l1: Vec<LevelRow>,
    pub(crate) seq_lx: Vec<LevelRow>,
    pub(crate) seq_ll: Vec<LevelRow>,

    // Sequential edge buckets.
    pub(crate) e0: Vec<EdgeRow>,
    pub(crate) e1: Vec<EdgeRow>,
    pub(crate) el: Vec<EdgeRow>,
}

impl UdpDefinition {
    /// Number of 1-bit ports this UDP declares (excludes the synthetic
    /// output slot of sequential UDPs).
    pub fn port_count(&self) -> u32 {
        self.port_count
    }

    /// Whether this UDP is combinational or sequential.
    pub fn kind(&self) -> UdpKind {
        self.kind
    }

    /// Evaluates this definition against `cur`/`prev`/`cur_out`, dispatching
    /// to the combinational or sequential evaluator per [`UdpKind`].
    pub fn eval(&self, cur: InputState, prev: InputState, cur_out: LogicValue) -> LogicValue {
        match self.kind {
            UdpKind::Combinational => crate::evaluator::eval_combinational(self, cur),
            UdpKind::Sequential => crate::evaluator::eval_sequential(self, cur, prev, cur_out),
        }
    }
}
