//! Input-vector bitmask representation shared by rows and evaluation state.

use serde::{Deserialize, Serialize};

use crate::logic::LogicValue;

/// Maximum number of ports a UDP may declare.
///
/// The mask word is fixed at `u64`; one bit
/// is reserved for the synthetic output slot of sequential UDPs, so the
/// usable port range is `[0, 63]`.
pub const MAX_PORTS: u32 = u64::BITS - 1;

/// Three bitmasks over the port-index space: which ports currently hold
/// `0`, `1`, and `x` respectively.
///
/// For sequential UDPs under evaluation, bit index `port_count` (the
/// "output slot") additionally carries the current output value so it
/// participates uniformly in mask matching.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Bits set where the port value is `0`.
    pub m0: u64,
    /// Bits set where the port value is `1`.
    pub m1: u64,
    /// Bits set where the port value is `x` (or `z`, folded).
    pub mx: u64,
}

impl InputState {
    /// The all-zero state (no bits set in any mask).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a state with every port in `[0, port_count)` set to `x`.
    ///
    /// This is the initial state of an [`InstanceCore`](crate::InstanceCore):
    /// every input starts unknown.
    pub fn all_unknown(port_count: u32) -> Self {
        Self {
            m0: 0,
            m1: 0,
            mx: low_bits(port_count),
        }
    }

    /// Returns the value currently recorded at `index`, folding any
    /// malformed (non-exclusive or all-clear) state defensively to `Vx`.
    ///
    /// # Panics
    ///
    /// Panics if more than one of `m0`/`m1`/`mx` has `index` set — that
    /// would violate the mask-exclusivity invariant
    /// and indicates a caller bug, not a UDP-authoring error.
    pub fn get(&self, index: u32) -> LogicValue {
        let bit = 1u64 << index;
        let in0 = self.m0 & bit != 0;
        let in1 = self.m1 & bit != 0;
        let inx = self.mx & bit != 0;
        match (in0, in1, inx) {
            (true, false, false) => LogicValue::V0,
            (false, true, false) => LogicValue::V1,
            (false, false, true) => LogicValue::Vx,
            (false, false, false) => LogicValue::Vx,
            _ => panic!("InputState index {index} set in more than one mask"),
        }
    }

    /// Sets the value at `index`, clearing it from the other two masks
    /// first (so the exclusivity invariant can never be violated through
    /// this method).
    ///
    /// `Vz` folds to `Vx`.
    pub fn set(&mut self, index: u32, value: LogicValue) {
        let bit = 1u64 << index;
        let clear = !bit;
        self.m0 &= clear;
        self.m1 &= clear;
        self.mx &= clear;
        match value.fold_z() {
            LogicValue::V0 => self.m0 |= bit,
            LogicValue::V1 => self.m1 |= bit,
            LogicValue::Vx => self.mx |= bit,
            LogicValue::Vz => unreachable!("fold_z removes Vz"),
        }
    }

    /// Returns a copy of this state with `index` set to `value` — used to
    /// build the sequential evaluator's `cur_tmp`: apply the output-slot
    /// bit without disturbing the port bits already present.
    pub fn with(mut self, index: u32, value: LogicValue) -> Self {
        self.set(index, value);
        self
    }
}

/// Returns a mask with bits `[0, count)` set.
pub fn low_bits(count: u32) -> u64 {
    if count == 0 {
        0
    } else if count >= 64 {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}
