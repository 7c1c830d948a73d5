//! A single running UDP instance: its own input/output state bound to a
//! shared, immutable [`UdpDefinition`].

use crate::definition::UdpDefinition;
use crate::logic::LogicValue;
use crate::state::InputState;

/// Per-instance mutable state for one UDP evaluation site.
///
/// Borrows its definition rather than owning or ref-counting it — sharing a
/// `UdpDefinition` across instances is the host simulator's concern, not
/// this crate's.
pub struct InstanceCore<'a> {
    def: &'a UdpDefinition,
    current: InputState,
    cur_out: LogicValue,
}

impl<'a> InstanceCore<'a> {
    /// Creates a new instance of `def` with every input initially `x` and
    /// no output yet produced (`cur_out = Vx`).
    pub fn new(def: &'a UdpDefinition) -> Self {
        Self {
            def,
            current: InputState::all_unknown(def.port_count()),
            cur_out: LogicValue::Vx,
        }
    }

    /// Applies a single port update and returns the newly evaluated output.
    ///
    /// Propagation delay and net fan-out are the caller's responsibility;
    /// this returns the bare `LogicValue`.
    pub fn on_port_update(&mut self, port_index: u32, new_value: LogicValue) -> LogicValue {
        let prev = self.current;
        self.current = self.current.with(port_index, new_value);
        let out = self.def.eval(self.current, prev, self.cur_out);
        self.cur_out = out;
        out
    }

    /// The instance's current input state.
    pub fn current(&self) -> InputState {
        self.current
    }

    /// The last output value this instance produced.
    pub fn last_output(&self) -> LogicValue {
        self.cur_out
    }
}
