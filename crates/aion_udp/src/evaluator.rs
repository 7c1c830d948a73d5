//! Pure evaluation functions over a compiled [`UdpDefinition`].
//!
//! Both entry points are free functions taking `&UdpDefinition` rather than
//! methods with `&mut self`: evaluation never mutates the definition, and
//! keeping that purity visible in the signature is worth more than the
//! convenience of a method call.

use crate::definition::UdpDefinition;
use crate::logic::LogicValue;
use crate::state::{low_bits, InputState};

/// Evaluates a combinational UDP against `cur`.
///
/// Scans `L1` before `L0` (a fixed, documented tie-break for malformed UDPs
/// whose rows overlap; a well-formed UDP never exercises the tie-break).
pub fn eval_combinational(def: &UdpDefinition, cur: InputState) -> LogicValue {
    if def.l1.iter().any(|row| row.matches(cur)) {
        return LogicValue::V1;
    }
    if def.l0.iter().any(|row| row.matches(cur)) {
        return LogicValue::V0;
    }
    LogicValue::Vx
}

/// Evaluates a sequential UDP against `cur`/`prev`/`cur_out`.
pub fn eval_sequential(
    def: &UdpDefinition,
    cur: InputState,
    prev: InputState,
    cur_out: LogicValue,
) -> LogicValue {
    let cur_tmp = cur.with(def.port_count, cur_out);

    if def.seq_l0.iter().any(|row| row.matches(cur_tmp)) {
        return LogicValue::V0;
    }
    if def.seq_l1.iter().any(|row| row.matches(cur_tmp)) {
        return LogicValue::V1;
    }
    if def.seq_lx.iter().any(|row| row.matches(cur_tmp)) {
        return LogicValue::Vx;
    }
    // `LL` (hold): the held value is read back from cur_tmp's own output
    // slot, so holding while cur_out == Vx re-emits Vx.
    if def.seq_ll.iter().any(|row| row.matches(cur_tmp)) {
        return cur_out;
    }

    eval_edge(def, cur, prev, cur_tmp, cur_out)
}

/// Edge-matching fallback for the sequential evaluator,
/// reached only once no level row matched.
fn eval_edge(
    def: &UdpDefinition,
    cur: InputState,
    prev: InputState,
    cur_tmp: InputState,
    cur_out: LogicValue,
) -> LogicValue {
    let port_mask = low_bits(def.port_count);
    let edge_mask = ((cur.m0 ^ prev.m0) | (cur.m1 ^ prev.m1) | (cur.mx ^ prev.mx)) & port_mask;

    if edge_mask == 0 {
        return LogicValue::Vx;
    }

    let edge_bit = edge_mask & edge_mask.wrapping_neg();
    let remainder = edge_mask ^ edge_bit;
    debug_assert_eq!(
        remainder, 0,
        "more than one port changed between prev and cur snapshots"
    );
    if remainder != 0 {
        // The scheduler promised one port change at a time; if it didn't
        // deliver, fail safe rather than guess which change mattered.
        return LogicValue::Vx;
    }

    let edge_position = edge_bit.trailing_zeros();
    let prev0 = prev.m0 & edge_bit != 0;
    let prev1 = prev.m1 & edge_bit != 0;
    let prevx = prev.mx & edge_bit != 0;

    let edge_matches = |row: &crate::row::EdgeRow| {
        row.edge_position == edge_position
            && row.accepts_prev(prev0, prev1, prevx)
            && row.level.matches(cur_tmp)
    };

    if def.e0.iter().any(edge_matches) {
        return LogicValue::V0;
    }
    if def.e1.iter().any(edge_matches) {
        return LogicValue::V1;
    }
    if def.el.iter().any(edge_matches) {
        return cur_out;
    }

    LogicValue::Vx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::definition::UdpKind;

    fn cur2(a: LogicValue, b: LogicValue) -> InputState {
        let mut s = InputState::empty();
        s.set(0, a);
        s.set(1, b);
        s
    }

    // S1 — combinational AND.
    #[test]
    fn s1_combinational_and() {
        let def = compile(UdpKind::Combinational, 2, &["000", "010", "100", "111"]).unwrap();
        assert_eq!(
            eval_combinational(&def, cur2(LogicValue::V1, LogicValue::V1)),
            LogicValue::V1
        );
        assert_eq!(
            eval_combinational(&def, cur2(LogicValue::V1, LogicValue::V0)),
            LogicValue::V0
        );
        assert_eq!(
            eval_combinational(&def, cur2(LogicValue::Vx, LogicValue::V1)),
            LogicValue::Vx
        );
    }

    // S2 — wildcard row precedence: L1 wins over a matching L0 wildcard.
    #[test]
    fn s2_wildcard_row_precedence() {
        let def = compile(UdpKind::Combinational, 2, &["??0", "111"]).unwrap();
        assert_eq!(
            eval_combinational(&def, cur2(LogicValue::V1, LogicValue::V1)),
            LogicValue::V1
        );
        assert_eq!(
            eval_combinational(&def, cur2(LogicValue::Vx, LogicValue::Vx)),
            LogicValue::V0
        );
    }

    // S3 — sequential rising edge.
    #[test]
    fn s3_sequential_rising_edge() {
        let def = compile(UdpKind::Sequential, 2, &["?0r1"]).unwrap();
        let prev = cur2(LogicValue::V0, LogicValue::V0);
        let cur = cur2(LogicValue::V0, LogicValue::V1);
        assert_eq!(eval_sequential(&def, cur, prev, LogicValue::V0), LogicValue::V1);
    }

    // S4 — sequential hold.
    #[test]
    fn s4_sequential_hold() {
        let def = compile(UdpKind::Sequential, 2, &["???-"]).unwrap();
        let prev = cur2(LogicValue::V0, LogicValue::V0);
        let cur = cur2(LogicValue::V1, LogicValue::V0);
        assert_eq!(eval_sequential(&def, cur, prev, LogicValue::V1), LogicValue::V1);
    }

    // S5 — explicit x output, distinguished from no-match fallback.
    #[test]
    fn s5_explicit_x_output() {
        let def = compile(UdpKind::Sequential, 2, &["?xxx"]).unwrap();
        let prev = cur2(LogicValue::V0, LogicValue::V0);
        let cur = cur2(LogicValue::Vx, LogicValue::Vx);
        assert_eq!(eval_sequential(&def, cur, prev, LogicValue::V1), LogicValue::Vx);
    }

    // S6 — edge with no level fallthrough. The hold row is written to match
    // only the settled (0,0) state, not the post-edge (0,1) state — an
    // unconditional "???-" hold row would be an ambiguous UDP table (it
    // would shadow the edge row at the level-matching step, which always
    // runs before edge matching).
    #[test]
    fn s6_edge_then_hold_no_fallthrough() {
        let def = compile(UdpKind::Sequential, 2, &["?0r1", "?00-"]).unwrap();

        let step0_prev = cur2(LogicValue::V0, LogicValue::V0);
        let step0_cur = cur2(LogicValue::V0, LogicValue::V0);
        let out0 = eval_sequential(&def, step0_cur, step0_prev, LogicValue::V0);
        assert_eq!(out0, LogicValue::V0);

        let step1_prev = step0_cur;
        let step1_cur = cur2(LogicValue::V0, LogicValue::V1);
        let out1 = eval_sequential(&def, step1_cur, step1_prev, out0);
        assert_eq!(out1, LogicValue::V1);

        let step2_prev = step1_cur;
        let step2_cur = cur2(LogicValue::V0, LogicValue::V0);
        let out2 = eval_sequential(&def, step2_cur, step2_prev, out1);
        assert_eq!(out2, LogicValue::V1);
    }

    // Resolved open question: holding while cur_out == Vx
    // re-emits Vx rather than rerunning the match.
    #[test]
    fn hold_while_unknown_reemits_unknown() {
        let def = compile(UdpKind::Sequential, 2, &["???-"]).unwrap();
        let prev = cur2(LogicValue::V0, LogicValue::V0);
        let cur = cur2(LogicValue::V1, LogicValue::V0);
        assert_eq!(eval_sequential(&def, cur, prev, LogicValue::Vx), LogicValue::Vx);
    }

    // Invariant 2: totality — every input combination yields a defined value.
    #[test]
    fn totality_over_all_inputs() {
        let def = compile(UdpKind::Combinational, 1, &["01"]).unwrap();
        for v in [LogicValue::V0, LogicValue::V1, LogicValue::Vx] {
            let mut s = InputState::empty();
            s.set(0, v);
            let _ = eval_combinational(&def, s); // must not panic
        }
    }

    // Invariant 6: hold idempotence.
    #[test]
    fn hold_idempotence() {
        let def = compile(UdpKind::Sequential, 1, &["?1-"]).unwrap();
        let prev = {
            let mut s = InputState::empty();
            s.set(0, LogicValue::V1);
            s
        };
        let cur = prev;
        assert_eq!(eval_sequential(&def, cur, prev, LogicValue::V0), LogicValue::V0);
        assert_eq!(eval_sequential(&def, cur, prev, LogicValue::V1), LogicValue::V1);
    }

    // Invariant 5 corollary: no edge (identical prev/cur) with no level
    // match falls through to the no-match default, never an edge bucket.
    #[test]
    fn no_edge_no_level_match_defaults_to_unknown() {
        let def = compile(UdpKind::Sequential, 1, &["?0r1"]).unwrap();
        let s = {
            let mut s = InputState::empty();
            s.set(0, LogicValue::V1);
            s
        };
        assert_eq!(eval_sequential(&def, s, s, LogicValue::V0), LogicValue::Vx);
    }

    #[test]
    fn edge_row_also_checks_level_masks_on_other_ports() {
        // port0 must be 0 for the edge to fire; port1 carries the edge.
        let def = compile(UdpKind::Sequential, 2, &["?0r1"]).unwrap();
        let prev = cur2(LogicValue::V1, LogicValue::V0);
        let cur = cur2(LogicValue::V1, LogicValue::V1);
        // port0 == 1, not 0: the edge row's level mask rejects this state.
        assert_eq!(eval_sequential(&def, cur, prev, LogicValue::V0), LogicValue::Vx);
    }
}
