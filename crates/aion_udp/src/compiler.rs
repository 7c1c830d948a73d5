//! Two-pass compiler: textual rule rows → a [`UdpDefinition`]'s row buckets.

use crate::definition::{UdpDefinition, UdpKind};
use crate::error::UdpError;
use crate::pattern::{EdgePattern, LevelPattern, PortPattern};
use crate::row::{EdgeRow, LevelRow, RowClass};
use crate::state::MAX_PORTS;

/// Per-bucket row counts tallied by the first (validation) pass, checked
/// against the actual bucket lengths built by the second pass.
#[derive(Default)]
struct BucketCounts {
    l0: usize,
    l1: usize,
    seq_l0: usize,
    seq_l1: usize,
    seq_lx: usize,
    seq_ll: usize,
    e0: usize,
    e1: usize,
    el: usize,
}

/// Compiles a sequence of textual rule rows into an immutable
/// [`UdpDefinition`].
///
/// `rows` are already-tokenised strings. Each row must have the exact
/// shape: `port_count + 1` characters for a combinational row,
/// `port_count + 2` for a sequential row.
pub fn compile(kind: UdpKind, port_count: u32, rows: &[&str]) -> Result<UdpDefinition, UdpError> {
    if port_count > MAX_PORTS {
        return Err(UdpError::PortCountExceeded {
            port_count,
            max: MAX_PORTS,
        });
    }

    let counts = validate_and_count(kind, port_count, rows)?;

    let mut l0 = Vec::with_capacity(counts.l0);
    let mut l1 = Vec::with_capacity(counts.l1);
    let mut seq_l0 = Vec::with_capacity(counts.seq_l0);
    let mut seq_l1 = Vec::with_capacity(counts.seq_l1);
    let mut seq_lx = Vec::with_capacity(counts.seq_lx);
    let mut seq_ll = Vec::with_capacity(counts.seq_ll);
    let mut e0 = Vec::with_capacity(counts.e0);
    let mut e1 = Vec::with_capacity(counts.e1);
    let mut el = Vec::with_capacity(counts.el);

    for row in rows {
        let chars: Vec<char> = row.chars().collect();
        match kind {
            UdpKind::Combinational => {
                let (level, class) = build_combinational_row(port_count, &chars);
                match class {
                    RowClass::Zero => l0.push(level),
                    RowClass::One => l1.push(level),
                    RowClass::Unknown => {} // discarded: x is the no-match default
                    RowClass::Hold => {}    // not a meaningful combinational class; no-op
                }
            }
            UdpKind::Sequential => match build_sequential_row(port_count, &chars) {
                SequentialRow::Level(level, class) => match class {
                    RowClass::Zero => seq_l0.push(level),
                    RowClass::One => seq_l1.push(level),
                    RowClass::Unknown => seq_lx.push(level),
                    RowClass::Hold => seq_ll.push(level),
                },
                SequentialRow::Edge(edge, class) => match class {
                    RowClass::Zero => e0.push(edge),
                    RowClass::One => e1.push(edge),
                    RowClass::Hold => el.push(edge),
                    RowClass::Unknown => {} // edge rows with class x are discarded
                },
            },
        }
    }

    debug_assert_eq!(l0.len(), counts.l0);
    debug_assert_eq!(l1.len(), counts.l1);
    debug_assert_eq!(seq_l0.len(), counts.seq_l0);
    debug_assert_eq!(seq_l1.len(), counts.seq_l1);
    debug_assert_eq!(seq_lx.len(), counts.seq_lx);
    debug_assert_eq!(seq_ll.len(), counts.seq_ll);
    debug_assert_eq!(e0.len(), counts.e0);
    debug_assert_eq!(e1.len(), counts.e1);
    debug_assert_eq!(el.len(), counts.el);

    Ok(UdpDefinition {
        port_count,
        kind,
        l0,
        l1,
        seq_l0,
        seq_l1,
        seq_lx,
        seq_ll,
        e0,
        e1,
        el,
    })
}

/// First pass: validates every row's length and alphabet and tallies the
/// bucket each row will land in, without building any row tables.
fn validate_and_count(
    kind: UdpKind,
    port_count: u32,
    rows: &[&str],
) -> Result<BucketCounts, UdpError> {
    let mut counts = BucketCounts::default();
    let pc = port_count as usize;

    for (row_index, row) in rows.iter().enumerate() {
        let chars: Vec<char> = row.chars().collect();
        match kind {
            UdpKind::Combinational => {
                let expected = pc + 1;
                if chars.len() != expected {
                    return Err(UdpError::MalformedRow {
                        row_index,
                        row_text: (*row).to_string(),
                        expected,
                        found: chars.len(),
                    });
                }
                for (i, &ch) in chars[..pc].iter().enumerate() {
                    if LevelPattern::from_char(ch).is_none() {
                        return Err(UdpError::UnknownPattern {
                            row_index,
                            row_text: (*row).to_string(),
                            column: i,
                            ch,
                        });
                    }
                }
                match combinational_class_char(chars[pc]) {
                    Some(RowClass::Zero) => counts.l0 += 1,
                    Some(RowClass::One) => counts.l1 += 1,
                    Some(RowClass::Unknown) => {}
                    Some(RowClass::Hold) | None => {
                        return Err(UdpError::UnknownPattern {
                            row_index,
                            row_text: (*row).to_string(),
                            column: pc,
                            ch: chars[pc],
                        });
                    }
                }
            }
            UdpKind::Sequential => {
                let expected = pc + 2;
                if chars.len() != expected {
                    return Err(UdpError::MalformedRow {
                        row_index,
                        row_text: (*row).to_string(),
                        expected,
                        found: chars.len(),
                    });
                }
                if LevelPattern::from_char(chars[0]).is_none() {
                    return Err(UdpError::UnknownPattern {
                        row_index,
                        row_text: (*row).to_string(),
                        column: 0,
                        ch: chars[0],
                    });
                }
                let mut edge_seen = false;
                for (i, &ch) in chars[1..=pc].iter().enumerate() {
                    match PortPattern::from_char(ch) {
                        Some(pp) => {
                            if pp.is_edge() {
                                if edge_seen {
                                    return Err(UdpError::MultipleEdges {
                                        row_index,
                                        row_text: (*row).to_string(),
                                    });
                                }
                                edge_seen = true;
                            }
                        }
                        None => {
                            return Err(UdpError::UnknownPattern {
                                row_index,
                                row_text: (*row).to_string(),
                                column: i + 1,
                                ch,
                            });
                        }
                    }
                }
                let class = match RowClass::from_char(chars[pc + 1]) {
                    Some(c) => c,
                    None => {
                        return Err(UdpError::UnknownPattern {
                            row_index,
                            row_text: (*row).to_string(),
                            column: pc + 1,
                            ch: chars[pc + 1],
                        });
                    }
                };
                if edge_seen {
                    match class {
                        RowClass::Zero => counts.e0 += 1,
                        RowClass::One => counts.e1 += 1,
                        RowClass::Hold => counts.el += 1,
                        RowClass::Unknown => {}
                    }
                } else {
                    match class {
                        RowClass::Zero => counts.seq_l0 += 1,
                        RowClass::One => counts.seq_l1 += 1,
                        RowClass::Unknown => counts.seq_lx += 1,
                        RowClass::Hold => counts.seq_ll += 1,
                    }
                }
            }
        }
    }

    Ok(counts)
}

/// Combinational rows only ever use `0`/`1`/`x` as their trailing class
///. `Hold` is
/// returned here only so the caller can reject it explicitly rather than
/// silently reinterpreting it.
fn combinational_class_char(c: char) -> Option<RowClass> {
    match c {
        '0' => Some(RowClass::Zero),
        '1' => Some(RowClass::One),
        'x' => Some(RowClass::Unknown),
        '-' => Some(RowClass::Hold),
        _ => None,
    }
}

/// Builds a combinational row's compiled `(LevelRow, RowClass)`.
///
/// Assumes `chars` already passed [`validate_and_count`] for this row.
fn build_combinational_row(port_count: u32, chars: &[char]) -> (LevelRow, RowClass) {
    let pc = port_count as usize;
    let mut level = LevelRow::empty();
    for (i, &ch) in chars[..pc].iter().enumerate() {
        let pattern = LevelPattern::from_char(ch).expect("validated in pass 1");
        level.set_port(i as u32, pattern.mask_bits());
    }
    let class = combinational_class_char(chars[pc]).expect("validated in pass 1");
    (level, class)
}

enum SequentialRow {
    Level(LevelRow, RowClass),
    Edge(EdgeRow, RowClass),
}

/// Builds a sequential row's compiled representation.
///
/// Assumes `chars` already passed [`validate_and_count`] for this row.
fn build_sequential_row(port_count: u32, chars: &[char]) -> SequentialRow {
    let pc = port_count as usize;
    let mut level = LevelRow::empty();

    let out_pattern = LevelPattern::from_char(chars[0]).expect("validated in pass 1");
    level.set_port(port_count, out_pattern.mask_bits());

    let mut edge: Option<(u32, EdgePattern)> = None;
    for (i, &ch) in chars[1..=pc].iter().enumerate() {
        match PortPattern::from_char(ch).expect("validated in pass 1") {
            PortPattern::Level(pattern) => level.set_port(i as u32, pattern.mask_bits()),
            PortPattern::Edge(pattern) => {
                level.set_port(i as u32, pattern.level_bit());
                edge = Some((i as u32, pattern));
            }
        }
    }

    let class = RowClass::from_char(chars[pc + 1]).expect("validated in pass 1");

    match edge {
        Some((position, pattern)) => {
            let (prev0, prev1, prevx) = pattern.allowed_prev();
            SequentialRow::Edge(
                EdgeRow {
                    level,
                    edge_position: position,
                    prev0,
                    prev1,
                    prevx,
                },
                class,
            )
        }
        None => SequentialRow::Level(level, class),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::LogicValue;
    use crate::state::InputState;

    #[test]
    fn compile_and_gate() {
        let def = compile(
            UdpKind::Combinational,
            2,
            &["000", "010", "100", "111"],
        )
        .unwrap();
        assert_eq!(def.l1.len(), 1);
        assert_eq!(def.l0.len(), 3);
    }

    #[test]
    fn compile_discards_x_class_rows_combinational() {
        let def = compile(
            UdpKind::Combinational,
            2,
            &["00x", "010", "100", "111"],
        )
        .unwrap();
        assert_eq!(def.l0.len(), 2);
        assert_eq!(def.l1.len(), 1);
    }

    #[test]
    fn malformed_row_wrong_length() {
        let err = compile(UdpKind::Combinational, 2, &["01"]).unwrap_err();
        assert_eq!(
            err,
            UdpError::MalformedRow {
                row_index: 0,
                row_text: "01".into(),
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn unknown_pattern_character() {
        let err = compile(UdpKind::Combinational, 2, &["0*1"]).unwrap_err();
        assert_eq!(
            err,
            UdpError::UnknownPattern {
                row_index: 0,
                row_text: "0*1".into(),
                column: 1,
                ch: '*',
            }
        );
    }

    #[test]
    fn unknown_pattern_in_trailing_class_column() {
        let err = compile(UdpKind::Combinational, 2, &["00*"]).unwrap_err();
        assert_eq!(
            err,
            UdpError::UnknownPattern {
                row_index: 0,
                row_text: "00*".into(),
                column: 2,
                ch: '*',
            }
        );
    }

    #[test]
    fn edge_character_rejected_in_combinational_port_column() {
        let err = compile(UdpKind::Combinational, 2, &["0r1"]).unwrap_err();
        assert!(matches!(
            err,
            UdpError::UnknownPattern { column: 1, ch: 'r', .. }
        ));
    }

    #[test]
    fn multiple_edges_rejected() {
        let err = compile(UdpKind::Sequential, 2, &["?fr1"]).unwrap_err();
        assert_eq!(
            err,
            UdpError::MultipleEdges {
                row_index: 0,
                row_text: "?fr1".into(),
            }
        );
    }

    #[test]
    fn port_count_exceeded() {
        let err = compile(UdpKind::Combinational, 64, &[]).unwrap_err();
        assert_eq!(
            err,
            UdpError::PortCountExceeded {
                port_count: 64,
                max: 63,
            }
        );
    }

    #[test]
    fn port_count_at_max_is_accepted() {
        let rows: Vec<String> = vec!["?".repeat(63) + "0"];
        let refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
        let def = compile(UdpKind::Combinational, 63, &refs).unwrap();
        assert_eq!(def.port_count(), 63);
    }

    #[test]
    fn compile_sequential_edge_row() {
        // current-out '?', port0 held at 0, port1 rising -> next 1
        let def = compile(UdpKind::Sequential, 2, &["?0r1", "???-"]).unwrap();
        assert_eq!(def.e1.len(), 1);
        assert_eq!(def.seq_ll.len(), 1);
        let edge = &def.e1[0];
        assert_eq!(edge.edge_position, 1);
        assert!(edge.prev0);
        assert!(!edge.prev1);
    }

    #[test]
    fn compile_sequential_hold_row() {
        let def = compile(UdpKind::Sequential, 2, &["???-"]).unwrap();
        assert_eq!(def.seq_ll.len(), 1);
    }

    #[test]
    fn compile_sequential_explicit_x_row() {
        let def = compile(UdpKind::Sequential, 2, &["?xxx"]).unwrap();
        assert_eq!(def.seq_lx.len(), 1);
        let mut cur = InputState::empty();
        cur.set(0, LogicValue::Vx);
        cur.set(1, LogicValue::Vx);
        assert!(def.seq_lx[0].matches(cur.with(2, LogicValue::V1)));
    }

    #[test]
    fn compile_discards_edge_rows_with_x_class() {
        let def = compile(UdpKind::Sequential, 2, &["?0rx"]).unwrap();
        assert_eq!(def.e0.len(), 0);
        assert_eq!(def.e1.len(), 0);
        assert_eq!(def.el.len(), 0);
    }

    #[test]
    fn compile_sequential_edge_output_slot_rejects_edge_char() {
        let err = compile(UdpKind::Sequential, 2, &["r0r1"]).unwrap_err();
        assert!(matches!(
            err,
            UdpError::UnknownPattern { column: 0, ch: 'r', .. }
        ));
    }
}
