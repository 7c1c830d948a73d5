//! User-defined primitive (UDP) compilation and evaluation core.
//!
//! A UDP is a compact truth-table-like definition of a small combinational
//! or sequential gate over the four-valued logic `{0, 1, x, z}`. This crate
//! compiles a human-authored textual rule table into bitmask-indexed row
//! tables, then matches an input-vector change against those tables to
//! compute the gate's next output.
//!
//! # Architecture
//!
//! Compilation ([`compiler::compile`]) is a two-pass algorithm: the first
//! pass validates every row and tallies how many rows land in each output
//! bucket, the second pass builds and fills those buckets. The result is an
//! immutable [`UdpDefinition`], shareable by reference across any number of
//! [`InstanceCore`]s without synchronisation.
//!
//! Evaluation ([`evaluator::eval_combinational`], [`evaluator::eval_sequential`])
//! is a pair of pure functions over `&UdpDefinition` — no instance state is
//! touched during matching, only read.
//!
//! # Modules
//!
//! - `logic` — the four-valued [`LogicValue`]
//! - `pattern` — the tagged pattern alphabet (`LevelPattern`, `EdgePattern`, `PortPattern`)
//! - `state` — [`InputState`], the bitmask input-vector representation
//! - `row` — compiled [`row::LevelRow`]/[`row::EdgeRow`] rule rows
//! - `definition` — [`UdpDefinition`], the compiled, immutable rule table
//! - `compiler` — the two-pass text-to-table compiler
//! - `evaluator` — the pure row-matching functions
//! - `instance` — [`InstanceCore`], per-instance mutable state
//! - `registry` — [`UdpRegistry`]/[`FrozenUdpRegistry`], the per-compilation label table
//! - `error` — [`UdpError`], the compile-time error taxonomy

#![warn(missing_docs)]

pub mod compiler;
pub mod definition;
pub mod error;
pub mod evaluator;
pub mod instance;
pub mod logic;
pub mod pattern;
pub mod registry;
pub mod row;
pub mod state;

pub use compiler::compile;
pub use definition::{UdpDefinition, UdpKind};
pub use error::UdpError;
pub use evaluator::{eval_combinational, eval_sequential};
pub use instance::InstanceCore;
pub use logic::LogicValue;
pub use pattern::{EdgePattern, LevelPattern, PortPattern};
pub use registry::{FrozenUdpRegistry, UdpRegistry};
pub use row::{EdgeRow, LevelRow, RowClass};
pub use state::{InputState, MAX_PORTS};
