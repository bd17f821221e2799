//! # sqlweave
//!
//! A parameterized SQL compiler for BI metric templates.
//!
//! A metric is authored once as a SQL template containing named filter
//! tokens (`{{key}}`) plus a list of filter specifications describing how
//! each token renders: its target column, value type, rendering mode,
//! optional operator and optional default. At query time the compiler
//! merges caller-supplied filter values with the authored defaults and
//! produces a single, fully-resolved, directly executable SQL string.
//!
//! ## Architecture
//!
//! One compile call is a single linear pass through four stages:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │       MetricTemplate (SQL template + FilterSpecs)        │
//! │              + FilterValues (runtime overrides)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [scanner]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Literal spans + {{key}} token spans               │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [resolve]
//! ┌─────────────────────────────────────────────────────────┐
//! │   FilterSpec lookup + effective value (value ?? default) │
//! │            → render fragment, or elide token             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [render]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Mode dispatch → escaped literals / raw passthrough     │
//! │            + indentation-matched substitution            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [completeness validation]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Executable SQL string                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The compiler is a pure, synchronous function of its inputs: no I/O, no
//! caching, no state between calls. It is safe to invoke concurrently
//! from any number of threads.
//!
//! ## Trust boundary
//!
//! Every value rendered through a column comparison mode or `value` mode
//! is escaped (single quotes doubled). The raw passthrough modes
//! (`order_by_item`, `partition_by`, `select_expr`, `limit`,
//! `predicate_switch`, `predicate_complex`) substitute author-written SQL
//! fragments verbatim and must never carry end-user input. See
//! [`model::FilterMode`].

pub mod compile;
pub mod model;
pub mod render;
pub mod resolve;
pub mod scanner;

pub use compile::{compile, compile_with_defaults, CompileError, CompileResult};
pub use model::{FilterMode, FilterSpec, FilterType, FilterValues, MetricTemplate};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{compile, compile_with_defaults, CompileError, CompileResult};
    pub use crate::model::{FilterMode, FilterSpec, FilterType, FilterValues, MetricTemplate};
}
