//! Paginator engine.
//!
//! Three pieces with real algorithmic content live here: the
//! page-window arithmetic ([`window`]), the reconciliation gate
//! deciding whether a navigation needs an actual reload, and the
//! single-flight load orchestration ([`engine`]).

pub mod engine;
pub mod window;

pub use engine::{NavKey, Paginator};
pub use window::{compute_window, PageWindow};
