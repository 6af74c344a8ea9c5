//! oomwatch agent — library crate for kernel OOM kill counting.
//!
//! Re-exports all modules so external crates (e.g. `ow-e2e-tests`) can
//! drive `OomScanner` against mock journals and sinks.

pub mod check_loop;
pub mod config;
pub mod scanner;

pub use scanner::{OomEvent, OomScanner};
