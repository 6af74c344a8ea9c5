//! Test-only crate. See `tests/` for end-to-end scenarios wiring the
//! journal reader, the OOM scanner and the metric sink together.
