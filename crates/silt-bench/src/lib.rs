//! Benchmark crate for Silt. See `benches/` for the criterion harnesses.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
