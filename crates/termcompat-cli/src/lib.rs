//! Diagnostic front end for termcompat
//!
//! Reports what detection found and exits with a code scripts can branch
//! on: 0 for a normal terminal, 2 for a minimal one, 3 for System V.

pub mod diagnostics;
pub mod report;
