//! Shared utilities.
//!
//! Shell selection and quoting, plus test helpers.

pub mod shell;

#[cfg(test)]
pub mod testutil;
