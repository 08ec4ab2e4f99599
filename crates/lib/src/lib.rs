//! buildsys-lib: Core types and logic for buildsys
//!
//! This crate provides the pieces behind the `buildsys` command:
//! - `Target`: a named output directory plus an ordered list of actions
//! - `Action`: the primitive steps (copy, run, set env)
//! - `ExecEnv`: the environment threaded through a target's actions
//! - `allocate_dir`: collision-free output directory allocation
//! - `execute`: running a selection of targets under a failure policy

pub mod action;
pub mod config;
pub mod consts;
pub mod env;
pub mod example;
pub mod execute;
pub mod outdir;
pub mod target;
pub mod util;
