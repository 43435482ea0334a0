//! prompt-launcher - Open an external tool in the right workspace folder
//!
//! Given an action triggered somewhere inside an editor workspace, picks the
//! workspace folder the action belongs to and starts an external tool
//! (`prompt` by default) in it, detached from the caller.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line front end (the host that triggers invocations)
//! - [`engine`] - Runs one invocation: roots, resolve, launch
//! - [`resolver`] - Chooses exactly one workspace folder
//! - [`launcher`] - Checks the executable and spawns it detached
//! - [`core`] - Domain types, open-root enumeration, configuration
//! - [`ui`] - Output and interactive prompts
//!
//! # Correctness Invariants
//!
//! 1. Each invocation launches at most one process
//! 2. The launched folder is always one the host reported as open
//! 3. Ambiguity is settled by the user, never by guessing
//! 4. Failures are reported once and never retried automatically

pub mod cli;
pub mod core;
pub mod engine;
pub mod launcher;
pub mod resolver;
pub mod ui;
