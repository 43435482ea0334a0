//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive selection prompts
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All output and prompts go through this module to ensure consistent
//! formatting and proper handling of interactive vs non-interactive modes.
//! Prompt UI is drawn on stderr so stdout stays clean for scripting.

pub mod output;
pub mod prompts;
