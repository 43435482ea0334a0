//! launcher::mock
//!
//! Recording spawner for deterministic testing.
//!
//! # Example
//!
//! ```
//! use prompt_launcher::launcher::mock::RecordingSpawner;
//! use prompt_launcher::launcher::{LaunchCommand, LaunchTarget, Spawner};
//! use std::path::Path;
//!
//! let spawner = RecordingSpawner::new();
//! let command = LaunchCommand::for_root(&LaunchTarget::default(), Path::new("/ws/a"));
//! spawner.spawn(&command).unwrap();
//!
//! assert_eq!(spawner.spawned(), vec![command]);
//! ```

use std::io;
use std::sync::{Arc, Mutex};

use super::{LaunchCommand, Spawner};

/// Records launch commands instead of starting processes.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpawner {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    spawned: Vec<LaunchCommand>,
    fail_with: Option<io::ErrorKind>,
}

impl RecordingSpawner {
    /// A spawner that accepts every command.
    pub fn new() -> Self {
        Self::default()
    }

    /// A spawner that rejects every command with `kind`.
    pub fn failing(kind: io::ErrorKind) -> Self {
        let spawner = Self::default();
        spawner.lock().fail_with = Some(kind);
        spawner
    }

    /// Commands accepted so far.
    pub fn spawned(&self) -> Vec<LaunchCommand> {
        self.lock().spawned.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<u32> {
        let mut inner = self.lock();
        if let Some(kind) = inner.fail_with {
            return Err(io::Error::new(kind, "spawn rejected by test spawner"));
        }
        inner.spawned.push(command.clone());
        Ok(1000 + inner.spawned.len() as u32)
    }
}
