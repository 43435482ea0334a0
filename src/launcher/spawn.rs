//! launcher::spawn
//!
//! Process spawning.
//!
//! # Detaching
//!
//! On Unix the child starts a new session, leaving the invoking terminal's
//! session and process group. It has no controlling terminal, so Ctrl-C,
//! job control, and the hangup sent when the terminal closes do not reach
//! it. On Windows it is created without a console and in a new process group.
//! Standard streams are connected to the null device in both cases.

use std::io;
use std::process::{Command, Stdio};

use super::LaunchCommand;

/// Starts processes.
pub trait Spawner {
    /// Start `command` and return the child's process id.
    ///
    /// Implementations must not wait for the child.
    fn spawn(&self, command: &LaunchCommand) -> io::Result<u32>;
}

/// Spawns real, detached processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedSpawner;

impl Spawner for DetachedSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<u32> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut cmd);

        let child = cmd.spawn()?;
        let pid = child.id();
        // Dropping the handle neither kills nor waits for the child.
        drop(child);
        Ok(pid)
    }
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    // SAFETY: setsid is async-signal-safe and touches no parent state.
    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}
