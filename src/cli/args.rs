//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::workspace::RootSources;
use crate::engine::Request;

/// prompt-launch - Open the prompt tool in the right workspace folder
#[derive(Parser, Debug)]
#[command(name = "prompt-launch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if prompt-launch was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set, the config does
    ///   not disable it, AND stdin is a terminal
    pub fn interactive(&self, config_default: bool) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            config_default && std::io::stdin().is_terminal()
        }
    }
}

/// Where the open roots come from.
#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    /// An open workspace folder (repeatable)
    #[arg(long = "root", value_name = "PATH")]
    pub roots: Vec<PathBuf>,

    /// A .code-workspace file listing the open folders
    #[arg(long, value_name = "FILE")]
    pub workspace: Option<PathBuf>,

    /// The document open in the active editor
    #[arg(long, value_name = "PATH")]
    pub active: Option<PathBuf>,
}

impl RootArgs {
    /// Build an engine request for `hint`.
    pub fn into_request(self, hint: Option<PathBuf>) -> Request {
        Request {
            hint,
            sources: RootSources {
                workspace_file: self.workspace,
                roots: self.roots,
            },
            active_document: self.active,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the prompt tool in the resolved workspace folder
    #[command(
        name = "launch",
        long_about = "Launch the prompt tool in the resolved workspace folder.\n\n\
            The folder is chosen from the open workspace folders: the one containing \
            PATH if given, the only one if just one is open, the one containing the \
            active document, or otherwise the one you pick from a list. The tool is \
            started detached with the folder as its argument and working directory.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Launch for the folder containing a file (context-menu click)
    prompt-launch launch --workspace app.code-workspace src/api/main.rs

    # Single folder: always launches there
    prompt-launch launch --root ~/code/site

    # Multiple folders, no hint: prompts for a choice
    prompt-launch launch --root ~/code/api --root ~/code/web

    # Use a specific build of the tool for this run
    prompt-launch launch --binary ~/bin/prompt-dev

CONFIGURATION:
    prompt-launch config set binary /usr/local/bin/prompt"
    )]
    Launch {
        /// Path the action was triggered on (file or folder)
        path: Option<PathBuf>,

        #[command(flatten)]
        roots: RootArgs,

        /// Executable to launch (overrides the configured binary)
        #[arg(long, value_name = "EXE")]
        binary: Option<String>,
    },

    /// Print the workspace folder that launch would use
    #[command(
        name = "resolve",
        long_about = "Print the workspace folder that launch would use, without \
            launching anything.\n\n\
            Prints nothing if the selection prompt is dismissed."
    )]
    Resolve {
        /// Path the action was triggered on (file or folder)
        path: Option<PathBuf>,

        #[command(flatten)]
        roots: RootArgs,
    },

    /// List the open workspace folders
    Roots {
        #[command(flatten)]
        roots: RootArgs,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        after_help = "\
KEYS:
    binary         executable to launch (path or name on PATH; empty = prompt)
    interactive    whether to prompt when the folder is ambiguous (true/false)"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set (empty to clear)
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn launch_collects_roots_and_hint() {
        let cli = Cli::try_parse_from([
            "prompt-launch",
            "launch",
            "--root",
            "/ws/a",
            "--root",
            "/ws/b",
            "--active",
            "/ws/b/x.rs",
            "/ws/a/src",
        ])
        .unwrap();

        match cli.command {
            Command::Launch {
                path,
                roots,
                binary,
            } => {
                assert_eq!(path, Some(PathBuf::from("/ws/a/src")));
                assert_eq!(roots.roots.len(), 2);
                assert_eq!(roots.active, Some(PathBuf::from("/ws/b/x.rs")));
                assert!(binary.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn quiet_disables_prompts() {
        let cli = Cli::try_parse_from(["prompt-launch", "-q", "roots"]).unwrap();
        assert!(!cli.interactive(true));
    }

    #[test]
    fn explicit_interactive_wins() {
        let cli = Cli::try_parse_from(["prompt-launch", "--interactive", "roots"]).unwrap();
        assert!(cli.interactive(false));
    }

    #[test]
    fn interactive_flags_conflict() {
        let result = Cli::try_parse_from([
            "prompt-launch",
            "--interactive",
            "--no-interactive",
            "roots",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn into_request_maps_fields() {
        let args = RootArgs {
            roots: vec![PathBuf::from("/ws/a")],
            workspace: Some(PathBuf::from("w.code-workspace")),
            active: None,
        };
        let request = args.into_request(Some(PathBuf::from("x")));
        assert_eq!(request.hint, Some(PathBuf::from("x")));
        assert_eq!(request.sources.roots, vec![PathBuf::from("/ws/a")]);
        assert!(request.sources.workspace_file.is_some());
    }
}
