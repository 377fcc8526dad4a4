//! Detached terminal launch for synthesized render commands.
//!
//! The commands must keep running and stay visible after this process
//! exits, so each platform recipe opens a fresh terminal window, chains
//! the commands with the platform's separator, and holds the window
//! open once the run finishes. The spawn is fire-and-forget: we never
//! wait on the child or inspect its exit code.

use std::process::Command;

use tracing::info;

use super::error::LaunchError;

/// Capability seam for running synthesized commands outside this
/// process. The core stays platform-agnostic behind it.
pub trait TerminalLauncher {
    fn launch_detached(&self, commands: &[String]) -> Result<(), LaunchError>;
}

/// Launches commands in the operating system's terminal emulator.
pub struct SystemTerminal;

impl TerminalLauncher for SystemTerminal {
    fn launch_detached(&self, commands: &[String]) -> Result<(), LaunchError> {
        let invocation = terminal_invocation(commands, std::env::consts::OS)?;
        Command::new(&invocation.program)
            .args(&invocation.args)
            .spawn()
            .map_err(LaunchError::Spawn)?;
        info!(
            count = commands.len(),
            terminal = %invocation.program,
            "render commands handed to a detached terminal"
        );
        Ok(())
    }
}

#[derive(Debug)]
struct TerminalInvocation {
    program: String,
    args: Vec<String>,
}

/// Build the terminal invocation for the given platform identifier
/// (`std::env::consts::OS` values). Runtime dispatch keeps every recipe
/// compiled and testable on any host.
fn terminal_invocation(
    commands: &[String],
    os: &str,
) -> Result<TerminalInvocation, LaunchError> {
    if commands.is_empty() {
        return Err(LaunchError::Empty);
    }
    match os {
        "windows" => Ok(windows_invocation(commands)),
        "linux" => Ok(linux_invocation(commands)),
        "macos" => Ok(macos_invocation(commands)),
        other => Err(LaunchError::UnsupportedPlatform {
            os: other.to_string(),
        }),
    }
}

/// `start` is a cmd builtin, so it needs a cmd wrapper; `/k` keeps the
/// new window open and the trailing pause lets the user read the output.
fn windows_invocation(commands: &[String]) -> TerminalInvocation {
    let chained = commands.join(" && ");
    TerminalInvocation {
        program: "cmd".to_string(),
        args: vec![
            "/C".to_string(),
            format!("start cmd /k \"{chained} & echo. & pause\""),
        ],
    }
}

fn linux_invocation(commands: &[String]) -> TerminalInvocation {
    let chained = commands.join("; ");
    TerminalInvocation {
        program: "gnome-terminal".to_string(),
        args: vec![
            "--".to_string(),
            "/bin/bash".to_string(),
            "-c".to_string(),
            format!("{chained}; echo \"Render finished. Press Enter to close.\"; read"),
        ],
    }
}

fn macos_invocation(commands: &[String]) -> TerminalInvocation {
    let chained = commands.join("; ");
    let script = chained.replace('"', "\\\"");
    TerminalInvocation {
        program: "osascript".to_string(),
        args: vec![
            "-e".to_string(),
            format!(
                "tell application \"Terminal\" to do script \"{script}; echo; read -p \\\"Press Enter to close\\\"\""
            ),
            "-e".to_string(),
            "tell application \"Terminal\" to activate".to_string(),
        ],
    }
}
