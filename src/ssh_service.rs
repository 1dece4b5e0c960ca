use std::fmt;
use std::process::Command;

use crate::error::{MenuError, Result};
use crate::models::HostEntry;
use crate::store::EntryStore;

pub const SSH: &str = "ssh";
const FALLBACK_SHELL: &str = "/bin/bash";

/// Program plus the arguments that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchCommand {
    /// `ssh [-i key] [user@]target` for a configured host.
    pub fn ssh(entry: &HostEntry) -> Self {
        let mut args = Vec::with_capacity(3);
        if !entry.key.is_empty() {
            args.push("-i".to_string());
            args.push(entry.key.clone());
        }
        args.push(entry.destination());

        Self {
            program: SSH.to_string(),
            args,
        }
    }

    /// An interactive shell with no arguments.
    pub fn shell(shell: &str) -> Self {
        Self {
            program: shell.to_string(),
            args: Vec::new(),
        }
    }

    /// Full argument vector, program first.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// The irreversible last step: turn this process into `command`.
pub trait Handoff {
    /// Only returns when the hand-off could not happen.
    fn hand_off(&mut self, command: &LaunchCommand) -> Result<()>;
}

/// Replaces the current process image.
pub struct ExecHandoff;

impl Handoff for ExecHandoff {
    #[cfg(unix)]
    fn hand_off(&mut self, command: &LaunchCommand) -> Result<()> {
        use std::os::unix::process::CommandExt;

        let source = Command::new(&command.program).args(&command.args).exec();
        Err(MenuError::Launch {
            program: command.program.clone(),
            source,
        })
    }

    #[cfg(not(unix))]
    fn hand_off(&mut self, command: &LaunchCommand) -> Result<()> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|source| MenuError::Launch {
                program: command.program.clone(),
                source,
            })?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

pub struct Launcher<H> {
    shell: String,
    handoff: H,
}

impl Launcher<ExecHandoff> {
    /// Execs for real; localhost gets `$SHELL`, or bash when it is unset.
    pub fn new() -> Self {
        let shell = std::env::var("SHELL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_SHELL.to_string());
        Self::with_handoff(shell, ExecHandoff)
    }
}

impl<H: Handoff> Launcher<H> {
    pub fn with_handoff(shell: String, handoff: H) -> Self {
        Self { shell, handoff }
    }

    pub fn command_for(&self, store: &EntryStore, selected: usize) -> Result<LaunchCommand> {
        let entry = store.get(selected).ok_or(MenuError::NoSuchEntry(selected))?;
        if store.is_localhost(selected) {
            Ok(LaunchCommand::shell(&self.shell))
        } else {
            Ok(LaunchCommand::ssh(entry))
        }
    }

    #[cfg(test)]
    pub fn handoff(&self) -> &H {
        &self.handoff
    }

    pub fn launch(&mut self, store: &EntryStore, selected: usize) -> Result<()> {
        let command = self.command_for(store, selected)?;
        tracing::info!("Handing off to: {}", command);
        self.handoff.hand_off(&command).inspect_err(|e| {
            tracing::error!("Hand-off failed: {}", e);
        })
    }
}

/// Records commands instead of running them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingHandoff {
    pub launched: Vec<LaunchCommand>,
}

#[cfg(test)]
impl Handoff for RecordingHandoff {
    fn hand_off(&mut self, command: &LaunchCommand) -> Result<()> {
        self.launched.push(command.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Failing;

    impl Handoff for Failing {
        fn hand_off(&mut self, command: &LaunchCommand) -> Result<()> {
            Err(MenuError::Launch {
                program: command.program.clone(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
        }
    }

    fn host(user: &str, key: &str) -> HostEntry {
        HostEntry {
            name: "web".into(),
            host: "web01".into(),
            user: user.into(),
            fqdn: "web.example.org".into(),
            key: key.into(),
            ..HostEntry::default()
        }
    }

    #[test]
    fn bare_target_without_user_or_key() {
        assert_eq!(LaunchCommand::ssh(&host("", "")).argv(), ["ssh", "web.example.org"]);
    }

    #[test]
    fn user_is_prefixed_to_target() {
        assert_eq!(
            LaunchCommand::ssh(&host("deploy", "")).argv(),
            ["ssh", "deploy@web.example.org"]
        );
    }

    #[test]
    fn identity_file_comes_right_after_ssh() {
        assert_eq!(
            LaunchCommand::ssh(&host("deploy", "~/.ssh/web")).argv(),
            ["ssh", "-i", "~/.ssh/web", "deploy@web.example.org"]
        );
        assert_eq!(
            LaunchCommand::ssh(&host("", "~/.ssh/web")).argv(),
            ["ssh", "-i", "~/.ssh/web", "web.example.org"]
        );
    }

    #[test]
    fn localhost_launches_the_shell() {
        let store = EntryStore::with_login(vec![host("deploy", "")], Some("alice".into()));
        let mut launcher = Launcher::with_handoff("/bin/zsh".into(), RecordingHandoff::default());

        launcher.launch(&store, 1).unwrap();
        assert_eq!(launcher.handoff.launched, [LaunchCommand::shell("/bin/zsh")]);
        assert_eq!(launcher.handoff.launched[0].argv(), ["/bin/zsh"]);
    }

    #[test]
    fn remote_entry_launches_ssh() {
        let store = EntryStore::with_login(vec![host("deploy", "")], None);
        let mut launcher = Launcher::with_handoff("/bin/sh".into(), RecordingHandoff::default());

        launcher.launch(&store, 2).unwrap();
        assert_eq!(launcher.handoff.launched[0].to_string(), "ssh deploy@web.example.org");
    }

    #[test]
    fn unknown_position_is_rejected() {
        let store = EntryStore::with_login(Vec::new(), None);
        let mut launcher = Launcher::with_handoff("/bin/sh".into(), RecordingHandoff::default());

        assert!(matches!(launcher.launch(&store, 2), Err(MenuError::NoSuchEntry(2))));
        assert!(launcher.handoff.launched.is_empty());
    }

    #[test]
    fn handoff_failure_is_surfaced() {
        let store = EntryStore::with_login(vec![host("", "")], None);
        let mut launcher = Launcher::with_handoff("/bin/sh".into(), Failing);

        let err = launcher.launch(&store, 2).unwrap_err();
        assert!(matches!(&err, MenuError::Launch { program, .. } if program == "ssh"));
    }

    #[cfg(unix)]
    #[test]
    fn exec_of_missing_program_returns_error() {
        let command = LaunchCommand::shell("/nonexistent/ssh-menu-test-shell");
        let err = ExecHandoff.hand_off(&command).unwrap_err();
        assert!(matches!(err, MenuError::Launch { .. }));
    }
}
