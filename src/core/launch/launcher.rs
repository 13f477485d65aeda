// ─── Process Launchers ───
// How the Gradle wrapper is started and stopped on the current host.
// Chosen once at startup by `host_launcher`.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::core::error::{ActionError, ActionResult};

#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Human-readable program name for logs and spawn errors.
    fn program(&self) -> String;

    /// Build the command for `args`, run from `project_dir`.
    fn command(&self, project_dir: &Path, args: &[String]) -> Command;

    /// Stop `child` early. Must not wait for it to exit.
    async fn terminate(&self, child: &mut Child) -> ActionResult<()>;
}

/// Runs the project's `gradlew` directly and stops it with a kill signal.
pub struct DirectLauncher;

#[async_trait]
impl ProcessLauncher for DirectLauncher {
    fn program(&self) -> String {
        "./gradlew".into()
    }

    fn command(&self, project_dir: &Path, args: &[String]) -> Command {
        // The program path must not depend on current_dir.
        let root = std::path::absolute(project_dir).unwrap_or_else(|_| project_dir.to_path_buf());
        let mut cmd = Command::new(root.join("gradlew"));
        cmd.args(args).current_dir(&root);
        cmd
    }

    async fn terminate(&self, child: &mut Child) -> ActionResult<()> {
        let pid = child.id().unwrap_or_default();
        child.start_kill().map_err(|e| ActionError::ProcessKill {
            pid,
            reason: e.to_string(),
        })
    }
}

/// Runs `gradlew.bat` through `cmd /C`.
///
/// Killing the `cmd` wrapper leaves the Gradle JVM alive, so the whole tree
/// is taken down with `taskkill /T /F`.
pub struct ShellLauncher;

#[async_trait]
impl ProcessLauncher for ShellLauncher {
    fn program(&self) -> String {
        "cmd /C gradlew.bat".into()
    }

    fn command(&self, project_dir: &Path, args: &[String]) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C")
            .arg("gradlew.bat")
            .args(args)
            .current_dir(project_dir);
        cmd
    }

    async fn terminate(&self, child: &mut Child) -> ActionResult<()> {
        // Already reaped: nothing left to kill.
        let Some(pid) = child.id() else {
            return Ok(());
        };

        let status = Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/T", "/F"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| ActionError::ProcessKill {
                pid,
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ActionError::ProcessKill {
                pid,
                reason: format!("taskkill returned {:?}", status.code()),
            });
        }

        debug!("Killed process tree rooted at {}", pid);
        Ok(())
    }
}

/// The launcher for the platform this binary runs on.
pub fn host_launcher() -> Box<dyn ProcessLauncher> {
    if cfg!(target_os = "windows") {
        Box::new(ShellLauncher)
    } else {
        Box::new(DirectLauncher)
    }
}

pub(crate) fn format_command_for_logs(cmd: &Command) -> String {
    let cmd = cmd.as_std();
    let program = shell_escape(&cmd.get_program().to_string_lossy());
    let args = cmd
        .get_args()
        .map(|arg| shell_escape(&arg.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ");

    if args.is_empty() {
        program
    } else {
        format!("{} {}", program, args)
    }
}

fn shell_escape(raw: &str) -> String {
    if raw.is_empty() {
        return "\"\"".to_string();
    }

    if raw.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '\\' | '=' | '+')
    }) {
        return raw.to_string();
    }

    format!("\"{}\"", raw.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Vec<String> {
        vec!["build".into(), "--refresh-dependencies".into()]
    }

    #[cfg(unix)]
    #[test]
    fn direct_launcher_runs_wrapper_in_project_dir() {
        let cmd = DirectLauncher.command(Path::new("/work/mod"), &args());
        let std_cmd = cmd.as_std();
        assert_eq!(
            std_cmd.get_program(),
            Path::new("/work/mod").join("gradlew").as_os_str()
        );
        assert_eq!(std_cmd.get_current_dir(), Some(Path::new("/work/mod")));
        assert_eq!(std_cmd.get_args().count(), 2);
    }

    #[test]
    fn direct_launcher_makes_relative_project_absolute() {
        let cmd = DirectLauncher.command(Path::new("mods/demo"), &args());
        let program = Path::new(cmd.as_std().get_program());
        assert!(program.is_absolute());
        assert!(program.ends_with("mods/demo/gradlew"));
        assert_eq!(cmd.as_std().get_current_dir(), program.parent());
    }

    #[test]
    fn shell_launcher_wraps_batch_file() {
        let cmd = ShellLauncher.command(Path::new("C:/work/mod"), &args());
        assert_eq!(
            format_command_for_logs(&cmd),
            "cmd /C gradlew.bat build --refresh-dependencies"
        );
    }

    #[test]
    fn shell_escape_quotes_spaces() {
        assert_eq!(
            shell_escape("-Pfabric_version=0.5.1+build.294-1.15"),
            "-Pfabric_version=0.5.1+build.294-1.15"
        );
        assert_eq!(shell_escape("a b"), "\"a b\"");
        assert_eq!(shell_escape(""), "\"\"");
    }

    #[test]
    fn host_launcher_matches_platform() {
        let expected = if cfg!(target_os = "windows") {
            "cmd /C gradlew.bat"
        } else {
            "./gradlew"
        };
        assert_eq!(host_launcher().program(), expected);
    }
}
