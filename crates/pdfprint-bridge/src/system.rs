// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host bridge backed by the real OS: `tokio::process` for commands, `std::fs`
// for existence checks and the executable's directory for bundled tools.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use pdfprint_core::error::{PdfPrintError, Result};

use crate::traits::*;

/// Environment variable that overrides where bundled tools are looked up.
pub const BUNDLE_DIR_ENV: &str = "PDFPRINT_HOME";

/// Bridge used by the CLI and by library callers that don't inject their own.
#[derive(Debug, Clone, Default)]
pub struct SystemBridge;

impl PlatformBridge for SystemBridge {
    fn platform_name(&self) -> &str {
        "system"
    }
}

#[async_trait]
impl CommandExecutor for SystemBridge {
    async fn execute(&self, program: &str, args: &[String]) -> Result<String> {
        self.execute_with_env(program, args, &[]).await
    }

    async fn execute_with_env(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<String> {
        info!(program, args = ?args, env = ?env, "running command");

        let output = Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| PdfPrintError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            warn!(program, status = %output.status, "command failed");
            return Err(PdfPrintError::CommandFailed {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: if stderr.is_empty() {
                    "no stderr output".to_string()
                } else {
                    stderr
                },
            });
        }

        debug!(program, bytes = stdout.len(), "command finished");
        Ok(stdout)
    }
}

impl FileProbe for SystemBridge {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl BundledPathResolver for SystemBridge {
    fn resolve(&self, relative: &str) -> PathBuf {
        let base = std::env::var_os(BUNDLE_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf))
            })
            .unwrap_or_default();
        unpack_archive_path(&base.join(relative))
    }
}

/// Rewrite an `app.asar` path component to `app.asar.unpacked`.
///
/// Executables cannot be spawned from inside an Electron archive, so when
/// pdfprint is embedded in one the helper lives in the unpacked sibling.
pub fn unpack_archive_path(path: &Path) -> PathBuf {
    path.components()
        .map(|c| match c {
            Component::Normal(name) if name == "app.asar" => OsStr::new("app.asar.unpacked"),
            other => other.as_os_str(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asar_component_is_unpacked() {
        let p = Path::new("/opt/app/resources/app.asar/node_modules/pdfprint/SumatraPDF.exe");
        assert_eq!(
            unpack_archive_path(p),
            PathBuf::from("/opt/app/resources/app.asar.unpacked/node_modules/pdfprint/SumatraPDF.exe")
        );
    }

    #[test]
    fn plain_path_is_untouched() {
        let p = Path::new("/usr/lib/pdfprint/app.asar.bak/SumatraPDF.exe");
        assert_eq!(unpack_archive_path(p), p.to_path_buf());
    }

    #[test]
    fn exists_follows_the_filesystem() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        assert!(SystemBridge.exists(file.path()));
        assert!(!SystemBridge.exists(&file.path().with_extension("missing")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_returns_stdout() {
        let out = SystemBridge
            .execute("sh", &["-c".to_string(), "printf 'Name\\nZebra\\n'".to_string()])
            .await
            .expect("sh should run");
        assert_eq!(out, "Name\nZebra\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_command_failed() {
        let err = SystemBridge
            .execute("sh", &["-c".to_string(), "echo boom >&2; exit 3".to_string()])
            .await
            .unwrap_err();
        match err {
            PdfPrintError::CommandFailed { program, stderr, .. } => {
                assert_eq!(program, "sh");
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn env_overrides_reach_the_child() {
        let env = [("LC_ALL".to_string(), "C".to_string())];
        let out = SystemBridge
            .execute_with_env("sh", &["-c".to_string(), "printf %s \"$LC_ALL\"".to_string()], &env)
            .await
            .expect("sh should run");
        assert_eq!(out, "C");
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let err = SystemBridge
            .execute("pdfprint-definitely-not-installed", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, PdfPrintError::Spawn { .. }));
    }
}
