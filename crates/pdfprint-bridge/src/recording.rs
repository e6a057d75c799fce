// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory bridge for tests.
//
// Every command is recorded instead of executed and answered with a canned
// stdout (or a canned failure). File existence and bundled paths are fixed up
// front, so printer logic can be exercised without touching the OS.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use pdfprint_core::error::{PdfPrintError, Result};
use pdfprint_core::types::CommandInvocation;

use crate::traits::*;

/// Canned answer for [`RecordingBridge::execute`].
#[derive(Debug, Clone)]
enum Reply {
    Stdout(String),
    Fail { status: String, stderr: String },
}

/// Bridge that records commands rather than running them.
#[derive(Debug)]
pub struct RecordingBridge {
    calls: Mutex<Vec<CommandInvocation>>,
    reply: Reply,
    files_exist: bool,
    bundle_dir: PathBuf,
}

impl Default for RecordingBridge {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Reply::Stdout(String::new()),
            files_exist: true,
            bundle_dir: PathBuf::from("bundled"),
        }
    }
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every command with `stdout`.
    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.reply = Reply::Stdout(stdout.into());
        self
    }

    /// Fail every command as if it exited non-zero.
    pub fn with_failure(mut self, status: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.reply = Reply::Fail {
            status: status.into(),
            stderr: stderr.into(),
        };
        self
    }

    /// Make [`FileProbe::exists`] report `exists` for every path.
    pub fn with_files_existing(mut self, exists: bool) -> Self {
        self.files_exist = exists;
        self
    }

    /// Directory that bundled tools resolve into.
    pub fn with_bundle_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundle_dir = dir.into();
        self
    }

    /// Snapshot of every command executed so far, in order.
    pub fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.lock().expect("call log lock poisoned").clone()
    }

    /// The most recent command, if any.
    pub fn last_call(&self) -> Option<CommandInvocation> {
        self.calls.lock().expect("call log lock poisoned").last().cloned()
    }
}

impl PlatformBridge for RecordingBridge {
    fn platform_name(&self) -> &str {
        "recording"
    }
}

#[async_trait]
impl CommandExecutor for RecordingBridge {
    async fn execute(&self, program: &str, args: &[String]) -> Result<String> {
        self.execute_with_env(program, args, &[]).await
    }

    async fn execute_with_env(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<String> {
        debug!(program, args = ?args, "recording command");
        self.calls
            .lock()
            .expect("call log lock poisoned")
            .push(CommandInvocation {
                program: program.to_string(),
                args: args.to_vec(),
                env: env.to_vec(),
            });

        match &self.reply {
            Reply::Stdout(out) => Ok(out.clone()),
            Reply::Fail { status, stderr } => Err(PdfPrintError::CommandFailed {
                program: program.to_string(),
                status: status.clone(),
                stderr: stderr.clone(),
            }),
        }
    }
}

impl FileProbe for RecordingBridge {
    fn exists(&self, _path: &Path) -> bool {
        self.files_exist
    }
}

impl BundledPathResolver for RecordingBridge {
    fn resolve(&self, relative: &str) -> PathBuf {
        self.bundle_dir.join(relative)
    }
}
