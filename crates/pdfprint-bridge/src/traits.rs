// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the capabilities pdfprint borrows
// from the host: running a command, checking a file, locating bundled tools.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pdfprint_core::error::Result;

/// Unified bridge that groups every host capability the printer needs.
pub trait PlatformBridge: CommandExecutor + FileProbe + BundledPathResolver {
    /// Human-readable bridge name (e.g. "system", "recording").
    fn platform_name(&self) -> &str;
}

/// Run an external program and collect its standard output.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` and return its stdout.
    ///
    /// Spawn failures and non-zero exits are errors; the caller passes them
    /// on unchanged.
    async fn execute(&self, program: &str, args: &[String]) -> Result<String>;

    /// Like [`CommandExecutor::execute`], with extra environment variables
    /// set for the child. Executors that cannot set an environment run the
    /// command unchanged.
    async fn execute_with_env(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> Result<String> {
        let _ = env;
        self.execute(program, args).await
    }
}

/// Filesystem existence checks.
pub trait FileProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Locate helper executables shipped alongside pdfprint.
pub trait BundledPathResolver: Send + Sync {
    /// Resolve `relative` (e.g. `SumatraPDF.exe`) to an absolute location.
    fn resolve(&self, relative: &str) -> PathBuf;
}
