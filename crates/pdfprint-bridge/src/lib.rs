// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfprint Bridge — host capability abstractions.
//
// The printer logic never spawns processes or touches the filesystem
// directly; it goes through the traits defined here so it can run against
// the real OS (`SystemBridge`) or, with the `test_utils` feature, a scripted
// one (`RecordingBridge`).

use std::sync::Arc;

#[cfg(any(test, feature = "test_utils"))]
pub mod recording;
pub mod system;
pub mod traits;

#[cfg(any(test, feature = "test_utils"))]
pub use recording::RecordingBridge;
pub use system::SystemBridge;
pub use traits::{BundledPathResolver, CommandExecutor, FileProbe, PlatformBridge};

/// Returns the bridge backed by the running operating system.
pub fn system_bridge() -> Arc<dyn PlatformBridge> {
    Arc::new(SystemBridge)
}
