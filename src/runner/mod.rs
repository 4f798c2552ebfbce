//! Process runner module - Abstraction for invoking external executables
//!
//! flexfringe, `dot` and the image viewer are all reached through the
//! [`ProcessRunner`] trait so that tests can swap in [`mock::MockRunner`]
//! instead of spawning real binaries.

use crate::{Error, Result};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub mod mock;

pub use mock::{Invocation, MockRunner};

/// Name of the executable looked up on the search path
pub const EXECUTABLE_NAME: &str = "flexfringe";

/// Exit status and captured streams of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs an external program to completion
///
/// Implementations:
/// - `SystemRunner`: spawns a real child process
/// - `MockRunner`: records invocations for tests
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args`, wait for it to exit and capture its streams.
    ///
    /// A non-zero exit code is reported in the output, not as an error. Only
    /// a failure to start the process is an error.
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput>;
}

/// Runner that spawns real processes through tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| Error::Launch {
                program: program.to_path_buf(),
                source,
            })?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Resolve the flexfringe executable from an explicit path or the `PATH`
///
/// An explicit path is taken as-is; if it is wrong, the failure surfaces as
/// [`Error::Launch`] on first use.
pub fn resolve_executable(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    resolve_executable_in(explicit, &path_var)
}

/// Same as [`resolve_executable`] but searching the given search path value
pub fn resolve_executable_in(explicit: Option<PathBuf>, path_var: &OsStr) -> Result<PathBuf> {
    if let Some(path) = explicit {
        tracing::debug!("Using explicit flexfringe path {:?}", path);
        return Ok(path);
    }

    match find_in_path(EXECUTABLE_NAME, path_var) {
        Some(path) => {
            tracing::debug!("Found flexfringe at {:?}", path);
            Ok(path)
        }
        None => Err(Error::ExecutableNotFound),
    }
}

/// Search each directory of `path_var` for an executable file called `name`
pub fn find_in_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    let file_name = if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    };

    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(&file_name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
