//! Mock process runner for testing and development
//!
//! Records every invocation instead of spawning anything. A hook can be
//! attached to emulate the files an external program would have written.

use super::{ProcessOutput, ProcessRunner};
use crate::{Error, Result};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A single recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

type Hook = Box<dyn Fn(&Invocation) -> io::Result<()> + Send + Sync>;

/// Runner that records invocations and returns a canned output
pub struct MockRunner {
    invocations: Mutex<Vec<Invocation>>,
    output: ProcessOutput,
    fail_launch: bool,
    hook: Option<Hook>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            output: ProcessOutput {
                exit_code: Some(0),
                ..Default::default()
            },
            fail_launch: false,
            hook: None,
        }
    }

    /// Set the output returned from every run
    pub fn with_output(mut self, output: ProcessOutput) -> Self {
        self.output = output;
        self
    }

    /// Report the given exit code from every run
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.output.exit_code = Some(code);
        self
    }

    /// Make every run fail as if the program could not be started
    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// Run `hook` for every invocation, e.g. to write fake output files
    pub fn on_run<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Invocation) -> io::Result<()> + Send + Sync + 'static,
    {
        self.hook = Some(Box::new(hook));
        self
    }

    /// All invocations seen so far, oldest first
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn last_invocation(&self) -> Option<Invocation> {
        self.invocations().pop()
    }
}

#[async_trait]
impl ProcessRunner for MockRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput> {
        let invocation = Invocation {
            program: program.to_path_buf(),
            args: args.to_vec(),
        };

        if let Ok(mut calls) = self.invocations.lock() {
            calls.push(invocation.clone());
        }

        if self.fail_launch {
            return Err(Error::Launch {
                program: invocation.program,
                source: io::Error::new(io::ErrorKind::NotFound, "mock launch failure"),
            });
        }

        if let Some(hook) = &self.hook {
            hook(&invocation)?;
        }

        Ok(self.output.clone())
    }
}
