//! Output file resolution
//!
//! flexfringe writes its artifacts next to the trace file by appending fixed
//! suffixes. [`FittedModel`] ties a trace file to those derived paths.
//!
//! Two fits on the same trace file path write the same files; nothing here
//! guards against that.

use crate::{Error, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// The artifacts flexfringe derives from a trace file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Graph description in Graphviz DOT
    Dot,
    /// Model state, reused as `--aptafile` when predicting
    Model,
    /// Semicolon-delimited prediction results
    Result,
}

impl OutputKind {
    pub const ALL: [OutputKind; 3] = [OutputKind::Dot, OutputKind::Model, OutputKind::Result];

    pub fn suffix(&self) -> &'static str {
        match self {
            OutputKind::Dot => ".ff.final.dot",
            OutputKind::Model => ".ff.final.json",
            OutputKind::Result => ".ff.final.json.result",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputKind::Dot => "dot",
            OutputKind::Model => "model",
            OutputKind::Result => "result",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A trace file that flexfringe has been fitted on
///
/// Accessors re-check the filesystem on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FittedModel {
    tracefile: PathBuf,
}

impl FittedModel {
    /// Wrap a trace file without touching the filesystem
    pub fn new(tracefile: impl Into<PathBuf>) -> Self {
        Self {
            tracefile: tracefile.into(),
        }
    }

    /// Reuse the outputs of an earlier fit of `tracefile`
    pub fn locate(tracefile: impl Into<PathBuf>) -> Result<Self> {
        let model = Self::new(tracefile);
        model.validate()?;
        Ok(model)
    }

    pub fn tracefile(&self) -> &Path {
        &self.tracefile
    }

    /// `<tracefile><suffix>`, whether or not it exists
    pub fn expected_path(&self, kind: OutputKind) -> PathBuf {
        let mut path = OsString::from(self.tracefile.as_os_str());
        path.push(kind.suffix());
        PathBuf::from(path)
    }

    /// The derived path, if it exists and is a regular file
    pub fn output(&self, kind: OutputKind) -> Result<PathBuf> {
        let path = self.expected_path(kind);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::MissingOutput(path))
        }
    }

    pub fn dot_out(&self) -> Result<PathBuf> {
        self.output(OutputKind::Dot)
    }

    pub fn json_out(&self) -> Result<PathBuf> {
        self.output(OutputKind::Model)
    }

    pub fn result_out(&self) -> Result<PathBuf> {
        self.output(OutputKind::Result)
    }

    /// Check the outputs every fit must produce: graph first, then model
    pub fn validate(&self) -> Result<()> {
        self.dot_out()?;
        self.json_out()?;
        Ok(())
    }
}
