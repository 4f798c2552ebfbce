//! flexfringe invocation
//!
//! [`FlexFringe`] builds argument vectors, runs the executable through a
//! [`ProcessRunner`] and hands back typed outputs. Fitting returns an
//! immutable [`FittedModel`] that is passed explicitly to `predict`;
//! [`Session`] keeps a "current model" for callers who prefer that style.

use crate::outputs::FittedModel;
use crate::parser::{ResultTable, parse_result_file};
use crate::runner::{self, ProcessOutput, ProcessRunner, SystemRunner};
use crate::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod options;
pub mod session;

pub use options::Options;
pub use session::Session;

/// Handle on a resolved flexfringe executable
#[derive(Clone)]
pub struct FlexFringe {
    executable: PathBuf,
    runner: Arc<dyn ProcessRunner>,
}

impl std::fmt::Debug for FlexFringe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlexFringe")
            .field("executable", &self.executable)
            .finish_non_exhaustive()
    }
}

impl FlexFringe {
    /// Resolve the executable eagerly and run it as a real child process
    pub fn new(explicit: Option<PathBuf>) -> Result<Self> {
        Self::with_runner(explicit, Arc::new(SystemRunner))
    }

    /// Resolve the executable eagerly and run it through `runner`
    pub fn with_runner(explicit: Option<PathBuf>, runner: Arc<dyn ProcessRunner>) -> Result<Self> {
        let executable = runner::resolve_executable(explicit)?;
        Ok(Self::from_parts(executable, runner))
    }

    /// Like [`FlexFringe::with_runner`], searching `path_var` instead of `PATH`
    pub fn with_runner_in(
        explicit: Option<PathBuf>,
        path_var: &OsStr,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self> {
        let executable = runner::resolve_executable_in(explicit, path_var)?;
        Ok(Self::from_parts(executable, runner))
    }

    /// Use an already resolved executable
    pub fn from_parts(executable: impl Into<PathBuf>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            executable: executable.into(),
            runner,
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn runner(&self) -> Arc<dyn ProcessRunner> {
        Arc::clone(&self.runner)
    }

    /// Learn a model from `tracefile`
    ///
    /// The exit code is not checked; a failed run is detected by the
    /// missing graph or model output.
    pub async fn fit(&self, tracefile: impl AsRef<Path>, options: &Options) -> Result<FittedModel> {
        let tracefile = tracefile.as_ref();
        self.invoke_fit(tracefile, options).await?;

        let model = FittedModel::new(tracefile);
        model.validate()?;
        tracing::info!("Fitted model for {:?}", tracefile);
        Ok(model)
    }

    /// Run the fit command without validating outputs
    pub(crate) async fn invoke_fit(&self, tracefile: &Path, options: &Options) -> Result<ProcessOutput> {
        let mut args = vec![tracefile.to_string_lossy().into_owned()];
        args.extend(command_flags(options));
        self.run(args).await
    }

    /// Score `tracefile` against a previously fitted `model`
    ///
    /// `tracefile` is the prediction input; it does not need to be the trace
    /// file the model was fitted on.
    pub async fn predict(
        &self,
        model: &FittedModel,
        tracefile: impl AsRef<Path>,
        options: &Options,
    ) -> Result<ResultTable> {
        let aptafile = model.json_out()?;

        let mut args = vec![
            tracefile.as_ref().to_string_lossy().into_owned(),
            "--mode=predict".to_string(),
            format!("--aptafile={}", aptafile.display()),
        ];
        args.extend(command_flags(options));
        self.run(args).await?;

        parse_result_file(model.result_out()?)
    }

    /// Run flexfringe with raw arguments
    pub async fn run(&self, args: Vec<String>) -> Result<ProcessOutput> {
        tracing::info!("Running: flexfringe {}", args.join(" "));

        let output = self.runner.run(&self.executable, &args).await?;

        tracing::debug!("flexfringe exited with {:?}", output.exit_code);
        tracing::debug!("stdout: {}", output.stdout);
        tracing::debug!("stderr: {}", output.stderr);
        if !output.success() {
            tracing::warn!(
                "flexfringe exited with {:?}: {}",
                output.exit_code,
                output.stderr.trim()
            );
        }

        Ok(output)
    }

    /// `flexfringe --help`
    pub async fn help(&self) -> Result<String> {
        Ok(self.run(vec!["--help".to_string()]).await?.stdout)
    }
}

/// Flags for a run: the reserved options fall back to their defaults
fn command_flags(options: &Options) -> Vec<String> {
    Options::default().merged(options).to_flags()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::outputs::OutputKind;
    use crate::runner::{Invocation, MockRunner};
    use std::path::PathBuf;

    pub const RESULT_TABLE: &str = "row nr; abbadingo trace; state sequence; score sequence; sum scores; mean scores; min score\n\
                                    0; \"1 3 a b c\"; [0,1,2]; [0.1,0.2,0.3]; 0.6; 0.2; 0.1\n";

    fn with_suffix(path: &str, suffix: &str) -> PathBuf {
        PathBuf::from(format!("{}{}", path, suffix))
    }

    /// A runner that behaves like flexfringe: fits write dot and model
    /// files, predictions write the result next to the aptafile
    pub fn fake_flexfringe() -> MockRunner {
        MockRunner::new().on_run(|inv: &Invocation| {
            let Some(trace) = inv.args.first() else {
                return Ok(());
            };
            match inv.args.iter().find_map(|a| a.strip_prefix("--aptafile=")) {
                Some(aptafile) => std::fs::write(with_suffix(aptafile, ".result"), RESULT_TABLE),
                None => {
                    std::fs::write(with_suffix(trace, OutputKind::Dot.suffix()), "digraph {}")?;
                    std::fs::write(with_suffix(trace, OutputKind::Model.suffix()), "{}")
                }
            }
        })
    }
}
