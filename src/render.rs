//! Graph rendering and display
//!
//! Rendering is delegated to Graphviz `dot`, display to the platform image
//! viewer. Both run through the same [`ProcessRunner`] as flexfringe.

use crate::config::RenderConfig;
use crate::outputs::FittedModel;
use crate::runner::ProcessRunner;
use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_FORMAT: &str = "png";

/// Default viewer command for the current platform
pub fn default_viewer() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    }
}

/// Renders a fitted model's graph and opens it in a viewer
pub struct GraphViewer {
    dot_program: PathBuf,
    viewer_program: PathBuf,
    viewer_args: Vec<String>,
    delay: Duration,
    runner: Arc<dyn ProcessRunner>,
}

impl GraphViewer {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            dot_program: PathBuf::from("dot"),
            viewer_program: PathBuf::from(default_viewer()),
            viewer_args: Vec::new(),
            delay: Duration::from_secs(1),
            runner,
        }
    }

    pub fn from_config(config: &RenderConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self::new(runner)
            .with_dot_program(&config.dot_path)
            .with_viewer(&config.viewer, config.viewer_args.clone())
            .with_delay(Duration::from_millis(config.viewer_delay_ms))
    }

    pub fn with_dot_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.dot_program = program.into();
        self
    }

    pub fn with_viewer(mut self, program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        self.viewer_program = program.into();
        self.viewer_args = args;
        self
    }

    /// Time to wait after launching the viewer
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Where the rendered image for `format` ends up
    pub fn image_path(dot: &Path, format: &str) -> PathBuf {
        let mut path = OsString::from(dot.as_os_str());
        path.push(".");
        path.push(format);
        PathBuf::from(path)
    }

    /// Render the model graph to `<dot file>.<format>` and return its path
    pub async fn render(&self, model: &FittedModel, format: &str) -> Result<PathBuf> {
        let dot = model.dot_out()?;
        let image = Self::image_path(&dot, format);

        let args = vec![
            format!("-T{}", format),
            dot.to_string_lossy().into_owned(),
            "-o".to_string(),
            image.to_string_lossy().into_owned(),
        ];
        tracing::info!("Rendering {:?} as {}", dot, format);
        let output = self.runner.run(&self.dot_program, &args).await?;

        if !output.success() {
            return Err(Error::render(format!(
                "{} exited with {:?}: {}",
                self.dot_program.display(),
                output.exit_code,
                output.stderr.trim()
            )));
        }
        if !image.is_file() {
            return Err(Error::render(format!(
                "{} did not write {}",
                self.dot_program.display(),
                image.display()
            )));
        }

        Ok(image)
    }

    /// Open `image` in the viewer, then give it time to start
    ///
    /// The delay is a workaround for viewers that detach immediately; it does
    /// not guarantee the window is up.
    pub async fn open(&self, image: &Path) -> Result<()> {
        let mut args = self.viewer_args.clone();
        args.push(image.to_string_lossy().into_owned());

        tracing::info!("Opening {:?} with {:?}", image, self.viewer_program);
        let output = self.runner.run(&self.viewer_program, &args).await?;
        if !output.success() {
            tracing::warn!(
                "Viewer exited with {:?}: {}",
                output.exit_code,
                output.stderr.trim()
            );
        }

        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    /// Render the model graph and display it
    pub async fn show(&self, model: &FittedModel, format: &str) -> Result<PathBuf> {
        let image = self.render(model, format).await?;
        self.open(&image).await?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::OutputKind;
    use crate::runner::{Invocation, MockRunner};

    /// Emulates `dot -T<fmt> <in> -o <out>` by writing the output file
    fn fake_dot() -> MockRunner {
        MockRunner::new().on_run(|inv: &Invocation| {
            if let Some(pos) = inv.args.iter().position(|a| a == "-o") {
                std::fs::write(&inv.args[pos + 1], b"\x89PNG")?;
            }
            Ok(())
        })
    }

    fn fitted(dir: &Path) -> FittedModel {
        let model = FittedModel::new(dir.join("train.dat"));
        std::fs::write(model.expected_path(OutputKind::Dot), "digraph {}").unwrap();
        model
    }

    #[tokio::test]
    async fn test_show_renders_then_opens() {
        let dir = tempfile::tempdir().unwrap();
        let model = fitted(dir.path());
        let runner = Arc::new(fake_dot());
        let viewer = GraphViewer::new(runner.clone())
            .with_viewer("feh", vec!["--scale-down".to_string()])
            .with_delay(Duration::ZERO);

        let image = viewer.show(&model, "png").await.unwrap();
        let dot = model.dot_out().unwrap();
        assert_eq!(image, GraphViewer::image_path(&dot, "png"));
        assert!(image.is_file());

        let calls = runner.invocations();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, PathBuf::from("dot"));
        assert_eq!(calls[0].args[0], "-Tpng");
        assert_eq!(calls[1].program, PathBuf::from("feh"));
        assert_eq!(
            calls[1].args,
            vec!["--scale-down".to_string(), image.to_string_lossy().into_owned()]
        );
    }

    #[tokio::test]
    async fn test_render_failure_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let model = fitted(dir.path());
        let runner = Arc::new(MockRunner::new().with_output(crate::runner::ProcessOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "Format: \"bogus\" not recognized".to_string(),
        }));
        let viewer = GraphViewer::new(runner).with_delay(Duration::ZERO);

        let err = viewer.render(&model, "bogus").await.unwrap_err();
        assert!(matches!(err, Error::Render(_)));
        assert!(err.to_string().contains("not recognized"));
    }

    #[tokio::test]
    async fn test_render_requires_dot_output() {
        let dir = tempfile::tempdir().unwrap();
        let model = FittedModel::new(dir.path().join("train.dat"));
        let viewer = GraphViewer::new(Arc::new(fake_dot())).with_delay(Duration::ZERO);

        assert!(viewer.render(&model, "svg").await.unwrap_err().is_missing_output());
    }

    #[test]
    fn test_from_config() {
        let config = RenderConfig {
            viewer: "eog".to_string(),
            viewer_delay_ms: 0,
            ..Default::default()
        };
        let viewer = GraphViewer::from_config(&config, Arc::new(MockRunner::new()));
        assert_eq!(viewer.viewer_program, PathBuf::from("eog"));
        assert_eq!(viewer.delay, Duration::ZERO);
    }
}
