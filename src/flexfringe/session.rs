//! Stateful wrapper that remembers the most recent fit

use super::{FlexFringe, Options};
use crate::outputs::FittedModel;
use crate::parser::ResultTable;
use crate::render::GraphViewer;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// A [`FlexFringe`] plus the model of the last `fit`
///
/// Every `fit` replaces the current model; only one model is tracked at a
/// time. Use [`FlexFringe`] directly to work with several models at once.
#[derive(Debug)]
pub struct Session {
    flexfringe: FlexFringe,
    current: Option<FittedModel>,
}

impl Session {
    pub fn new(flexfringe: FlexFringe) -> Self {
        Self {
            flexfringe,
            current: None,
        }
    }

    pub fn flexfringe(&self) -> &FlexFringe {
        &self.flexfringe
    }

    /// The model of the last fit, if any
    pub fn current(&self) -> Option<&FittedModel> {
        self.current.as_ref()
    }

    fn require_model(&self) -> Result<&FittedModel> {
        self.current.as_ref().ok_or_else(Error::no_tracefile)
    }

    /// Fit `tracefile` and make it the current model
    ///
    /// The trace file becomes current as soon as flexfringe has run, even if
    /// the output check that follows fails.
    pub async fn fit(&mut self, tracefile: impl AsRef<Path>, options: &Options) -> Result<&FittedModel> {
        let tracefile = tracefile.as_ref();
        self.flexfringe.invoke_fit(tracefile, options).await?;

        let model = self.current.insert(FittedModel::new(tracefile));
        model.validate()?;
        Ok(&*model)
    }

    /// Predict `tracefile` with the current model
    pub async fn predict(&self, tracefile: impl AsRef<Path>, options: &Options) -> Result<ResultTable> {
        let model = self.require_model()?;
        self.flexfringe.predict(model, tracefile, options).await
    }

    pub fn dot_out(&self) -> Result<PathBuf> {
        self.require_model()?.dot_out()
    }

    pub fn json_out(&self) -> Result<PathBuf> {
        self.require_model()?.json_out()
    }

    pub fn result_out(&self) -> Result<PathBuf> {
        self.require_model()?.result_out()
    }

    /// Render and display the current model's graph
    pub async fn show(&self, viewer: &GraphViewer, format: &str) -> Result<PathBuf> {
        let model = self.require_model()?;
        viewer.show(model, format).await
    }
}
