//! flexfringe wrapper
//!
//! Runs the external `flexfringe` state machine learner and loads what it
//! writes back as typed values.
//!
//! This library provides functionality for:
//! - Locating the flexfringe executable and building its command line
//! - Fitting models and reusing them for prediction
//! - Decoding the semicolon delimited prediction result table
//! - Rendering the learned graph with Graphviz and opening it in a viewer
//!
//! ```no_run
//! # async fn demo() -> flexfringe_wrapper::Result<()> {
//! use flexfringe_wrapper::{FlexFringe, Options};
//!
//! let ff = FlexFringe::new(None)?;
//! let model = ff.fit("train.dat", &Options::default()).await?;
//! let table = ff.predict(&model, "test.dat", &Options::default()).await?;
//! println!("{} traces scored", table.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod flexfringe;
pub mod outputs;
pub mod parser;
pub mod render;
pub mod runner;

pub use config::Config;
pub use error::{Error, Result};
pub use flexfringe::{FlexFringe, Options, Session};
pub use outputs::{FittedModel, OutputKind};
pub use parser::{ResultRow, ResultTable};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
///
/// Logs go to stderr so stdout stays usable for JSON and CSV output.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
