pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::settings::ProbeSettings;
pub use crate::core::{
    engine::{ProbeEngine, ProbeOutcome},
    probe::HttpProbe,
    report::OutputFormat,
};
pub use utils::error::{ProbeError, Result};
