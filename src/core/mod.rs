pub mod engine;
pub mod probe;
pub mod report;

pub use crate::domain::model::{ProbeReport, QueryRequest};
pub use crate::domain::ports::{ConfigProvider, Probe};
pub use crate::utils::error::Result;
