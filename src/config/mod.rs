pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::parse_header_arg;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::ProbeSettings;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "stream-probe")]
#[command(about = "Time how quickly a query server starts streaming its response")]
pub struct CliConfig {
    #[arg(long, help = "Query endpoint [default: http://localhost:8000/query]")]
    pub endpoint: Option<String>,

    #[arg(long, help = "SQL sent to the server [default: SELECT pg_sleep(2)]")]
    pub query: Option<String>,

    #[arg(long, help = "Row limit [default: 10]")]
    pub limit: Option<u64>,

    #[arg(long)]
    pub offset: Option<u64>,

    #[arg(long)]
    pub query_id: Option<String>,

    #[arg(long, help = "Abort the request after this many seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Send a cancel request for the query after this delay")]
    pub cancel_after_ms: Option<u64>,

    #[arg(long = "header", short = 'H', help = "Extra request header, `Name: value`")]
    pub headers: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "TOML file with [target] and [request] sections")]
    pub config: Option<String>,

    #[arg(long, help = "Exit with status 2 when the probe fails")]
    pub fail_on_error: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Flags win over the config file, which wins over the built-in defaults.
    pub fn resolve(&self) -> Result<ProbeSettings> {
        let mut settings = ProbeSettings::default();

        if let Some(path) = &self.config {
            settings = settings.apply_file(&TomlConfig::from_file(path)?);
        }

        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(query) = &self.query {
            settings.query = query.clone();
        }
        if let Some(limit) = self.limit {
            settings.limit = limit;
        }
        if self.offset.is_some() {
            settings.offset = self.offset;
        }
        if self.query_id.is_some() {
            settings.query_id = self.query_id.clone();
        }
        if self.timeout_seconds.is_some() {
            settings.timeout_seconds = self.timeout_seconds;
        }
        if self.cancel_after_ms.is_some() {
            settings.cancel_after_ms = self.cancel_after_ms;
        }
        for raw in &self.headers {
            settings.headers.push(parse_header_arg(raw)?);
        }

        Ok(settings)
    }
}
