//! Configuration for the client balance report

use anyhow::{Context, Result};
use balance_core::{AgentDirectory, AgentEntry, CurrencyFormat, FieldNames, ReportOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::constants;
use crate::source::DataSource;

// =============================================================================
// File-based Configuration (config.toml)
// =============================================================================

/// Configuration loaded from config.toml. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub source: SourceConfig,
    pub fields: FieldNames,
    pub report: ReportConfig,
    pub currency: CurrencyFormat,
    pub agents: Vec<AgentEntry>,
}

/// Client list endpoint settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Printed report settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    /// Where printed reports are written (system temp dir when unset)
    pub output_dir: Option<PathBuf>,
    /// Open the written report in the system browser
    pub open_browser: bool,
    /// Ask the browser to print as soon as the report loads
    pub print_on_load: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: constants::DEFAULT_REPORT_TITLE.to_string(),
            output_dir: None,
            open_browser: true,
            print_on_load: true,
        }
    }
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| {
            "Invalid configuration. Check for:\n\
             - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
             - Incorrect data types (strings vs numbers)\n\
             - [[agents]] entries missing `code` or `name`"
        })
    }

    /// Load `path` if given (it must exist), else the default file if present,
    /// else built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(constants::CONFIG_FILE);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            info!("no {} found, using built-in defaults", constants::CONFIG_FILE);
            Ok(Self::default())
        }
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Command-line overrides applied on top of the file config
#[derive(Debug, Default)]
pub struct Overrides {
    pub source_url: Option<String>,
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub no_open: bool,
}

/// Main configuration struct with resolved values
pub struct Config {
    /// Where client records are loaded from
    pub source: DataSource,
    /// Agent code -> display name table
    pub directory: AgentDirectory,
    /// Source field names
    pub fields: FieldNames,
    pub report_title: String,
    pub output_dir: PathBuf,
    pub open_browser: bool,
    pub print_on_load: bool,
    pub currency: CurrencyFormat,
}

impl Config {
    /// Create config from file config and command-line overrides
    pub fn from_file(file_config: FileConfig, overrides: Overrides) -> Self {
        let FileConfig {
            source,
            fields,
            report,
            currency,
            agents,
        } = file_config;

        // A local file wins over any URL
        let source = match overrides.input {
            Some(path) => DataSource::File(path),
            None => DataSource::Http {
                url: overrides.source_url.unwrap_or(source.url),
                timeout: Duration::from_secs(source.timeout_secs),
            },
        };

        // Built-in table unless config.toml lists agents
        let directory = if agents.is_empty() {
            AgentDirectory::from_pairs(constants::DEFAULT_AGENTS.iter().copied())
        } else {
            AgentDirectory::new(agents)
        };

        Self {
            source,
            directory,
            fields,
            report_title: report.title,
            output_dir: overrides
                .output_dir
                .or(report.output_dir)
                .unwrap_or_else(std::env::temp_dir),
            open_browser: report.open_browser && !overrides.no_open,
            print_on_load: report.print_on_load,
            currency,
        }
    }

    /// Layout for the printed report, with an optional caption line
    pub fn report_options(&self, caption: Option<String>) -> ReportOptions {
        ReportOptions {
            title: self.report_title.clone(),
            currency: self.currency.clone(),
            caption,
            print_on_load: self.print_on_load,
            ..ReportOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balance_core::currency::SymbolPosition;

    #[test]
    fn test_empty_config_uses_defaults() {
        let file = FileConfig::parse("").unwrap();
        assert_eq!(file.source.url, constants::DEFAULT_SOURCE_URL);
        assert_eq!(file.source.timeout_secs, constants::DEFAULT_TIMEOUT_SECS);
        assert_eq!(file.fields, FieldNames::default());
        assert!(file.report.open_browser);
        assert!(file.agents.is_empty());

        let config = Config::from_file(file, Overrides::default());
        assert_eq!(config.directory.len(), constants::DEFAULT_AGENTS.len());
        assert_eq!(config.directory.display_for("697"), "עידו");
        assert_eq!(config.output_dir, std::env::temp_dir());
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [source]
            url = "http://localhost:8080/clients"
            timeout_secs = 5

            [fields]
            name = "client_name"

            [report]
            title = "Balances"
            output_dir = "/tmp/reports"
            open_browser = false

            [currency]
            symbol = "$"
            symbol_position = "before"
            symbol_spacing = ""

            [[agents]]
            code = "1"
            name = "Alice"

            [[agents]]
            code = "2"
            name = "Bob"
        "#;
        let file = FileConfig::parse(toml).unwrap();
        assert_eq!(file.fields.name, "client_name");
        assert_eq!(file.fields.id, "id");
        assert_eq!(file.currency.symbol_position, SymbolPosition::Before);
        assert_eq!(file.currency.decimals, 2);

        let config = Config::from_file(file, Overrides::default());
        match &config.source {
            DataSource::Http { url, timeout } => {
                assert_eq!(url, "http://localhost:8080/clients");
                assert_eq!(*timeout, Duration::from_secs(5));
            }
            other => panic!("unexpected source: {other:?}"),
        }
        assert_eq!(config.directory.display_names(), vec!["Alice", "Bob"]);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert!(!config.open_browser);
        assert_eq!(config.report_options(None).title, "Balances");
    }

    #[test]
    fn test_overrides() {
        let overrides = Overrides {
            source_url: Some("http://example.test/api".to_string()),
            input: None,
            output_dir: Some(PathBuf::from("out")),
            no_open: true,
        };
        let config = Config::from_file(FileConfig::default(), overrides);
        assert!(matches!(&config.source, DataSource::Http { url, .. } if url == "http://example.test/api"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(!config.open_browser);

        let overrides = Overrides {
            input: Some(PathBuf::from("clients.json")),
            source_url: Some("http://ignored".to_string()),
            ..Overrides::default()
        };
        let config = Config::from_file(FileConfig::default(), overrides);
        assert!(matches!(config.source, DataSource::File(_)));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(FileConfig::parse("[source]\ntimeout_secs = \"soon\"").is_err());
        assert!(FileConfig::parse("[[agents]]\ncode = \"1\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\ntitle = \"From file\"\n").unwrap();

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(file.report.title, "From file");
        assert!(FileConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
