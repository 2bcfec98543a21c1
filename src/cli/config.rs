use std::collections::BTreeMap;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::browser::locator::Locator;
use crate::browser::webdriver::{BrowserKind, Capabilities, DEFAULT_TIMEOUT_SECS};
use crate::config::{RawData, TestData};
use crate::error::ConfigError;
use crate::page::fields::LocatorTable;

pub const DEFAULT_CONFIG_PATH: &str = "registration.yaml";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "registration-page",
    version,
    about = "Drive the account registration form through a WebDriver session"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: registration.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// WebDriver endpoint, e.g. http://localhost:9515
    #[arg(long, global = true, env = "REGISTRATION_WEBDRIVER_URL")]
    pub webdriver: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account through the full registration form
    Register {
        /// Name typed on the signup panel
        #[arg(long)]
        name: String,

        /// Email typed on the signup panel
        #[arg(long)]
        email: String,

        /// Attach to an existing WebDriver session instead of opening one
        #[arg(long)]
        session: Option<String>,

        /// Fail unless the outcome matches
        #[arg(long, value_enum)]
        expect: Option<Expectation>,
    },

    /// Submit only the name/email panel and report any error shown
    Signup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        session: Option<String>,
    },

    /// List registration data keys missing from the config file
    CheckConfig,

    /// Print the effective field locators
    Locators,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Expectation {
    Created,
    Rejected,
}

// ============================================================================
// Config File Model (YAML)
// ============================================================================

/// Config file: `registration.yaml`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppConfig {
    pub webdriver: WebDriverConfig,

    /// Registration input data, keyed by the names the page reads
    pub data: TestData,

    /// Per-field locator overrides, keyed by field name
    pub locators: BTreeMap<String, Locator>,
}

/// File layout as parsed, before data values are checked.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    webdriver: WebDriverConfig,

    #[serde(default)]
    data: RawData,

    #[serde(default)]
    locators: BTreeMap<String, Locator>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebDriverConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub browser: BrowserKind,

    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WEBDRIVER_URL.to_string(),
            browser: BrowserKind::default(),
            headless: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl WebDriverConfig {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            browser: self.browser,
            headless: self.headless,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Default locators with this file's overrides applied.
    pub fn locator_table(&self) -> Result<LocatorTable, ConfigError> {
        LocatorTable::from_named_overrides(&self.locators)
    }

    /// Endpoint to use: the CLI/env value when given, else the file's.
    pub fn resolve_endpoint<'a>(&'a self, cli: Option<&'a str>) -> &'a str {
        cli.unwrap_or(&self.webdriver.endpoint)
    }
}

// Serde default helpers
fn default_endpoint() -> String { DEFAULT_WEBDRIVER_URL.to_string() }
fn default_true() -> bool { true }
fn default_timeout() -> u64 { DEFAULT_TIMEOUT_SECS }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file.
///
/// A missing default file yields defaults. A missing file that was asked for
/// explicitly, or malformed YAML, is an error.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => parse_config(&content),
        Err(e) if path.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            Ok(AppConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: config_path.to_string(),
            source,
        }),
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let file: ConfigFile = serde_yaml::from_str(content)?;
    let config = AppConfig {
        webdriver: file.webdriver,
        data: TestData::try_from(file.data)?,
        locators: file.locators,
    };
    // override names must all be known fields
    config.locator_table()?;
    Ok(config)
}
