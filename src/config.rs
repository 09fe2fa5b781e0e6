use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_CONTENT_URL: &str = "https://raw.githubusercontent.com";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub github_api_url: String,
    pub raw_content_url: String,
    pub github_token: Option<String>,
    pub request_timeout_secs: u64,
    pub log_file: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("github_api_url", &self.github_api_url)
            .field("raw_content_url", &self.raw_content_url)
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            raw_content_url: DEFAULT_RAW_CONTENT_URL.to_string(),
            github_token: None,
            request_timeout_secs: 15,
            log_file: None,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `API_BASE_URL`/`GITHUB_TOKEN`, then
    /// `REPODECK_*`, then the command line. A file that fails to parse is
    /// left out; the other layers still apply.
    pub fn load(config_path: Option<PathBuf>, cli_api_base_url: Option<String>) -> Self {
        let config_file =
            config_path.unwrap_or_else(|| config_dir().join("repodeck").join("config.toml"));
        let file = config_file.exists().then_some(config_file.as_path());

        let cli_url = cli_api_base_url.as_deref();
        match layered(file, cli_url).extract::<Config>() {
            Ok(config) => config.normalized(),
            Err(e) => {
                eprintln!("warning: ignoring {}: {e}", config_file.display());
                layered(None, cli_url)
                    .extract::<Config>()
                    .map(Config::normalized)
                    .unwrap_or_else(|e| {
                        eprintln!("warning: config error, using defaults: {e}");
                        Config::default()
                    })
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.api_base_url = self
            .api_base_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self.github_token = self.github_token.filter(|token| !token.is_empty());
        self
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| config_dir().join("repodeck").join("repodeck.log"))
    }
}

fn layered(file: Option<&Path>, cli_api_base_url: Option<&str>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = file {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment
        .merge(Env::raw().only(&["API_BASE_URL", "GITHUB_TOKEN"]))
        .merge(Env::prefixed("REPODECK_").ignore(&["LOG"]));

    if let Some(url) = cli_api_base_url {
        figment = figment.merge(Serialized::default("api_base_url", url));
    }
    figment
}

pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
