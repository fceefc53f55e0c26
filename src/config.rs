use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "huehook")]
#[command(about = "Webhook proxy for a local hue bridge", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Proxy the hook routes to the bridge (default)
    Serve,
    /// Ask the bridge for a new username; press the link button first
    Register {
        #[arg(long, default_value = "huehook#raspi")]
        devicetype: String,
    },
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".huehook")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

/// Used when no config file is around, so the whole thing can be driven
/// from the environment.
const ENV_TEMPLATE: &str = r#"
app:
  port: ${HUEHOOK_PORT:-5000}
bridge:
  ip: "${HUE_IP:-}"
  username: "${HUE_USER:-}"
  timeout_seconds: ${HUE_TIMEOUT_SECONDS:-10}
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for App {
    fn default() -> Self {
        App { port: default_port() }
    }
}

fn default_port() -> u16 {
    5000
}

fn default_timeout() -> u64 {
    10
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Bridge {
    pub ip: String,
    #[serde(default)]
    pub username: String,
    /// Zero waits on the bridge forever.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Bridge {
    /// `http://<ip>/api/<username>`, the prefix of every proxied call.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/{}", self.ip, self.username)
    }

    /// `http://<ip>/api`, where new usernames are issued.
    pub fn registration_url(&self) -> String {
        format!("http://{}/api", self.ip)
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub app: App,
    pub bridge: Bridge,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        Config::from_yaml(&yaml_str)
    }

    pub fn from_env() -> Result<Self> {
        Config::from_yaml(ENV_TEMPLATE)
    }

    /// Explicit path first, then the default location, then the environment.
    pub fn resolve(config_path: Option<&str>) -> Result<Self> {
        if let Some(path) = config_path {
            return Config::new(path);
        }

        let default_path = default_config_path();
        if default_path.exists() {
            tracing::info!(path = ?default_path, "loading config file");
            return Config::new(&default_path.to_string_lossy());
        }

        tracing::info!("no config file found, reading bridge settings from the environment");
        Config::from_env()
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str)?;
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    /// The proxy is useless without both halves of the base URL.
    pub fn validate(&self) -> Result<()> {
        if self.bridge.ip.trim().is_empty() {
            bail!("bridge.ip is empty, set it in the config file or via HUE_IP");
        }
        if self.bridge.username.trim().is_empty() {
            bail!("bridge.username is empty, run `huehook register` or set HUE_USER");
        }
        Ok(())
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find('}') {
                let var_name = &result[actual_start + 2..actual_start + end];

                // Handle default values like ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        tracing::warn!(var = var_name, "environment variable not found");
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}
