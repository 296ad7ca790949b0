use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::debounce::DEFAULT_DELAY;
use crate::error::{invalid_input_error, Error};
use crate::report::FileNaming;

const DEFAULT_API_BASE: &str = "maps.googleapis.com";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_REPORT_TITLE: &str = "Your Company Name";

#[derive(Clone, Debug)]
pub struct Config {
    pub maps: MapsConfig,
    pub listen_addr: SocketAddr,
    pub debounce: Duration,
    pub default_start: Option<String>,
    pub report: ReportConfig,
}

#[derive(Clone, Debug)]
pub struct MapsConfig {
    pub api_base: String,
    pub api_key: String,
}

#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub title: String,
    pub dir: PathBuf,
    pub naming: FileNaming,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.into(),
            dir: PathBuf::from("."),
            naming: FileNaming::Dated,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up
    /// a `.env` file.
    #[tracing::instrument]
    pub fn from_env() -> Result<Self, Error> {
        let maps = MapsConfig {
            api_base: optional("GOOGLE_MAPS_API_BASE")?
                .unwrap_or_else(|| DEFAULT_API_BASE.into()),
            api_key: env::var("GOOGLE_MAPS_API_KEY")?,
        };

        let listen_addr = optional("LISTEN_ADDR")?
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into())
            .parse()
            .map_err(|_| invalid_input_error())?;

        let debounce = match optional("SUGGESTION_DEBOUNCE_MS")? {
            Some(millis) => {
                let millis = millis.parse().map_err(|_| invalid_input_error())?;
                Duration::from_millis(millis)
            }
            None => DEFAULT_DELAY,
        };

        let mut report = ReportConfig::default();
        if let Some(title) = optional("REPORT_TITLE")? {
            report.title = title;
        }
        if let Some(dir) = optional("REPORT_DIR")? {
            report.dir = dir.into();
        }
        if let Some(naming) = optional("REPORT_FILENAME")? {
            report.naming = naming.parse()?;
        }

        Ok(Self {
            maps,
            listen_addr,
            debounce,
            default_start: optional("DEFAULT_START")?,
            report,
        })
    }
}

/// Unset and empty variables both read as `None`.
fn optional(key: &str) -> Result<Option<String>, Error> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the environment so parallel tests do not race on it.
    #[test]
    fn reads_environment_with_defaults() {
        env::remove_var("GOOGLE_MAPS_API_KEY");
        assert_eq!(Config::from_env().unwrap_err().code, 1);

        env::set_var("GOOGLE_MAPS_API_KEY", "secret");
        env::remove_var("GOOGLE_MAPS_API_BASE");
        env::remove_var("LISTEN_ADDR");
        env::remove_var("SUGGESTION_DEBOUNCE_MS");
        env::set_var("DEFAULT_START", "Akola, Maharashtra, India");
        env::set_var("REPORT_FILENAME", "static");

        let config = Config::from_env().unwrap();

        assert_eq!(config.maps.api_base, DEFAULT_API_BASE);
        assert_eq!(config.maps.api_key, "secret");
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR.parse().unwrap());
        assert_eq!(config.debounce, DEFAULT_DELAY);
        assert_eq!(
            config.default_start.as_deref(),
            Some("Akola, Maharashtra, India")
        );
        assert_eq!(config.report.naming, FileNaming::Static);
        assert_eq!(config.report.title, DEFAULT_REPORT_TITLE);

        env::set_var("SUGGESTION_DEBOUNCE_MS", "soon");
        assert_eq!(Config::from_env().unwrap_err().code, 101);

        for key in [
            "GOOGLE_MAPS_API_KEY",
            "DEFAULT_START",
            "REPORT_FILENAME",
            "SUGGESTION_DEBOUNCE_MS",
        ] {
            env::remove_var(key);
        }
    }
}
