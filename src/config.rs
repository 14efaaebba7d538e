use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::{Display, EnumString};

/// Directory for persistence data, relative to the home directory
const PERSIST_DIR: &str = ".config/catpoint";
const STATE_FILE: &str = "state.json";

/// Split one `.env` line into key and value.
///
/// Skips blanks and comments, splits on the first `=`, and strips one pair of
/// matching quotes. Values may contain spaces without quoting.
fn parse_dotenv_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let mut value = value.trim();
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value = &value[1..value.len() - 1];
    }
    Some((key, value))
}

/// Load environment variables from a `.env` file in the working directory.
/// Variables already set in the environment take precedence.
pub fn load_dotenv() {
    load_dotenv_from(Path::new(".env"));
}

fn load_dotenv_from(path: &Path) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    for (key, value) in content.lines().filter_map(parse_dotenv_line) {
        if std::env::var(key).is_err() {
            // SAFETY: called from main before any other thread is started
            unsafe { std::env::set_var(key, value) };
        }
    }
}

/// Which image classifier the binary wires into the security service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ClassifierKind {
    /// Random confidence per frame
    Random,
    AlwaysCat,
    NeverCat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub camera: CameraConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub classifier: ClassifierKind,
    /// Seed for the random classifier; `None` draws from OS entropy
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub interval_secs: u64,
    pub toggle_sensors: bool,
}

/// Get the default state file path
pub fn default_state_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PERSIST_DIR)
        .join(STATE_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                state_file: default_state_path(),
            },
            camera: CameraConfig {
                classifier: ClassifierKind::Random,
                seed: None,
            },
            simulation: SimulationConfig {
                interval_secs: 10,
                toggle_sensors: true,
            },
        }
    }
}

/// Parse an environment variable, keeping the default on bad input.
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("CATPOINT_STATE_FILE") {
            config.store.state_file = PathBuf::from(path);
        }
        if let Some(kind) = env_parse("CATPOINT_CLASSIFIER") {
            config.camera.classifier = kind;
        }
        if let Some(seed) = env_parse("CATPOINT_CLASSIFIER_SEED") {
            config.camera.seed = Some(seed);
        }
        if let Some(secs) = env_parse::<u64>("CATPOINT_SIM_INTERVAL_SECS")
            && secs > 0
        {
            config.simulation.interval_secs = secs;
        }
        if let Some(toggle) = env_parse("CATPOINT_SIM_TOGGLE_SENSORS") {
            config.simulation.toggle_sensors = toggle;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotenv_line() {
        assert_eq!(parse_dotenv_line("# comment"), None);
        assert_eq!(parse_dotenv_line("   "), None);
        assert_eq!(parse_dotenv_line("NO_EQUALS"), None);
        assert_eq!(parse_dotenv_line("A=1"), Some(("A", "1")));
        assert_eq!(
            parse_dotenv_line(" NAME = Front Door "),
            Some(("NAME", "Front Door"))
        );
        assert_eq!(parse_dotenv_line("Q=\"a=b\""), Some(("Q", "a=b")));
        assert_eq!(parse_dotenv_line("S='x'"), Some(("S", "x")));
        assert_eq!(parse_dotenv_line("E=\""), Some(("E", "\"")));
    }

    #[test]
    fn test_default_state_path() {
        let path = default_state_path();
        assert!(path.ends_with(".config/catpoint/state.json"));
    }

    #[test]
    fn test_classifier_kind_parse() {
        assert_eq!(
            "always-cat".parse::<ClassifierKind>().unwrap(),
            ClassifierKind::AlwaysCat
        );
        assert_eq!(
            "RANDOM".parse::<ClassifierKind>().unwrap(),
            ClassifierKind::Random
        );
        assert!("sometimes".parse::<ClassifierKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.camera.classifier, ClassifierKind::Random);
        assert_eq!(config.camera.seed, None);
        assert_eq!(config.simulation.interval_secs, 10);
        assert!(config.simulation.toggle_sensors);
    }
}
