use serde::{Deserialize, Serialize};
use std::fs;

use quickdraw_engine::rules::ScoringRules;
use quickdraw_engine::session::GameMode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub mode: GameMode,
    /// Level a `play` session starts from
    pub level: u32,
    /// Simulated seconds spent on each level during autoplay
    pub level_seconds: u32,
    pub scoring: ScoringRules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub mode: ValueSource,
    pub level: ValueSource,
    pub level_seconds: ValueSource,
    pub scoring: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            mode: ValueSource::Default,
            level: ValueSource::Default,
            level_seconds: ValueSource::Default,
            scoring: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            mode: GameMode::Classic,
            level: 1,
            level_seconds: 75,
            scoring: ScoringRules::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("QUICKDRAW_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.mode {
            cfg.mode = v
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("Invalid mode: {}", e)))?;
            sources.mode = ValueSource::File;
        }
        if let Some(v) = f.level {
            cfg.level = v;
            sources.level = ValueSource::File;
        }
        if let Some(v) = f.level_seconds {
            cfg.level_seconds = v;
            sources.level_seconds = ValueSource::File;
        }
        if let Some(v) = f.scoring {
            cfg.scoring = v;
            sources.scoring = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("QUICKDRAW_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(mode) = std::env::var("QUICKDRAW_MODE")
        && !mode.is_empty()
    {
        cfg.mode = mode
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("Invalid mode: {}", e)))?;
        sources.mode = ValueSource::Env;
    }
    if let Ok(level) = std::env::var("QUICKDRAW_LEVEL")
        && !level.is_empty()
    {
        cfg.level = level
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid level".into()))?;
        sources.level = ValueSource::Env;
    }
    if let Ok(secs) = std::env::var("QUICKDRAW_LEVEL_SECONDS")
        && !secs.is_empty()
    {
        cfg.level_seconds = secs
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid level_seconds".into()))?;
        sources.level_seconds = ValueSource::Env;
    }

    validate(&cfg)?;
    tracing::debug!(mode = %cfg.mode, level = cfg.level, seed = ?cfg.seed, "configuration resolved");
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    level: Option<u32>,
    #[serde(default)]
    level_seconds: Option<u32>,
    #[serde(default)]
    scoring: Option<ScoringRules>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.level == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: level must be >=1".into(),
        ));
    }
    if cfg.level_seconds == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: level_seconds must be >0".into(),
        ));
    }
    cfg.scoring
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: scoring: {}", e)))
}
