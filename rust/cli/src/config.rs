//! Layered configuration: built-in defaults, then a TOML file named by
//! `HOLDEM_CONFIG`, then `HOLDEM_*` environment variables.

use std::fs;
use std::path::PathBuf;

use holdem_engine::room::{MAX_PLAYERS, MAX_TABLE_CHIPS, MIN_PLAYERS, TableConfig};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const STACK_ENV: &str = "HOLDEM_STARTING_STACK";
pub const STORE_ENV: &str = "HOLDEM_STORE";

pub const DEFAULT_STORE: &str = ".holdem";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub min_players: usize,
    pub max_players: usize,
    pub seed: Option<u64>,
    pub store: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            starting_stack: table.starting_stack,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            min_players: table.min_players,
            max_players: table.max_players,
            seed: None,
            store: PathBuf::from(DEFAULT_STORE),
        }
    }
}

impl Config {
    /// Stakes new rooms are created with.
    pub fn table(&self) -> TableConfig {
        TableConfig {
            starting_stack: self.starting_stack,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            min_players: self.min_players,
            max_players: self.max_players,
        }
    }
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
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub min_players: ValueSource,
    pub max_players: ValueSource,
    pub seed: ValueSource,
    pub store: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            min_players: ValueSource::Default,
            max_players: ValueSource::Default,
            seed: ValueSource::Default,
            store: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
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
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.min_players {
            cfg.min_players = v;
            sources.min_players = ValueSource::File;
        }
        if let Some(v) = f.max_players {
            cfg.max_players = v;
            sources.max_players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.store {
            cfg.store = v;
            sources.store = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(stack) = std::env::var(STACK_ENV)
        && !stack.is_empty()
    {
        cfg.starting_stack = stack
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid starting stack: {}", stack)))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(store) = std::env::var(STORE_ENV)
        && !store.is_empty()
    {
        cfg.store = PathBuf::from(store);
        sources.store = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    min_players: Option<usize>,
    #[serde(default)]
    max_players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    store: Option<PathBuf>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.small_blind == 0 || cfg.big_blind < cfg.small_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: blinds must satisfy big_blind >= small_blind > 0".into(),
        ));
    }
    if cfg.min_players < MIN_PLAYERS
        || cfg.min_players > cfg.max_players
        || cfg.max_players > MAX_PLAYERS
    {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must satisfy {} <= min_players <= max_players <= {}",
            MIN_PLAYERS, MAX_PLAYERS
        )));
    }
    if !cfg.table().fits_chip_limit() {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: starting_stack x max_players must not exceed {}",
            MAX_TABLE_CHIPS
        )));
    }
    Ok(())
}
