use crate::render::HOTEL_SEARCH_URL;
use crate::sources::{DBPEDIA_ENDPOINT, WIKIDATA_ENDPOINT};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration loaded from `~/.config/film-locations/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmConfig {
    /// SPARQL endpoint asked for the countries of DBpedia films.
    pub dbpedia_endpoint: String,
    /// SPARQL endpoint asked for the narrative locations of Wikidata films.
    pub wikidata_endpoint: String,
    /// Hotel search URL; `{destination}` is replaced by the location name.
    pub hotel_search_url: String,
    /// User-Agent header sent to both endpoints.
    pub user_agent: String,
    /// Per-request timeout in seconds (None = wait forever).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for FilmConfig {
    fn default() -> Self {
        Self {
            dbpedia_endpoint: DBPEDIA_ENDPOINT.to_string(),
            wikidata_endpoint: WIKIDATA_ENDPOINT.to_string(),
            hotel_search_url: HOTEL_SEARCH_URL.to_string(),
            user_agent: concat!("film-locations/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

impl FilmConfig {
    /// An HTTP agent honouring the user agent and timeout settings.
    pub fn agent(&self) -> ureq::Agent {
        let mut builder = ureq::AgentBuilder::new().user_agent(&self.user_agent);
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("film-locations")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the XDG config directory, creating a default file if none exists.
pub fn load_or_init() -> Result<FilmConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, creating a default file if none exists.
pub fn load_or_init_at(path: &Path) -> Result<FilmConfig> {
    if !path.exists() {
        let default_cfg = FilmConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: FilmConfig = toml::from_str(&data)?;
    Ok(cfg)
}
