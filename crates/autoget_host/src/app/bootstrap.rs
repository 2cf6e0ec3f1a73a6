use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use autoget::{AutogetEngine, ConfirmationPrompt, GlobalToggles, OverrideStore};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::catalog::{CatalogFile, CatalogRules, ItemCatalog};
use super::console::HostSession;
use super::prompt::StdinPrompt;

pub(crate) const DATA_DIR_ENV_VAR: &str = "AUTOGET_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "autoget_data";
const STORE_FILE: &str = "autoget.json";
const SETTINGS_FILE: &str = "settings.json";
const CATALOG_FILE: &str = "items.json";

#[derive(Debug, Clone)]
pub(crate) struct HostPaths {
    pub data_dir: PathBuf,
    pub store_file: PathBuf,
    pub settings_file: PathBuf,
    pub catalog_file: PathBuf,
}

impl HostPaths {
    pub(crate) fn under(data_dir: PathBuf) -> Self {
        Self {
            store_file: data_dir.join(STORE_FILE),
            settings_file: data_dir.join(SETTINGS_FILE),
            catalog_file: data_dir.join(CATALOG_FILE),
            data_dir,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum HostStartupError {
    #[error("failed to create data directory at {path}: {source}")]
    CreateDataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path} at {json_path}: {source}")]
    Parse {
        path: PathBuf,
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn build_app() -> Result<HostSession<StdinPrompt>, HostStartupError> {
    init_tracing();
    info!("=== Autoget Host Startup ===");

    let paths = resolve_host_paths()?;
    build_session(&paths, StdinPrompt)
}

pub(crate) fn build_session<P: ConfirmationPrompt>(
    paths: &HostPaths,
    prompt: P,
) -> Result<HostSession<P>, HostStartupError> {
    let toggles = load_toggles(&paths.settings_file)?;
    let catalog = load_catalog(&paths.catalog_file)?;
    let store = OverrideStore::open(&paths.store_file);
    info!(
        data_dir = %paths.data_dir.display(),
        catalog_items = catalog.items().len(),
        disabled_blueprints = store.disabled_blueprints().count(),
        enable_exclusions = toggles.enable_exclusions,
        "autoget_host_ready"
    );

    let engine = AutogetEngine::new(store, toggles, CatalogRules, prompt);
    Ok(HostSession::new(engine, catalog))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn resolve_host_paths() -> Result<HostPaths, HostStartupError> {
    let data_dir = env::var_os(DATA_DIR_ENV_VAR)
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    fs::create_dir_all(&data_dir).map_err(|source| HostStartupError::CreateDataDir {
        path: data_dir.clone(),
        source,
    })?;
    let data_dir = fs::canonicalize(&data_dir).unwrap_or(data_dir);
    Ok(HostPaths::under(data_dir))
}

fn load_toggles(path: &Path) -> Result<GlobalToggles, HostStartupError> {
    match read_json_file::<GlobalToggles>(path)? {
        Some(toggles) => Ok(toggles),
        None => {
            info!(path = %path.display(), "settings_missing_using_defaults");
            Ok(GlobalToggles::default())
        }
    }
}

fn load_catalog(path: &Path) -> Result<ItemCatalog, HostStartupError> {
    let file = read_json_file::<CatalogFile>(path)?.unwrap_or_else(|| {
        info!(path = %path.display(), "catalog_missing_starting_empty");
        CatalogFile::default()
    });
    Ok(ItemCatalog::from_items(file.items))
}

fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, HostStartupError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(HostStartupError::ReadFile {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    serde_path_to_error::deserialize::<_, T>(&mut deserializer)
        .map(Some)
        .map_err(|error| {
            let json_path = error.path().to_string();
            HostStartupError::Parse {
                path: path.to_path_buf(),
                json_path: if json_path.is_empty() {
                    ".".to_string()
                } else {
                    json_path
                },
                source: error.into_inner(),
            }
        })
}
