use campus_admin::catalog::Catalog;
use campus_admin::config::{AppConfig, DatabaseConfig};
use campus_admin::error::AppError;
use campus_admin::i18n::MessageCatalog;
use campus_admin::store::Database;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Applies a `--database` override on top of the loaded configuration.
pub(crate) fn database_config(config: &AppConfig, override_path: Option<String>) -> DatabaseConfig {
    match override_path {
        Some(path) if !path.trim().is_empty() => DatabaseConfig { path },
        _ => config.database.clone(),
    }
}

/// Opens the store and wires both services to it.
pub(crate) fn open_catalog(config: &AppConfig) -> Result<Catalog, AppError> {
    let db = Database::open(&config.database)?;
    Ok(Catalog::new(Arc::new(db), MessageCatalog::new(config.locale)))
}
