use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use annuaire::error::{AnnuaireError, Result};
use annuaire::server;
use annuaire::service::PersonneService;
use annuaire::store::PersonneStore;

#[derive(Debug, Deserialize)]
struct Settings {
    listen: String,
    database: String,
}

fn load_settings() -> Result<Settings> {
    config::Config::builder()
        .set_default("listen", "0.0.0.0:8080")
        .map_err(|e| AnnuaireError::Config(e.to_string()))?
        .set_default("database", "annuaire.db")
        .map_err(|e| AnnuaireError::Config(e.to_string()))?
        .add_source(config::File::with_name("annuaire").required(false))
        .add_source(config::Environment::with_prefix("ANNUAIRE"))
        .build()
        .map_err(|e| AnnuaireError::Config(e.to_string()))?
        .try_deserialize()
        .map_err(|e| AnnuaireError::Config(e.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    info!(database = %settings.database, "ouverture de la base de données");
    let store = PersonneStore::open(&settings.database)?;
    let service = Arc::new(PersonneService::new(store));

    let app = server::router(service);
    let listener = tokio::net::TcpListener::bind(&settings.listen)
        .await
        .map_err(|e| AnnuaireError::Config(format!("bind {}: {e}", settings.listen)))?;
    info!(listen = %settings.listen, "serveur démarré");
    axum::serve(listener, app)
        .await
        .map_err(|e| AnnuaireError::Internal(e.to_string()))
}
