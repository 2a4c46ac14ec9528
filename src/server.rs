//! REST surface for the personne service.
//!
//! The router exposes the service under `/api/personnes` behind an open
//! CORS layer. Handlers run the synchronous service on a blocking thread.
//! Shape validation (missing required field, length caps) happens here and
//! produces a field-to-message map; business validation lives in the
//! service and produces a single message.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::error::AnnuaireError;
use crate::person::PersonneInput;
use crate::service::PersonneService;

#[derive(Serialize)]
struct ErrorResponse {
    timestamp: String,
    status: u16,
    error: &'static str,
    message: String,
}

#[derive(Serialize)]
struct SchemaErrorResponse {
    timestamp: String,
    status: u16,
    error: &'static str,
    errors: HashMap<String, String>,
}

fn timestamp() -> String {
    Local::now().naive_local().to_string()
}

impl IntoResponse for AnnuaireError {
    fn into_response(self) -> Response {
        match self {
            AnnuaireError::NotFound { .. } => {
                let message = self.to_string();
                warn!(%message, "ressource non trouvée");
                let body = ErrorResponse {
                    timestamp: timestamp(),
                    status: StatusCode::NOT_FOUND.as_u16(),
                    error: "Not Found",
                    message,
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            AnnuaireError::Validation(message) => {
                warn!(%message, "erreur de validation métier");
                let body = ErrorResponse {
                    timestamp: timestamp(),
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    error: "Bad Request",
                    message,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AnnuaireError::Schema(errors) => {
                warn!(?errors, "erreur de validation de schéma");
                let body = SchemaErrorResponse {
                    timestamp: timestamp(),
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    error: "Validation Failed",
                    errors,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            other => {
                // full detail goes to the log, never to the caller
                error!(detail = %other, "erreur interne");
                let body = ErrorResponse {
                    timestamp: timestamp(),
                    status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    error: "Internal Server Error",
                    message: "Une erreur inattendue s'est produite".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Shape checks mirroring the wire contract: required fields present and
/// length caps respected. Everything wrong is reported at once, as a
/// field-to-message map, before the service runs its business validation.
pub fn check_schema(input: &PersonneInput) -> Result<(), AnnuaireError> {
    let mut errors = HashMap::new();
    match input.nom.as_deref() {
        None => {
            errors.insert("nom".to_string(), "Le nom est obligatoire".to_string());
        }
        Some(nom) if nom.trim().is_empty() => {
            errors.insert("nom".to_string(), "Le nom est obligatoire".to_string());
        }
        Some(nom) if nom.chars().count() > 100 => {
            errors.insert(
                "nom".to_string(),
                "Le nom ne doit pas dépasser 100 caractères".to_string(),
            );
        }
        _ => {}
    }
    match input.prenom.as_deref() {
        None => {
            errors.insert("prenom".to_string(), "Le prénom est obligatoire".to_string());
        }
        Some(prenom) if prenom.trim().is_empty() => {
            errors.insert("prenom".to_string(), "Le prénom est obligatoire".to_string());
        }
        Some(prenom) if prenom.chars().count() > 100 => {
            errors.insert(
                "prenom".to_string(),
                "Le prénom ne doit pas dépasser 100 caractères".to_string(),
            );
        }
        _ => {}
    }
    if let Some(adresse) = input.adresse.as_deref() {
        if adresse.chars().count() > 255 {
            errors.insert(
                "adresse".to_string(),
                "L'adresse ne doit pas dépasser 255 caractères".to_string(),
            );
        }
    }
    if let Some(telephone) = input.telephone.as_deref() {
        if telephone.chars().count() > 20 {
            errors.insert(
                "telephone".to_string(),
                "Le téléphone ne doit pas dépasser 20 caractères".to_string(),
            );
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AnnuaireError::Schema(errors))
    }
}

/// Run a synchronous service call on a blocking thread.
async fn run_blocking<T, F>(f: F) -> Result<T, AnnuaireError>
where
    F: FnOnce() -> Result<T, AnnuaireError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AnnuaireError::Internal(format!("join error: {e}")))?
}

#[derive(Deserialize)]
struct SearchParams {
    nom: Option<String>,
    prenom: Option<String>,
    telephone: Option<String>,
}

async fn create_personne(
    State(service): State<Arc<PersonneService>>,
    Json(input): Json<PersonneInput>,
) -> Result<impl IntoResponse, AnnuaireError> {
    info!("requête POST pour créer une personne");
    check_schema(&input)?;
    let created = run_blocking(move || service.create(input)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_personne(
    State(service): State<Arc<PersonneService>>,
    Path(id): Path<i64>,
    Json(input): Json<PersonneInput>,
) -> Result<impl IntoResponse, AnnuaireError> {
    info!(id, "requête PUT pour modifier une personne");
    check_schema(&input)?;
    let updated = run_blocking(move || service.update(id, input)).await?;
    Ok(Json(updated))
}

async fn delete_personne(
    State(service): State<Arc<PersonneService>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AnnuaireError> {
    info!(id, "requête DELETE pour supprimer une personne");
    run_blocking(move || service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn all_personnes(
    State(service): State<Arc<PersonneService>>,
) -> Result<impl IntoResponse, AnnuaireError> {
    let personnes = run_blocking(move || service.find_all()).await?;
    Ok(Json(personnes))
}

async fn personne_by_id(
    State(service): State<Arc<PersonneService>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AnnuaireError> {
    let personne = run_blocking(move || service.find_by_id(id)).await?;
    Ok(Json(personne))
}

async fn search_personnes(
    State(service): State<Arc<PersonneService>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AnnuaireError> {
    let personnes = run_blocking(move || {
        service.search(
            params.nom.as_deref(),
            params.prenom.as_deref(),
            params.telephone.as_deref(),
        )
    })
    .await?;
    Ok(Json(personnes))
}

// development helper, not meant for production use
async fn reset_table(
    State(service): State<Arc<PersonneService>>,
) -> Result<impl IntoResponse, AnnuaireError> {
    warn!("requête de réinitialisation de la table");
    run_blocking(move || service.reset_all()).await?;
    Ok("Table personne réinitialisée avec succès")
}

pub fn router(service: Arc<PersonneService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    Router::new()
        .route("/api/personnes", get(all_personnes).post(create_personne))
        .route("/api/personnes/search", get(search_personnes))
        .route("/api/personnes/reset", delete(reset_table))
        .route(
            "/api/personnes/:id",
            get(personne_by_id).put(update_personne).delete(delete_personne),
        )
        .layer(cors)
        .with_state(service)
}
