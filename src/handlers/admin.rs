use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::{json, Value};
use crate::errors::{AppError, AppResult};
use crate::models::{AdminForm, AdminRecord};
use crate::services::AdminStore;

pub async fn save_admin(
    State(store): State<AdminStore>,
    payload: Result<Json<AdminForm>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(form) = payload.map_err(|e| {
        tracing::warn!("Rejected admin payload: {}", e);
        AppError::Payload(e.status(), e.body_text())
    })?;

    tracing::info!("Saving admin: {}", form.email.as_deref().unwrap_or("<no email>"));

    let record = store.append(form)?;

    tracing::info!("Saved admin {} ({})", record.username, record.email);
    Ok(Json(json!({
        "success": true,
        "message": "Admin saved successfully",
    })))
}

pub async fn load_admins(
    State(store): State<AdminStore>,
) -> AppResult<Json<Vec<AdminRecord>>> {
    let admins = store.list()?;
    tracing::debug!("Loaded {} admins from {}", admins.len(), store.path().display());
    Ok(Json(admins))
}
