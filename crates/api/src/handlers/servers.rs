//! Handlers for the server inventory CRUD surface.
//!
//! Listing, single-record submit (the manual form), single delete, and
//! clear-all. The bulk import path lives in [`crate::handlers::import`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use rackledger_core::error::CoreError;
use rackledger_core::record::ServerRecord;
use rackledger_core::validate::{validate, FieldErrors};
use rackledger_db::models::server::NewServer;
use rackledger_db::repositories::ServerRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for the manual form submit.
///
/// Validation failures are part of the contract, not an error envelope:
/// the client renders `errors` per field.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ServerRecord>,
}

/// Typed response for the clear-all endpoint.
#[derive(Debug, Serialize)]
pub struct ClearResult {
    pub deleted: u64,
}

/// Typed response for the single-delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub deleted: bool,
}

/// GET /api/v1/servers
///
/// Return every record, sorted by server name ascending.
pub async fn list_servers(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ServerRecord>>>> {
    let rows = ServerRepo::list_all(&state.pool).await?;
    let records: Vec<ServerRecord> = rows.into_iter().map(ServerRecord::from).collect();
    Ok(Json(DataResponse { data: records }))
}

/// POST /api/v1/servers
///
/// Validate one record and upsert it by natural key. A record that fails
/// validation comes back as 422 with the per-field error map and leaves
/// the store untouched.
pub async fn submit_server(
    State(state): State<AppState>,
    Json(record): Json<ServerRecord>,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    let today = chrono::Utc::now().date_naive();
    let errors = validate(&record, today);
    if !errors.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SubmitResponse {
                ok: false,
                errors,
                data: None,
            }),
        ));
    }

    let input = NewServer::try_from(&record).map_err(AppError::Core)?;
    let row = ServerRepo::upsert(&state.pool, &input).await?;

    Ok((
        StatusCode::OK,
        Json(SubmitResponse {
            ok: true,
            errors: FieldErrors::new(),
            data: Some(ServerRecord::from(row)),
        }),
    ))
}

/// DELETE /api/v1/servers
///
/// Clear the entire record set.
pub async fn clear_servers(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ClearResult>>> {
    let deleted = ServerRepo::delete_all(&state.pool).await?;
    tracing::info!(deleted, "Cleared server inventory");
    Ok(Json(DataResponse {
        data: ClearResult { deleted },
    }))
}

/// DELETE /api/v1/servers/{name}
///
/// Delete one record by its natural key (case-insensitive name match).
pub async fn delete_server(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<DeleteResult>>> {
    let deleted = ServerRepo::delete_by_name(&state.pool, &name).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "server",
            key: name,
        }
        .into());
    }
    Ok(Json(DataResponse {
        data: DeleteResult { deleted: true },
    }))
}
