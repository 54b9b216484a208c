//! Handler for the bulk workbook import endpoint.
//!
//! Accepts a multipart upload, decodes the first worksheet, reconciles
//! the rows against the current record set, and persists the staged
//! records in one transaction.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use rackledger_core::reconcile::{reconcile, ImportOutcome};
use rackledger_core::record::ServerRecord;
use rackledger_db::models::server::NewServer;
use rackledger_db::repositories::ServerRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::sheet;
use crate::state::AppState;

/// Import summary plus the post-import record set.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    /// Rows that created a record under a previously unknown key.
    pub imported: usize,
    /// Rows that replaced a record under an existing key.
    pub updated: usize,
    /// Rows discarded (failed validation or superseded within the batch).
    pub skipped: usize,
    /// Total data rows in the workbook.
    pub total: usize,
    /// The full record set after the import, sorted by name.
    pub records: Vec<ServerRecord>,
}

/// POST /api/v1/servers/import
///
/// Accept a multipart upload carrying one workbook, merge its rows into
/// the record set, and return the counts plus the merged snapshot. An
/// upload with no data rows is a 400; a batch where every row fails
/// validation succeeds with only `skipped` counted and the store
/// untouched.
pub async fn import_servers(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let mut payload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        // Take the first file field; anything else in the form is ignored.
        if field.file_name().is_none() && field.name() != Some("file") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        payload = Some(data.to_vec());
        break;
    }

    let payload = payload.ok_or_else(|| {
        AppError::BadRequest("No file received in multipart upload".to_string())
    })?;

    let rows = sheet::read_rows(&payload).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let total = rows.len();

    let current: Vec<ServerRecord> = ServerRepo::list_all(&state.pool)
        .await?
        .into_iter()
        .map(ServerRecord::from)
        .collect();

    let today = chrono::Utc::now().date_naive();
    let report = match reconcile(&rows, &current, today) {
        ImportOutcome::EmptyFile => {
            return Err(AppError::BadRequest(
                "Workbook contains no data rows".to_string(),
            ));
        }
        ImportOutcome::NoValidRows { skipped } => ImportReport {
            imported: 0,
            updated: 0,
            skipped,
            total,
            records: current,
        },
        ImportOutcome::Merged(result) => {
            let inputs: Vec<NewServer> = result
                .staged
                .iter()
                .map(NewServer::try_from)
                .collect::<Result<_, _>>()
                .map_err(AppError::Core)?;
            ServerRepo::upsert_batch(&state.pool, &inputs).await?;

            tracing::info!(
                imported = result.imported,
                updated = result.updated,
                skipped = result.skipped,
                total,
                "Workbook import applied"
            );

            ImportReport {
                imported: result.imported,
                updated: result.updated,
                skipped: result.skipped,
                total,
                records: result.records,
            }
        }
    };

    Ok(Json(DataResponse { data: report }))
}
