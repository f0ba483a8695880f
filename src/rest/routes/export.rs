// rest/routes/export.rs — export routes.
//
// Each route takes the caller-held record set in the request body (the
// service keeps no generation state between requests) and returns either a
// `{data, filename}` payload or, for Excel, the raw workbook bytes as a
// file download.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::export;
use crate::generate::model::TestCaseSet;
use crate::AppContext;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Deserialize)]
pub struct ExportRequest {
    /// The TestCaseSet-shaped value to export, as previously returned by
    /// the generate route. Missing fields are tolerated everywhere.
    #[serde(default)]
    pub test_cases: Value,
}

pub async fn export_json(
    State(_ctx): State<Arc<AppContext>>,
    Json(body): Json<ExportRequest>,
) -> Json<Value> {
    Json(json!({
        "data": export::json::format(&body.test_cases),
        "filename": "test_cases.json",
    }))
}

pub async fn export_csv(
    State(_ctx): State<Arc<AppContext>>,
    Json(body): Json<ExportRequest>,
) -> Json<Value> {
    let set = TestCaseSet::from_value(&body.test_cases);
    Json(json!({
        "data": export::csv::format(&set),
        "filename": "test_cases.csv",
    }))
}

pub async fn export_text(
    State(_ctx): State<Arc<AppContext>>,
    Json(body): Json<ExportRequest>,
) -> Json<Value> {
    let set = TestCaseSet::from_value(&body.test_cases);
    Json(json!({
        "data": export::text::format(&set),
        "filename": "test_cases.txt",
    }))
}

pub async fn export_excel(
    State(_ctx): State<Arc<AppContext>>,
    Json(body): Json<ExportRequest>,
) -> Response {
    let set = TestCaseSet::from_value(&body.test_cases);
    match export::xlsx::format(&set) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"test_cases.xlsx\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            warn!(err = %e, "excel export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
