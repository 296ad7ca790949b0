use axum::extract::Extension;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{NaiveDate, Utc};

use crate::api::{DynAPI, ReportAPI};
use crate::error::Error;

/// Sends the travel plan as a download named after today's date.
pub async fn export(Extension(api): Extension<DynAPI>) -> Result<impl IntoResponse, Error> {
    let report = api.export_report(export_date()).await?;

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    ))
}

/// Reports are dated in UTC, so the name does not depend on the server's zone.
fn export_date() -> NaiveDate {
    Utc::now().date_naive()
}
