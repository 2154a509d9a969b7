//! HTTP client for the remote validation service.
//!
//! Three endpoints: columns info (worksheet/column metadata for an uploaded
//! spreadsheet), HED schema versions, and spreadsheet validation. No retries.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dioxus::logger::tracing::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::Deserialize;

use crate::state::config::AppConfig;
use crate::state::controller::{ValidationOutcome, ValidationRequest};
use crate::state::form_state::{ColumnsInfo, FlashCategory};
use crate::state::tag_columns::format_tag_columns;

pub const FIELD_COLUMNS_FILE: &str = "columns-file";
pub const FIELD_WORKSHEET_SELECTED: &str = "worksheet-selected";
pub const FIELD_SPREADSHEET_FILE: &str = "spreadsheet-file";
pub const FIELD_TAG_COLUMNS: &str = "tag-columns";
pub const FIELD_HAS_COLUMN_NAMES: &str = "has-column-names";
pub const FIELD_CHECK_FOR_WARNINGS: &str = "check-for-warnings";
pub const FIELD_HED_VERSION: &str = "hed-version";
pub const FIELD_HED_XML_FILE: &str = "hed-xml-file";

pub const HEADER_CATEGORY: &str = "category";
pub const HEADER_MESSAGE: &str = "message";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Default, Deserialize)]
struct HedVersions {
    #[serde(rename = "hed-major-versions", default)]
    versions: Vec<String>,
}

#[derive(Clone)]
pub struct ValidationService {
    http: reqwest::Client,
    columns_info_url: String,
    validation_url: String,
    hed_versions_url: String,
}

impl ValidationService {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(format!("hedsheet/{}", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            columns_info_url: config.endpoint(&config.columns_info_path),
            validation_url: config.endpoint(&config.validation_path),
            hed_versions_url: config.endpoint(&config.hed_versions_path),
        })
    }

    /// Client pointed at `base_url` with the default endpoint paths.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        Self::new(&AppConfig {
            service_url: base_url.into(),
            ..AppConfig::default()
        })
    }

    pub async fn columns_info(
        &self,
        path: &Path,
        file_name: &str,
        worksheet: Option<&str>,
    ) -> Result<ColumnsInfo, ServiceError> {
        let mut form = Form::new().part(FIELD_COLUMNS_FILE, file_part(path, file_name).await?);
        if let Some(worksheet) = worksheet {
            form = form.text(FIELD_WORKSHEET_SELECTED, worksheet.to_string());
        }

        debug!(url = %self.columns_info_url, file_name, ?worksheet, "requesting columns info");
        let resp = self.http.post(&self.columns_info_url).multipart(form).send().await?;
        let body = check_status(resp, "columns info")?.text().await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }

    pub async fn hed_versions(&self) -> Result<Vec<String>, ServiceError> {
        debug!(url = %self.hed_versions_url, "requesting HED versions");
        let resp = self.http.get(&self.hed_versions_url).send().await?;
        let body = check_status(resp, "HED versions")?.text().await?;
        let parsed: HedVersions =
            serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))?;
        Ok(parsed.versions)
    }

    pub async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationOutcome, ServiceError> {
        let form = validation_form(request).await?;

        debug!(
            url = %self.validation_url,
            file_name = %request.file_name,
            worksheet = ?request.worksheet,
            "submitting spreadsheet for validation"
        );
        let resp = self.http.post(&self.validation_url).multipart(form).send().await?;
        let resp = check_status(resp, "validation")?;

        let category = header_text(&resp, HEADER_CATEGORY).map(|v| FlashCategory::from_header(&v));
        let message = header_text(&resp, HEADER_MESSAGE);
        let report = resp.text().await?;

        Ok(ValidationOutcome {
            report,
            category,
            message,
        })
    }
}

async fn validation_form(request: &ValidationRequest) -> Result<Form, ServiceError> {
    let mut form = Form::new()
        .part(
            FIELD_SPREADSHEET_FILE,
            file_part(&request.path, &request.file_name).await?,
        )
        .text(
            FIELD_WORKSHEET_SELECTED,
            request.worksheet.clone().unwrap_or_default(),
        )
        .text(FIELD_TAG_COLUMNS, format_tag_columns(&request.tag_columns));

    if request.has_column_names {
        form = form.text(FIELD_HAS_COLUMN_NAMES, "on");
    }
    if request.check_for_warnings {
        form = form.text(FIELD_CHECK_FOR_WARNINGS, "on");
    }

    if let Some(schema) = &request.hed_schema_file {
        let name = schema
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("schema.xml")
            .to_string();
        form = form.part(FIELD_HED_XML_FILE, file_part(schema, &name).await?);
    } else if let Some(version) = &request.hed_version {
        form = form.text(FIELD_HED_VERSION, version.clone());
    }

    Ok(form)
}

async fn file_part(path: &Path, file_name: &str) -> Result<Part, ServiceError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ServiceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Part::bytes(bytes).file_name(file_name.to_string()))
}

fn check_status(resp: Response, endpoint: &str) -> Result<Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = match header_text(&resp, HEADER_MESSAGE) {
        Some(message) => message,
        None => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| "request failed".to_string()),
    };
    warn!(endpoint, url = %resp.url(), status = status.as_u16(), %message, "service returned an error");
    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}

fn header_text(resp: &Response, name: &str) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
