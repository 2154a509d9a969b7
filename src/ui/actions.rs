use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use std::path::PathBuf;

use crate::io::report;
use crate::io::service::{ServiceError, ValidationService};
use crate::state::config::AppConfig;
use crate::state::controller::{self, Effect, FormEvent};
use crate::state::file_kind::{SpreadsheetKind, SCHEMA_EXTENSIONS};
use crate::state::form_state::FormState;
use crate::state::i18n::{self, Language};

/// Shared handles the effect runner needs. Provided as root context by `main`.
#[derive(Clone)]
pub struct Services {
    pub service: ValidationService,
    pub download_dir: PathBuf,
    pub language: Language,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            service: ValidationService::new(config)?,
            download_dir: config.download_dir(),
            language: config.language(),
        })
    }
}

/// Applies `event` to the form and starts every effect it produced.
pub fn dispatch(mut form: Signal<FormState>, services: Services, event: FormEvent) {
    let current = form.peek().clone();
    let (next, effects) = controller::update(current, event);
    form.set(next);

    for effect in effects {
        let services = services.clone();
        spawn(async move {
            let completion = perform(&services, effect).await;
            dispatch(form, services, completion);
        });
    }
}

/// Runs one effect to completion and reports the outcome as an event.
pub async fn perform(services: &Services, effect: Effect) -> FormEvent {
    match effect {
        Effect::FetchHedVersions => {
            let result = services.service.hed_versions().await;
            if let Err(err) = &result {
                warn!(%err, "could not load HED versions");
            }
            FormEvent::HedVersionsLoaded(result.map_err(|e| e.to_string()))
        }
        Effect::FetchColumnsInfo(request) => {
            let result = services
                .service
                .columns_info(&request.path, &request.file_name, request.worksheet.as_deref())
                .await;
            if let Err(err) = &result {
                warn!(%err, file_name = %request.file_name, "columns info request failed");
            }
            FormEvent::ColumnsInfoLoaded {
                generation: request.generation,
                repopulate: request.repopulate,
                result: result.map_err(|e| e.to_string()),
            }
        }
        Effect::SubmitValidation(request) => {
            let result = services.service.validate(&request).await;
            match &result {
                Ok(outcome) => info!(
                    file_name = %request.file_name,
                    report_bytes = outcome.report.len(),
                    "validation finished"
                ),
                Err(err) => warn!(%err, file_name = %request.file_name, "validation failed"),
            }
            FormEvent::ValidationFinished {
                generation: request.generation,
                results_name: request.results_name,
                result: result.map_err(|e| e.to_string()),
            }
        }
        Effect::SaveReport {
            file_name,
            contents,
        } => {
            let result = report::save_report(&services.download_dir, &file_name, &contents);
            if let Err(err) = &result {
                warn!(%err, %file_name, "could not save issues report");
            }
            FormEvent::ReportSaved(result.map_err(|e| e.to_string()))
        }
    }
}

pub async fn pick_spreadsheet(language: Language) -> Option<PathBuf> {
    let extensions: Vec<&str> = SpreadsheetKind::Excel
        .extensions()
        .iter()
        .chain(SpreadsheetKind::Text.extensions())
        .copied()
        .collect();

    rfd::AsyncFileDialog::new()
        .add_filter(i18n::tr(language, "dialog.spreadsheet_filter"), &extensions)
        .add_filter(i18n::tr(language, "dialog.all_files"), &["*"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

pub async fn pick_hed_schema(language: Language) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .add_filter(i18n::tr(language, "dialog.schema_filter"), SCHEMA_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
