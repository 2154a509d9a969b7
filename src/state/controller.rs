//! Event dispatch for the spreadsheet upload form.
//!
//! `update` is a pure function: it takes the current [`FormState`] and one
//! [`FormEvent`] and returns the next state together with the side effects
//! the UI layer has to run. Completed effects come back as events.

use std::path::PathBuf;

use crate::state::file_kind::{self, SpreadsheetKind, SCHEMA_EXTENSIONS};
use crate::state::form_state::{
    ColumnsInfo, Flash, FlashCategory, FlashRegion, FormState, HedVersionChoice, SelectedFile,
};
use crate::state::tag_columns;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnsInfoRequest {
    pub path: PathBuf,
    pub file_name: String,
    pub worksheet: Option<String>,
    pub repopulate: bool,
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationRequest {
    pub path: PathBuf,
    pub file_name: String,
    pub worksheet: Option<String>,
    pub tag_columns: Vec<usize>,
    pub has_column_names: bool,
    pub check_for_warnings: bool,
    pub hed_version: Option<String>,
    pub hed_schema_file: Option<PathBuf>,
    pub results_name: String,
    pub generation: u64,
}

/// Successful reply from the validation endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub report: String,
    pub category: Option<FlashCategory>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    FetchHedVersions,
    FetchColumnsInfo(ColumnsInfoRequest),
    SubmitValidation(ValidationRequest),
    SaveReport { file_name: String, contents: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    PageLoaded,
    FormReset,
    FileSelected(PathBuf),
    WorksheetChanged(String),
    TagColumnsEdited(String),
    TagColumnToggled(usize),
    HasColumnNamesToggled(bool),
    CheckForWarningsToggled(bool),
    HedVersionSelected(HedVersionChoice),
    HedSchemaFileSelected(PathBuf),
    SubmitClicked,
    HedVersionsLoaded(Result<Vec<String>, String>),
    ColumnsInfoLoaded {
        generation: u64,
        repopulate: bool,
        result: Result<ColumnsInfo, String>,
    },
    ValidationFinished {
        generation: u64,
        results_name: String,
        result: Result<ValidationOutcome, String>,
    },
    ReportSaved(Result<PathBuf, String>),
}

pub const MSG_INVALID_SPREADSHEET: &str = "flash.invalid_spreadsheet";
pub const MSG_SPREADSHEET_NOT_SPECIFIED: &str = "flash.spreadsheet_not_specified";
pub const MSG_SPREADSHEET_NOT_PROCESSED: &str = "flash.spreadsheet_not_processed";
pub const MSG_TAG_COLUMNS_INVALID: &str = "flash.tag_columns_invalid";
pub const MSG_HED_FILE_NOT_SPECIFIED: &str = "flash.hed_file_not_specified";
pub const MSG_HED_FILE_INVALID: &str = "flash.hed_file_invalid";
pub const MSG_HED_VERSIONS_FAILED: &str = "flash.hed_versions_failed";
pub const MSG_VALIDATING: &str = "flash.validating";
pub const MSG_NO_ISSUES: &str = "flash.no_issues";
pub const MSG_ISSUES_FOUND: &str = "flash.issues_found";
pub const MSG_VALIDATION_FAILED: &str = "flash.validation_failed";
pub const MSG_REPORT_SAVED: &str = "flash.report_saved";
pub const MSG_REPORT_SAVE_FAILED: &str = "flash.report_save_failed";
/// Flash whose text is entirely server-provided.
pub const MSG_RAW: &str = "";

pub fn update(mut state: FormState, event: FormEvent) -> (FormState, Vec<Effect>) {
    let mut effects = Vec::new();

    match event {
        FormEvent::PageLoaded => {
            state.clear_form();
            state.next_generation();
            effects.push(Effect::FetchHedVersions);
        }
        FormEvent::FormReset => {
            state.clear_form();
            state.next_generation();
        }
        FormEvent::FileSelected(path) => {
            effects.extend(on_file_selected(&mut state, path));
        }
        FormEvent::WorksheetChanged(name) => {
            effects.extend(on_worksheet_changed(&mut state, name));
        }
        FormEvent::TagColumnsEdited(text) => {
            state.flashes.remove(&FlashRegion::TagColumns);
            state.tag_columns = text;
        }
        FormEvent::TagColumnToggled(column) => {
            state.flashes.remove(&FlashRegion::TagColumns);
            state.tag_columns = tag_columns::toggle_tag_column(&state.tag_columns, column);
        }
        FormEvent::HasColumnNamesToggled(checked) => state.has_column_names = checked,
        FormEvent::CheckForWarningsToggled(checked) => state.check_for_warnings = checked,
        FormEvent::HedVersionSelected(choice) => {
            state.flashes.remove(&FlashRegion::HedSelect);
            state.select_hed_version(choice);
        }
        FormEvent::HedSchemaFileSelected(path) => {
            if file_kind::has_extension(&path.to_string_lossy(), SCHEMA_EXTENSIONS) {
                state.flashes.remove(&FlashRegion::HedSelect);
                state.hed_other_file = Some(path);
            } else {
                state.set_flash(
                    FlashRegion::HedSelect,
                    Flash::new(FlashCategory::Error, MSG_HED_FILE_INVALID),
                );
            }
        }
        FormEvent::SubmitClicked => {
            effects.extend(on_submit_clicked(&mut state));
        }
        FormEvent::HedVersionsLoaded(Ok(versions)) => state.set_hed_versions(versions),
        FormEvent::HedVersionsLoaded(Err(err)) => {
            state.set_flash(
                FlashRegion::HedSelect,
                Flash::new(FlashCategory::Error, MSG_HED_VERSIONS_FAILED).with_detail(err),
            );
        }
        FormEvent::ColumnsInfoLoaded {
            generation,
            repopulate,
            result,
        } => {
            // A newer selection has been made since this request went out.
            if generation != state.metadata_generation {
                return (state, effects);
            }
            match result {
                Ok(info) => state.apply_columns_info(info, repopulate),
                Err(_) => state.set_flash(
                    FlashRegion::Spreadsheet,
                    Flash::new(FlashCategory::Error, MSG_SPREADSHEET_NOT_PROCESSED),
                ),
            }
        }
        FormEvent::ValidationFinished {
            generation,
            results_name,
            result,
        } => {
            // Submitted for a selection that has since been reset or replaced.
            if generation != state.metadata_generation {
                return (state, effects);
            }
            state.submission_pending = false;
            effects.extend(on_validation_finished(&mut state, results_name, result));
        }
        FormEvent::ReportSaved(Ok(path)) => {
            state.set_flash(
                FlashRegion::Submit,
                Flash::new(FlashCategory::Success, MSG_REPORT_SAVED)
                    .with_detail(path.display().to_string()),
            );
        }
        FormEvent::ReportSaved(Err(err)) => {
            state.set_flash(
                FlashRegion::Submit,
                Flash::new(FlashCategory::Error, MSG_REPORT_SAVE_FAILED).with_detail(err),
            );
        }
    }

    (state, effects)
}

fn on_file_selected(state: &mut FormState, path: PathBuf) -> Option<Effect> {
    state.clear_flashes();
    let path_text = path.to_string_lossy().into_owned();

    let Some(kind) = SpreadsheetKind::classify(&path_text) else {
        state.clear_form();
        state.next_generation();
        state.set_flash(
            FlashRegion::Spreadsheet,
            Flash::new(FlashCategory::Error, MSG_INVALID_SPREADSHEET),
        );
        return None;
    };

    state.clear_tag_columns();
    state.submission_pending = false;
    let name = file_kind::file_name(&path_text);
    state.display_name = name.clone();
    state.spreadsheet = Some(SelectedFile {
        name: name.clone(),
        path: path.clone(),
        kind,
    });

    match kind {
        SpreadsheetKind::Excel => state.worksheet_select_visible = true,
        SpreadsheetKind::Text => {
            state.clear_worksheets();
            state.worksheet_select_visible = false;
        }
    }

    Some(Effect::FetchColumnsInfo(ColumnsInfoRequest {
        path,
        file_name: name,
        worksheet: None,
        repopulate: true,
        generation: state.next_generation(),
    }))
}

fn on_worksheet_changed(state: &mut FormState, name: String) -> Option<Effect> {
    state.clear_flashes();
    let file = state.spreadsheet.clone()?;
    state.worksheet_selected = Some(name.clone());
    state.submission_pending = false;

    Some(Effect::FetchColumnsInfo(ColumnsInfoRequest {
        path: file.path,
        file_name: file.name,
        worksheet: Some(name),
        repopulate: false,
        generation: state.next_generation(),
    }))
}

fn on_submit_clicked(state: &mut FormState) -> Option<Effect> {
    let Some(file) = state.spreadsheet.clone() else {
        state.set_flash(
            FlashRegion::Spreadsheet,
            Flash::new(FlashCategory::Error, MSG_SPREADSHEET_NOT_SPECIFIED),
        );
        return None;
    };

    let Some(columns) = tag_columns::parse_tag_columns(&state.tag_columns) else {
        state.set_flash(
            FlashRegion::TagColumns,
            Flash::new(FlashCategory::Error, MSG_TAG_COLUMNS_INVALID),
        );
        return None;
    };

    let (hed_version, hed_schema_file) = match state.hed_version.clone() {
        HedVersionChoice::Other => match state.hed_other_file.clone() {
            Some(schema) => (None, Some(schema)),
            None => {
                state.set_flash(
                    FlashRegion::HedSelect,
                    Flash::new(FlashCategory::Error, MSG_HED_FILE_NOT_SPECIFIED),
                );
                return None;
            }
        },
        HedVersionChoice::Named(version) if version.is_empty() => (None, None),
        HedVersionChoice::Named(version) => (Some(version), None),
    };

    let worksheet = state.submitted_worksheet().map(str::to_string);
    let results_name = file_kind::results_name(&file.name, worksheet.as_deref());

    state.clear_flashes();
    state.set_flash(
        FlashRegion::Submit,
        Flash::new(FlashCategory::Success, MSG_VALIDATING),
    );
    state.submission_pending = true;

    Some(Effect::SubmitValidation(ValidationRequest {
        path: file.path,
        file_name: file.name,
        worksheet,
        tag_columns: columns,
        has_column_names: state.has_column_names,
        check_for_warnings: state.check_for_warnings,
        hed_version,
        hed_schema_file,
        results_name,
        generation: state.metadata_generation,
    }))
}

fn on_validation_finished(
    state: &mut FormState,
    results_name: String,
    result: Result<ValidationOutcome, String>,
) -> Option<Effect> {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            state.set_flash(
                FlashRegion::Submit,
                Flash::new(FlashCategory::Error, MSG_VALIDATION_FAILED).with_detail(err),
            );
            return None;
        }
    };

    let has_report = !outcome.report.is_empty();
    let flash = match outcome.message.filter(|msg| !msg.is_empty()) {
        Some(message) => Flash::new(outcome.category.unwrap_or_default(), MSG_RAW).with_detail(message),
        None if has_report => Flash::new(FlashCategory::Warning, MSG_ISSUES_FOUND),
        None => Flash::new(FlashCategory::Success, MSG_NO_ISSUES),
    };
    state.set_flash(FlashRegion::Submit, flash);

    if !has_report {
        return None;
    }
    Some(Effect::SaveReport {
        file_name: results_name,
        contents: outcome.report,
    })
}
