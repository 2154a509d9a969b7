use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::state::file_kind::{self, SpreadsheetKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashRegion {
    Spreadsheet,
    TagColumns,
    HedSelect,
    Submit,
}

impl FlashRegion {
    pub fn id(self) -> &'static str {
        match self {
            Self::Spreadsheet => "spreadsheet-flash",
            Self::TagColumns => "tag-columns-flash",
            Self::HedSelect => "hed-select-flash",
            Self::Submit => "spreadsheet-validation-submit-flash",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    #[default]
    Success,
    Warning,
    Error,
}

impl FlashCategory {
    /// Parses the category header sent by the validation service.
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Success,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Warning => "flash-warning",
            Self::Error => "flash-error",
        }
    }
}

/// Region-scoped message. `key` is an i18n key; `detail` is appended verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub key: String,
    pub detail: Option<String>,
}

impl Flash {
    pub fn new(category: FlashCategory, key: &str) -> Self {
        Self {
            category,
            key: key.to_string(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub kind: SpreadsheetKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HedVersionChoice {
    Named(String),
    Other,
}

/// Dropdown value of the "Other" HED version entry.
pub const HED_OTHER_OPTION: &str = "Other";

impl HedVersionChoice {
    pub fn from_option_value(value: &str) -> Self {
        if value == HED_OTHER_OPTION {
            Self::Other
        } else {
            Self::Named(value.to_string())
        }
    }

    pub fn option_value(&self) -> &str {
        match self {
            Self::Named(version) => version,
            Self::Other => HED_OTHER_OPTION,
        }
    }
}

impl Default for HedVersionChoice {
    fn default() -> Self {
        Self::Named(String::new())
    }
}

/// Worksheet and column metadata reported by the columns-info endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsInfo {
    #[serde(rename = "worksheet-names")]
    pub worksheet_names: Vec<String>,
    #[serde(rename = "worksheet-selected")]
    pub worksheet_selected: Option<String>,
    #[serde(rename = "column-names", deserialize_with = "header_cells")]
    pub column_names: Vec<Option<String>>,
    #[serde(rename = "tag-column-indices")]
    pub tag_column_indices: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub spreadsheet: Option<SelectedFile>,
    pub display_name: String,
    pub worksheet_names: Vec<String>,
    pub worksheet_selected: Option<String>,
    pub column_names: Vec<String>,
    pub tag_columns: String,
    pub has_column_names: bool,
    pub check_for_warnings: bool,
    pub hed_versions: Vec<String>,
    pub hed_version: HedVersionChoice,
    pub hed_other_file: Option<PathBuf>,
    pub worksheet_select_visible: bool,
    pub column_names_visible: bool,
    pub hed_other_upload_visible: bool,
    pub flashes: BTreeMap<FlashRegion, Flash>,
    pub metadata_generation: u64,
    pub submission_pending: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            spreadsheet: None,
            display_name: String::new(),
            worksheet_names: Vec::new(),
            worksheet_selected: None,
            column_names: Vec::new(),
            tag_columns: String::new(),
            has_column_names: true,
            check_for_warnings: false,
            hed_versions: Vec::new(),
            hed_version: HedVersionChoice::default(),
            hed_other_file: None,
            worksheet_select_visible: false,
            column_names_visible: false,
            hed_other_upload_visible: false,
            flashes: BTreeMap::new(),
            metadata_generation: 0,
            submission_pending: false,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flash(&self, region: FlashRegion) -> Option<&Flash> {
        self.flashes.get(&region)
    }

    pub fn set_flash(&mut self, region: FlashRegion, flash: Flash) {
        self.flashes.insert(region, flash);
    }

    pub fn clear_flashes(&mut self) {
        self.flashes.clear();
    }

    /// Resets every field tied to the spreadsheet. The loaded HED version list survives.
    pub fn clear_form(&mut self) {
        let hed_versions = std::mem::take(&mut self.hed_versions);
        let generation = self.metadata_generation;
        *self = Self {
            hed_version: default_hed_version(&hed_versions),
            hed_versions,
            metadata_generation: generation,
            ..Self::default()
        };
    }

    pub fn clear_tag_columns(&mut self) {
        self.tag_columns.clear();
        self.column_names.clear();
        self.column_names_visible = false;
    }

    pub fn clear_worksheets(&mut self) {
        self.worksheet_names.clear();
        self.worksheet_selected = None;
    }

    pub fn next_generation(&mut self) -> u64 {
        self.metadata_generation = self.metadata_generation.wrapping_add(1);
        self.metadata_generation
    }

    pub fn spreadsheet_kind(&self) -> Option<SpreadsheetKind> {
        self.spreadsheet.as_ref().map(|file| file.kind)
    }

    /// Worksheet name sent with a submission. Text spreadsheets never carry one.
    pub fn submitted_worksheet(&self) -> Option<&str> {
        match self.spreadsheet_kind() {
            Some(kind) if kind.has_worksheets() => {
                self.worksheet_selected.as_deref().filter(|name| !name.is_empty())
            }
            _ => None,
        }
    }

    pub fn results_name(&self) -> Option<String> {
        let file = self.spreadsheet.as_ref()?;
        Some(file_kind::results_name(&file.name, self.submitted_worksheet()))
    }

    pub fn set_hed_versions(&mut self, versions: Vec<String>) {
        let keep_current = match &self.hed_version {
            HedVersionChoice::Named(current) => versions.contains(current),
            HedVersionChoice::Other => true,
        };
        if !keep_current {
            self.hed_version = default_hed_version(&versions);
        }
        self.hed_versions = versions;
    }

    pub fn select_hed_version(&mut self, choice: HedVersionChoice) {
        self.hed_other_upload_visible = matches!(choice, HedVersionChoice::Other);
        if !self.hed_other_upload_visible {
            self.hed_other_file = None;
        }
        self.hed_version = choice;
    }

    pub fn apply_columns_info(&mut self, info: ColumnsInfo, repopulate: bool) {
        if repopulate && !info.worksheet_names.is_empty() {
            self.worksheet_select_visible = true;
            self.worksheet_selected = info
                .worksheet_selected
                .clone()
                .filter(|name| info.worksheet_names.contains(name))
                .or_else(|| info.worksheet_names.first().cloned());
            self.worksheet_names = info.worksheet_names;
        }

        self.column_names = info
            .column_names
            .into_iter()
            .enumerate()
            .map(|(index, name)| name.unwrap_or_else(|| format!("Column {}", index + 1)))
            .collect();
        self.column_names_visible = !self.column_names.is_empty();

        if !info.tag_column_indices.is_empty() {
            self.tag_columns = crate::state::tag_columns::format_tag_columns(&info.tag_column_indices);
        }
    }
}

/// Header cells come straight from the workbook, so numbers and booleans
/// show up next to strings. Empty cells stay `None`.
fn header_cells<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let cells = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(cells
        .into_iter()
        .map(|cell| match cell {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        })
        .collect())
}

fn default_hed_version(versions: &[String]) -> HedVersionChoice {
    HedVersionChoice::Named(versions.first().cloned().unwrap_or_default())
}
