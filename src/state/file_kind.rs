use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadsheetKind {
    /// Workbook formats that can hold several worksheets.
    Excel,
    /// Flat tab-separated text with one implicit worksheet.
    Text,
}

pub const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls"];
pub const TEXT_EXTENSIONS: &[&str] = &["tsv", "txt"];
pub const SCHEMA_EXTENSIONS: &[&str] = &["xml", "mediawiki"];

impl SpreadsheetKind {
    pub fn classify(path: &str) -> Option<Self> {
        if has_extension(path, EXCEL_EXTENSIONS) {
            Some(Self::Excel)
        } else if has_extension(path, TEXT_EXTENSIONS) {
            Some(Self::Text)
        } else {
            None
        }
    }

    pub fn has_worksheets(self) -> bool {
        matches!(self, Self::Excel)
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Excel => EXCEL_EXTENSIONS,
            Self::Text => TEXT_EXTENSIONS,
        }
    }
}

/// Case-insensitive check of the suffix after the last `.` of the file name.
/// A bare dot-file such as `.xlsx` counts as having that extension.
pub fn has_extension(path: &str, extensions: &[&str]) -> bool {
    match file_name(path).rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        _ => false,
    }
}

pub fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Name of the issues report for `file_name`, e.g. `report_issues_worksheet_Sheet2.xlsx`.
pub fn results_name(file_name: &str, worksheet: Option<&str>) -> String {
    let mut infix = String::from("issues");
    if let Some(worksheet) = worksheet.filter(|name| !name.is_empty()) {
        infix.push_str("_worksheet_");
        infix.push_str(worksheet);
    }

    match file_name.rfind('.') {
        Some(dot) if dot > 0 => {
            let (base, ext) = file_name.split_at(dot);
            format!("{base}_{infix}{ext}")
        }
        _ => format!("{file_name}_{infix}"),
    }
}
