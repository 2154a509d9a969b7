pub mod config;
pub mod controller;
pub mod file_kind;
pub mod form_state;
pub mod i18n;
pub mod tag_columns;
