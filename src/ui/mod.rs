pub mod actions;
pub mod app;
pub mod upload_form;
