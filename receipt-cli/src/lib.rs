pub mod app;
pub mod config;
pub mod exporter;
pub mod form_file;
pub mod logging;
