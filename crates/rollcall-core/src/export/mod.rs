// ABOUTME: Module root for attendance log exporters (Markdown, YAML).
// ABOUTME: Re-exports all export functions for convenient access.

pub mod markdown;
pub mod yaml;

pub use markdown::export_markdown;
pub use yaml::export_yaml;
