#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod export;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
