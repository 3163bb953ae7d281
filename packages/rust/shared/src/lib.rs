//! Shared types, error model, and configuration for GuideForge.
//!
//! This crate is the foundation depended on by all other GuideForge crates.
//! It provides:
//! - [`GuideError`], the unified error type
//! - The unified guide model ([`UnifiedGuide`], [`Context`], [`ContentItem`],
//!   [`Concept`], [`GuideMetadata`])
//! - Classification vocabulary ([`GuideCategory`], [`Difficulty`],
//!   [`ContentType`])
//! - Configuration ([`AppConfig`], [`TransformOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, TransformConfig, TransformOptions, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{GuideError, Result};
pub use types::{
    CURRENT_SCHEMA_VERSION, Concept, ContentItem, ContentType, Context, Difficulty,
    Exercise, GuideCategory, GuideId, GuideMetadata, UnifiedGuide,
};
