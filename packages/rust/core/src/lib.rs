//! Core pipeline orchestration for GuideForge.
//!
//! This crate ties locating, loading, shape extraction, normalization, and
//! assembly into the end-to-end guide operations (`load_guide`,
//! `build_catalog`).

pub mod assembler;
pub mod pipeline;

pub use assembler::{LegacyMeta, assemble, legacy_meta};
pub use pipeline::{
    CatalogEntry, CatalogFailure, CatalogReport, ProgressReporter, SilentProgress,
    build_catalog, load_guide, transform_document,
};
