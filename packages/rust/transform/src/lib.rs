//! Legacy-shape classification, extraction, and content normalization.
//!
//! This crate is the branching heart of the engine:
//! - [`shapes::ShapeRegistry`] recognizes which legacy shape a document uses
//!   and extracts its groups into a shape-agnostic intermediate form
//! - [`normalize`] turns raw items into unified content items and groups
//!   into unified contexts
//! - [`concepts`] extracts the optional top-level definitions block
//!
//! Everything here is pure computation over an already-parsed document; the
//! crate performs no I/O.

pub mod concepts;
pub mod normalize;
pub mod shapes;
pub mod text;

pub use concepts::extract_concepts;
pub use normalize::{ItemOrigin, build_context, normalize_exercise, normalize_item};
pub use shapes::{
    MINIMAL_SHAPE, RawContextGroup, RawItem, RawItemKind, ShapeExtractor, ShapeRegistry,
};
