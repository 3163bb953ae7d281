//! Guide location and raw document loading for GuideForge.
//!
//! Two small pieces sit in front of the transformation engine:
//! - [`locator::resolve`] maps a guide id to a location in the content tree
//!   (pure, total, no I/O)
//! - [`FsStore`] performs the single byte-read of a transformation and parses
//!   the bytes into a generic JSON value, with distinct failures for
//!   not-found, unreadable, and malformed content

pub mod locator;
pub mod store;

pub use locator::{Location, resolve};
pub use store::{FsStore, GuideStore, RawDocument};
