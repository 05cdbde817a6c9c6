//! Service layer containing side-effect helpers.
//!
//! ## Service map
//! - `storage.rs` — `ResourceStore` and the file-per-resource store + audit log.
//! - `settings.rs` — settings file and root option merging.
//! - `editor.rs` — external editor launcher for `edit`.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod editor;
pub mod output;
pub mod settings;
pub mod storage;
