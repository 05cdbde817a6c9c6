//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — components, actions, resources and output envelopes.
//! - `constants.rs` — binary name, default paths, env var names.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! `Resource`, `SearchHit` and `CloneReport` are the `--json` output schema.

pub mod constants;
pub mod models;
