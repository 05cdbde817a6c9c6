//! Command handler layer.
//!
//! ## Files
//! - `help.rs` — deferred help selection and help screen rendering.
//! - `dispatch.rs` — required-argument checks, storage calls, report output.
//!
//! ## Principles
//! - Work from a resolved invocation; never re-parse argv here.
//! - Delegate side effects to `services/*`.
//! - Keep output schema stable.

pub mod dispatch;
pub mod help;

pub use dispatch::{dispatch, emit};
pub use help::{plan, render, Outcome};
