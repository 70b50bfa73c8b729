//! Page model and section controllers for the Period Grade System.
//!
//! This crate sits between `pgs-api` and a front end. It owns:
//!
//! - **[`Page`]**: regions holding typed [`Fragment`]s, form fields,
//!   controls with busy guards, modals, and the cancellation token every
//!   timer hangs off. The presenter operations (`show_loading`,
//!   `show_message`, `clear_message`) are methods on it.
//!
//! - **[`Sections`]**: one async workflow per user action (students,
//!   modules, grade records), each settling into a [`Settled`] value.
//!   A [`Layout`] names the regions and fields, so the dashboard and tab
//!   pages share the same controllers.
//!
//! - **Pure helpers**: CPF/e-mail/phone validation, the phone mask,
//!   pt-BR formatting, and JSON/CSV export.

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod model;
pub mod page;
mod presenter;
pub mod sections;
pub mod validate;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{SessionConfig, Timing};
pub use error::CoreError;
pub use export::{Export, ExportFormat};
pub use model::{GradeBand, Selection};
pub use page::{BusyControl, Control, Page};
pub use sections::{Layout, LayoutPreset, Sections, Settled, View};
pub use view::{Fragment, Severity};
