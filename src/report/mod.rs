//! Report renderers for classification results.
//!
//! - [`html`] — the dashboard page: summary headings plus the annotated plain
//!   and verbose trees with a toggle.
//! - [`terminal`] — colored summary box; per-status tables with `--verbose`.

pub mod html;
pub mod terminal;
