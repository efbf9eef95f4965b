//! Structured logging for storefront views.
//!
//! This crate provides:
//! - `ViewId` - Identifier correlating every log line of one page view
//! - `StructuredLogger` - Structured logging with view context
//! - `LogBuilder` - Fluent API for entries with fields
//! - `LogCapture` - In-memory capture of emitted entries

mod logging;
mod view;

pub use logging::*;
pub use view::ViewId;
