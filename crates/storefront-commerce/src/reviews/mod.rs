//! Customer reviews module.
//!
//! Contains the normalized review record, the rating summary shown above the
//! review list, star rendering states, submission validation and the
//! review-authoring form.

mod form;
mod review;
mod stars;
mod submission;
mod summary;

pub use form::{FormEvent, FormPhase, PendingSubmit, ReviewForm};
pub use review::{RawReview, Review};
pub use stars::{classify_stars, classify_stars_with, StarState, DEFAULT_STAR_COUNT};
pub use submission::{ReviewDraft, ReviewField, ReviewSubmission, ValidationError};
pub use summary::{summarize, ReviewSummary, STAR_BUCKETS};

/// Highest rating a review can carry.
pub const MAX_RATING: f64 = 5.0;
