//! Review submission validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::ids::ProductId;

/// Lowest and highest rating a new review may carry.
const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReviewField {
    Rating,
    ReviewerName,
    ReviewText,
}

impl ReviewField {
    /// Field name as sent to the review service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewField::Rating => "rating",
            ReviewField::ReviewerName => "reviewerName",
            ReviewField::ReviewText => "reviewText",
        }
    }
}

impl fmt::Display for ReviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review rejected before it reached the review service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// First field that failed.
    pub field: ReviewField,
    /// Message shown inline next to the form.
    pub message: String,
}

impl ValidationError {
    fn new(field: ReviewField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// What the user has typed into the review form so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Selected star rating; 0 means none picked yet.
    pub rating: u8,
    pub reviewer_name: String,
    pub review_text: String,
}

impl ReviewDraft {
    /// Create a filled-in draft.
    pub fn new(rating: u8, reviewer_name: impl Into<String>, review_text: impl Into<String>) -> Self {
        Self {
            rating,
            reviewer_name: reviewer_name.into(),
            review_text: review_text.into(),
        }
    }

    /// Check the draft and build the payload for the review service.
    ///
    /// Fields are checked in form order (rating, name, text) and the first
    /// failure is returned.
    pub fn validate(&self, product_id: &ProductId) -> Result<ReviewSubmission, ValidationError> {
        if !RATING_RANGE.contains(&self.rating) {
            return Err(ValidationError::new(
                ReviewField::Rating,
                "Please select a rating between 1 and 5 stars",
            ));
        }

        let reviewer_name = self.reviewer_name.trim();
        if reviewer_name.is_empty() {
            return Err(ValidationError::new(
                ReviewField::ReviewerName,
                "Please enter your name",
            ));
        }

        let review_text = self.review_text.trim();
        if review_text.is_empty() {
            return Err(ValidationError::new(
                ReviewField::ReviewText,
                "Please write your review",
            ));
        }

        Ok(ReviewSubmission {
            product_id: product_id.clone(),
            rating: self.rating,
            reviewer_name: reviewer_name.to_string(),
            review_text: review_text.to_string(),
        })
    }

    /// Check if a rating has been picked.
    pub fn has_rating(&self) -> bool {
        self.rating > 0
    }
}

/// Payload handed to the review service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub product_id: ProductId,
    pub rating: u8,
    pub reviewer_name: String,
    pub review_text: String,
}
