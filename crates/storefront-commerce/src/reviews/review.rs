//! Review records and their ingestion from service payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ProductId, ReviewId};
use crate::reviews::MAX_RATING;

/// A customer review, normalized at ingestion.
///
/// Deserializing a `Review` goes through [`RawReview`], so missing or
/// malformed fields are resolved once here and never at render time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "RawReview")]
pub struct Review {
    /// Identifier assigned by the review service.
    pub id: ReviewId,
    /// Product being reviewed.
    pub product_id: ProductId,
    /// Rating in `[0, 5]`, possibly fractional.
    pub rating: f64,
    /// Display name of the reviewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Short headline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Review body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// When the review was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Helpfulness votes.
    pub helpful: u32,
}

impl Review {
    /// Create a review with only a rating set.
    pub fn new(id: impl Into<ReviewId>, product_id: impl Into<ProductId>, rating: f64) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            rating: normalize_rating(Some(rating)),
            customer_name: None,
            title: None,
            comment: None,
            date: None,
            helpful: 0,
        }
    }

    /// Set the reviewer name.
    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = non_blank(name.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_blank(title.into());
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = non_blank(comment.into());
        self
    }

    /// Set the date.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the helpful vote count.
    pub fn with_helpful(mut self, helpful: u32) -> Self {
        self.helpful = helpful;
        self
    }

    /// Name shown next to the review.
    pub fn display_name(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("Anonymous")
    }

    /// Avatar letter: first character of the name, upper-cased.
    pub fn initial(&self) -> String {
        self.customer_name
            .as_deref()
            .and_then(|name| name.chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Review body, or a placeholder.
    pub fn comment_text(&self) -> &str {
        self.comment.as_deref().unwrap_or("No comment provided")
    }

    /// Long-form date, e.g. "January 15, 2024".
    pub fn date_label(&self) -> String {
        match self.date {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => "Unknown date".to_string(),
        }
    }

    /// Rating with one decimal place.
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Helpfulness line, only when someone voted.
    pub fn helpful_label(&self) -> Option<String> {
        (self.helpful > 0).then(|| format!("{} people found this helpful", self.helpful))
    }
}

/// A review exactly as a service sent it.
///
/// Every field is optional and loosely typed; ids and ratings may arrive as
/// numbers or strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    #[serde(default, alias = "Id")]
    pub id: Option<Value>,
    #[serde(default)]
    pub product_id: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default, alias = "reviewerName")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "reviewText")]
    pub comment: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub helpful: Option<Value>,
}

impl From<RawReview> for Review {
    fn from(raw: RawReview) -> Self {
        let rating = raw.rating.as_ref().and_then(value_to_f64);
        Self {
            id: raw
                .id
                .as_ref()
                .and_then(value_to_string)
                .map(ReviewId::new)
                .unwrap_or_else(ReviewId::generate),
            product_id: ProductId::new(
                raw.product_id
                    .as_ref()
                    .and_then(value_to_string)
                    .unwrap_or_default(),
            ),
            rating: normalize_rating(rating),
            customer_name: raw.customer_name.and_then(non_blank),
            title: raw.title.and_then(non_blank),
            comment: raw.comment.and_then(non_blank),
            date: raw.date.as_deref().and_then(parse_date),
            helpful: raw.helpful.as_ref().map(value_to_count).unwrap_or(0),
        }
    }
}

/// Coerce a possibly absent rating into `[0, 5]`.
fn normalize_rating(rating: Option<f64>) -> f64 {
    match rating {
        Some(r) if r.is_finite() => r.clamp(0.0, MAX_RATING),
        _ => 0.0,
    }
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_count(value: &Value) -> u32 {
    let count = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    count.map(|c| u32::try_from(c).unwrap_or(u32::MAX)).unwrap_or(0)
}

/// Accepts RFC 3339 timestamps, naive timestamps and plain dates.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Review {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_ingest_full_record() {
        let review = parse(
            r#"{
                "Id": 7,
                "productId": 3,
                "rating": 4.5,
                "customerName": "jane",
                "title": "Solid",
                "comment": "Works well",
                "date": "2024-01-15T10:30:00Z",
                "helpful": 12
            }"#,
        );

        assert_eq!(review.id.as_str(), "7");
        assert_eq!(review.product_id.as_str(), "3");
        assert_eq!(review.rating, 4.5);
        assert_eq!(review.display_name(), "jane");
        assert_eq!(review.initial(), "J");
        assert_eq!(review.date_label(), "January 15, 2024");
        assert_eq!(
            review.helpful_label().as_deref(),
            Some("12 people found this helpful")
        );
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let review = parse(r#"{"id": "r1"}"#);

        assert_eq!(review.rating, 0.0);
        assert_eq!(review.display_name(), "Anonymous");
        assert_eq!(review.initial(), "?");
        assert_eq!(review.comment_text(), "No comment provided");
        assert_eq!(review.date_label(), "Unknown date");
        assert_eq!(review.helpful, 0);
        assert_eq!(review.helpful_label(), None);
        assert_eq!(review.title, None);
    }

    #[test]
    fn test_null_and_string_ratings() {
        assert_eq!(parse(r#"{"rating": null}"#).rating, 0.0);
        assert_eq!(parse(r#"{"rating": "3.5"}"#).rating, 3.5);
        assert_eq!(parse(r#"{"rating": "great"}"#).rating, 0.0);
    }

    #[test]
    fn test_out_of_range_ratings_are_clamped() {
        assert_eq!(parse(r#"{"rating": 7}"#).rating, 5.0);
        assert_eq!(parse(r#"{"rating": -2}"#).rating, 0.0);
        assert_eq!(Review::new("r", "p", f64::NAN).rating, 0.0);
    }

    #[test]
    fn test_blank_strings_become_absent() {
        let review = parse(r#"{"customerName": "   ", "comment": "", "title": " Nice "}"#);
        assert_eq!(review.customer_name, None);
        assert_eq!(review.comment, None);
        assert_eq!(review.title.as_deref(), Some("Nice"));
    }

    #[test]
    fn test_submission_field_aliases() {
        let review = parse(r#"{"reviewerName": "Sam", "reviewText": "Good", "rating": 4}"#);
        assert_eq!(review.display_name(), "Sam");
        assert_eq!(review.comment_text(), "Good");
    }

    #[test]
    fn test_plain_date_and_bad_date() {
        assert_eq!(parse(r#"{"date": "2023-12-01"}"#).date_label(), "December 1, 2023");
        assert_eq!(parse(r#"{"date": "yesterday"}"#).date_label(), "Unknown date");
    }

    #[test]
    fn test_serialized_review_reads_back() {
        let review = Review::new("r1", "p1", 4.0)
            .with_customer_name("Ada")
            .with_helpful(2);
        let json = serde_json::to_string(&review).unwrap();
        let back: Review = serde_json::from_str(&json).unwrap();
        assert_eq!(back, review);
    }
}
