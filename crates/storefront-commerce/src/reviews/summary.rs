//! Rating summary over a loaded review list.

use serde::Serialize;

use crate::reviews::Review;

/// Number of star buckets in the distribution (1 through 5).
pub const STAR_BUCKETS: usize = 5;

/// Aggregate shown above the review list.
///
/// Derived from the full list every time it changes; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    /// Mean rating, 0 for an empty list.
    pub average_rating: f64,
    /// Number of reviews.
    pub total_count: usize,
    /// Reviews per star bucket; index 0 is the 1-star bucket.
    pub bucket_counts: [usize; STAR_BUCKETS],
    /// Share of all reviews per bucket, 0-100.
    pub bucket_percentages: [f64; STAR_BUCKETS],
    /// Reviews whose rating floors to 0 and so fall in no bucket.
    pub unrated_count: usize,
}

impl Default for ReviewSummary {
    fn default() -> Self {
        Self::empty()
    }
}

impl ReviewSummary {
    /// Summary of an empty list.
    pub fn empty() -> Self {
        Self {
            average_rating: 0.0,
            total_count: 0,
            bucket_counts: [0; STAR_BUCKETS],
            bucket_percentages: [0.0; STAR_BUCKETS],
            unrated_count: 0,
        }
    }

    /// Count for a star level (1-5); 0 for anything else.
    pub fn count_for(&self, stars: u8) -> usize {
        bucket_index(stars)
            .map(|i| self.bucket_counts[i])
            .unwrap_or(0)
    }

    /// Percentage for a star level (1-5); 0 for anything else.
    pub fn percentage_for(&self, stars: u8) -> f64 {
        bucket_index(stars)
            .map(|i| self.bucket_percentages[i])
            .unwrap_or(0.0)
    }

    /// Sum of all bucket counts.
    pub fn bucketed_count(&self) -> usize {
        self.bucket_counts.iter().sum()
    }

    /// Distribution rows from 5 stars down to 1: `(stars, count, percentage)`.
    pub fn distribution(&self) -> impl Iterator<Item = (u8, usize, f64)> + '_ {
        (1..=STAR_BUCKETS as u8)
            .rev()
            .map(move |stars| (stars, self.count_for(stars), self.percentage_for(stars)))
    }

    /// Average with one decimal place, e.g. "4.3".
    pub fn average_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }

    /// "Based on N review(s)".
    pub fn based_on_label(&self) -> String {
        let plural = if self.total_count == 1 { "" } else { "s" };
        format!("Based on {} review{}", self.total_count, plural)
    }

    /// Check if there is nothing to summarize.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

fn bucket_index(stars: u8) -> Option<usize> {
    match stars as usize {
        s @ 1..=STAR_BUCKETS => Some(s - 1),
        _ => None,
    }
}

/// Summarize a product's reviews.
///
/// Ratings are expected to be normalized already (see [`Review`]); each
/// review lands in the bucket of its floored rating, and reviews below 1 are
/// counted as unrated. An empty list yields [`ReviewSummary::empty`].
pub fn summarize(reviews: &[Review]) -> ReviewSummary {
    if reviews.is_empty() {
        return ReviewSummary::empty();
    }

    let mut summary = ReviewSummary::empty();
    let mut rating_sum = 0.0;

    for review in reviews {
        rating_sum += review.rating;
        match bucket_index(review.rating.floor() as u8) {
            Some(i) => summary.bucket_counts[i] += 1,
            None => summary.unrated_count += 1,
        }
    }

    let total = reviews.len();
    summary.total_count = total;
    summary.average_rating = rating_sum / total as f64;
    for (pct, count) in summary
        .bucket_percentages
        .iter_mut()
        .zip(summary.bucket_counts.iter())
    {
        *pct = *count as f64 / total as f64 * 100.0;
    }

    summary
}
