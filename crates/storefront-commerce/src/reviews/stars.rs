//! Star rendering states.

use serde::Serialize;

/// Number of stars in a rating display.
pub const DEFAULT_STAR_COUNT: usize = 5;

/// Fill state of one star position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StarState {
    Full,
    Half,
    Empty,
}

impl StarState {
    /// Text glyph for plain-text rendering.
    pub fn glyph(&self) -> &'static str {
        match self {
            StarState::Full => "\u{2605}",
            StarState::Half => "\u{2bea}",
            StarState::Empty => "\u{2606}",
        }
    }

    /// CSS modifier for the star element.
    pub fn css_class(&self) -> &'static str {
        match self {
            StarState::Full => "star star--full",
            StarState::Half => "star star--half",
            StarState::Empty => "star star--empty",
        }
    }
}

/// Classify the five positions of a star display.
///
/// ```
/// use storefront_commerce::reviews::{classify_stars, StarState::*};
/// assert_eq!(classify_stars(3.5), [Full, Full, Full, Half, Empty]);
/// ```
pub fn classify_stars(rating: f64) -> [StarState; DEFAULT_STAR_COUNT] {
    let mut stars = [StarState::Empty; DEFAULT_STAR_COUNT];
    for (slot, state) in stars
        .iter_mut()
        .zip(classify_stars_with(rating, DEFAULT_STAR_COUNT))
    {
        *slot = state;
    }
    stars
}

/// Classify `star_count` positions.
///
/// Positions up to `floor(rating)` are full; if the rating has a fractional
/// part the next position is half; the rest are empty. Non-finite and
/// negative ratings render as all empty.
pub fn classify_stars_with(rating: f64, star_count: usize) -> Vec<StarState> {
    let rating = if rating.is_finite() { rating.max(0.0) } else { 0.0 };
    let full = rating.floor() as usize;
    let has_half = rating.fract() != 0.0;

    (1..=star_count)
        .map(|position| {
            if position <= full {
                StarState::Full
            } else if position == full + 1 && has_half {
                StarState::Half
            } else {
                StarState::Empty
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::StarState::*;
    use super::*;

    #[test]
    fn test_half_star() {
        assert_eq!(classify_stars(3.5), [Full, Full, Full, Half, Empty]);
    }

    #[test]
    fn test_zero_and_five() {
        assert_eq!(classify_stars(0.0), [Empty; 5]);
        assert_eq!(classify_stars(5.0), [Full; 5]);
    }

    #[test]
    fn test_any_fraction_gives_half() {
        assert_eq!(classify_stars(4.1), [Full, Full, Full, Full, Half]);
        assert_eq!(classify_stars(0.2), [Half, Empty, Empty, Empty, Empty]);
    }

    #[test]
    fn test_whole_numbers_have_no_half() {
        assert_eq!(classify_stars(2.0), [Full, Full, Empty, Empty, Empty]);
    }

    #[test]
    fn test_bad_input_renders_empty() {
        assert_eq!(classify_stars(f64::NAN), [Empty; 5]);
        assert_eq!(classify_stars(-1.5), [Empty; 5]);
    }

    #[test]
    fn test_custom_star_count() {
        assert_eq!(classify_stars_with(2.5, 3), vec![Full, Full, Half]);
        assert_eq!(classify_stars_with(9.0, 5), vec![Full; 5]);
        assert!(classify_stars_with(3.0, 0).is_empty());
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(classify_stars(1.5), classify_stars(1.5));
    }
}
