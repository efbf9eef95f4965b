//! Shared HTML helpers.

use storefront_commerce::prelude::*;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Star display for a rating.
pub fn render_stars(rating: f64, star_count: usize) -> String {
    let stars: String = classify_stars_with(rating, star_count)
        .iter()
        .map(|state| {
            format!(
                r#"<span class="{}">{}</span>"#,
                state.css_class(),
                state.glyph()
            )
        })
        .collect();

    format!(
        r#"<span class="rating-stars" aria-label="{:.1} out of {}">{}</span>"#,
        rating.clamp(0.0, star_count as f64),
        star_count,
        stars
    )
}
