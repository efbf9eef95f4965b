//! Reviews section renderer.

use storefront_commerce::prelude::*;

use super::html::{escape_html, render_stars};
use crate::views::{LoadState, ReviewSectionView};

/// Render the reviews section.
pub fn render_review_section(view: &ReviewSectionView<'_>) -> String {
    let body = match view.state {
        LoadState::Loading => {
            r#"<p class="reviews-loading">Loading reviews...</p>"#.to_string()
        }
        LoadState::Failed(message) => render_reviews_error(message),
        LoadState::Loaded(reviews) if reviews.is_empty() => {
            r#"<p class="reviews-empty">No reviews available for this product yet.</p>"#
                .to_string()
        }
        LoadState::Loaded(reviews) => {
            let shown = match view.options.max_rendered {
                0 => reviews.len(),
                n => n.min(reviews.len()),
            };
            let list: String = reviews[..shown]
                .iter()
                .map(|r| render_single_review(r, view.options.star_count))
                .collect();
            format!(
                r#"{summary}
    <div class="reviews-list">
        {list}
    </div>"#,
                summary = render_summary(view.summary, view.options.star_count),
                list = list
            )
        }
    };

    let toggle = match view.state {
        LoadState::Loaded(_) => {
            let disabled = if view.form.phase() == FormPhase::Submitting {
                " disabled"
            } else {
                ""
            };
            format!(
                r#"<button class="btn-write-review" data-action="toggle-review-form"{}>{}</button>"#,
                disabled,
                view.form.toggle_label()
            )
        }
        _ => String::new(),
    };

    let form = if view.form.is_visible() {
        render_review_form(view.form, view.form_error)
    } else {
        String::new()
    };

    format!(
        r#"<section class="product-reviews" data-section="reviews">
    <header class="reviews-header">
        <h2>Customer Reviews</h2>
        {toggle}
    </header>
    {form}
    {body}
</section>"#,
        toggle = toggle,
        form = form,
        body = body
    )
}

fn render_reviews_error(message: &str) -> String {
    format!(
        r#"<div class="reviews-error">
        <p class="error-message">{}</p>
        <button class="btn-retry" data-action="reload-reviews">Try Again</button>
    </div>"#,
        escape_html(message)
    )
}

fn render_summary(summary: &ReviewSummary, star_count: usize) -> String {
    let distribution: String = summary
        .distribution()
        .map(|(stars, count, pct)| {
            format!(
                r#"<div class="rating-bar">
                <span class="rating-label">{stars} star</span>
                <div class="rating-bar-track">
                    <div class="rating-bar-fill" style="width: {pct:.0}%"></div>
                </div>
                <span class="rating-count">{count}</span>
            </div>"#,
                stars = stars,
                pct = pct,
                count = count
            )
        })
        .collect();

    format!(
        r#"<div class="reviews-summary">
        <div class="average-rating">
            {stars}
            <span class="rating-number">{average} out of {star_count}</span>
            <span class="rating-total">{based_on}</span>
        </div>
        <div class="rating-distribution">
            {distribution}
        </div>
    </div>"#,
        stars = render_stars(summary.average_rating, star_count),
        average = summary.average_label(),
        star_count = star_count,
        based_on = summary.based_on_label(),
        distribution = distribution
    )
}

fn render_single_review(review: &Review, star_count: usize) -> String {
    let title = review
        .title
        .as_deref()
        .map(|t| format!(r#"<h3 class="review-title">{}</h3>"#, escape_html(t)))
        .unwrap_or_default();

    let helpful = review
        .helpful_label()
        .map(|label| {
            format!(
                r#"<footer class="review-footer"><span class="helpful-count">{}</span></footer>"#,
                label
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="review" data-review-id="{id}">
            <header class="review-header">
                <span class="review-avatar">{initial}</span>
                <span class="review-author">{author}</span>
                {stars}
                <span class="review-date">{date}</span>
            </header>
            {title}
            <p class="review-body">{body}</p>
            {helpful}
        </article>"#,
        id = escape_html(review.id.as_str()),
        initial = escape_html(&review.initial()),
        author = escape_html(review.display_name()),
        stars = render_stars(review.rating, star_count),
        date = review.date_label(),
        title = title,
        body = escape_html(review.comment_text()),
        helpful = helpful
    )
}

fn render_review_form(form: &ReviewForm, error: Option<&ValidationError>) -> String {
    let draft = form.draft();
    let submitting = form.phase() == FormPhase::Submitting;

    let rating_buttons: String = (1..=DEFAULT_STAR_COUNT as u8)
        .map(|value| {
            let state = if value <= draft.rating {
                StarState::Full
            } else {
                StarState::Empty
            };
            format!(
                r#"<button type="button" class="{class}" data-rating="{value}" aria-pressed="{pressed}">{glyph}</button>"#,
                class = state.css_class(),
                value = value,
                pressed = (value == draft.rating),
                glyph = state.glyph()
            )
        })
        .collect();

    let error_html = error
        .map(|e| {
            format!(
                r#"<p class="form-error" data-field="{}">{}</p>"#,
                e.field,
                escape_html(&e.message)
            )
        })
        .unwrap_or_default();

    let disabled = if form.can_submit() { "" } else { " disabled" };
    let submit_label = if submitting {
        "Submitting..."
    } else {
        "Submit Review"
    };

    format!(
        r#"<form class="review-form" data-phase="{phase}">
        <div class="form-rating">{rating_buttons}</div>
        <label>Your Name
            <input type="text" name="reviewerName" value="{name}">
        </label>
        <label>Your Review
            <textarea name="reviewText">{text}</textarea>
        </label>
        {error_html}
        <div class="form-actions">
            <button type="submit" class="btn-submit-review"{disabled}>{submit_label}</button>
            <button type="button" class="btn-cancel" data-action="cancel-review"{cancel_disabled}>Cancel</button>
        </div>
    </form>"#,
        phase = form.phase().as_str(),
        rating_buttons = rating_buttons,
        name = escape_html(&draft.reviewer_name),
        text = escape_html(&draft.review_text),
        error_html = error_html,
        disabled = disabled,
        submit_label = submit_label,
        cancel_disabled = if submitting { " disabled" } else { "" }
    )
}
