//! Product listing renderer.

use storefront_commerce::prelude::*;

use super::html::{escape_html, render_stars};
use crate::views::{LoadState, ProductCard};

/// Render the product listing grid.
pub fn render_product_grid(state: &LoadState<Vec<ProductCard>>) -> String {
    let body = match state {
        LoadState::Loading => r#"<p class="products-loading">Loading products...</p>"#.to_string(),
        LoadState::Failed(message) => format!(
            r#"<div class="products-error">
        <p class="error-message">{}</p>
        <button class="btn-retry" data-action="reload-products">Try Again</button>
    </div>"#,
            escape_html(message)
        ),
        LoadState::Loaded(cards) if cards.is_empty() => {
            r#"<p class="products-empty">No products found.</p>"#.to_string()
        }
        LoadState::Loaded(cards) => {
            let items: String = cards.iter().map(render_product_card).collect();
            format!(r#"<div class="product-grid">{}</div>"#, items)
        }
    };

    format!(
        r#"<section class="product-listing" data-section="products">
    {}
</section>"#,
        body
    )
}

/// Render one listing card.
pub fn render_product_card(card: &ProductCard) -> String {
    let image = match &card.image {
        Some(url) => format!(
            r#"<img src="{}" alt="{}" class="product-card-image">"#,
            escape_html(url),
            escape_html(&card.name)
        ),
        None => r#"<div class="product-image-placeholder">No image</div>"#.to_string(),
    };

    let badge = card
        .stock
        .badge()
        .map(|text| {
            format!(
                r#"<span class="badge {}">{}</span>"#,
                card.stock.badge_class(),
                text
            )
        })
        .unwrap_or_default();

    let quick_add = if card.show_quick_add {
        format!(
            r#"<button class="btn-quick-add" data-product-id="{}">Add to Cart</button>"#,
            escape_html(card.id.as_str())
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="product-card">
        <a href="{href}">
            {image}
            {badge}
            <p class="product-card-category">{category}</p>
            <h3 class="product-card-name">{name}</h3>
            <div class="product-card-rating">
                {stars}
                <span class="rating-count">{reviews}</span>
            </div>
            <p class="product-card-price">{price}</p>
        </a>
        {quick_add}
    </article>"#,
        href = escape_html(&card.href),
        image = image,
        badge = badge,
        category = escape_html(&card.category),
        name = escape_html(&card.name),
        stars = render_stars(card.rating, DEFAULT_STAR_COUNT),
        reviews = card.review_count,
        price = card.price,
        quick_add = quick_add
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_links_and_hides_quick_add_when_sold_out() {
        let product = Product::new("p3", "Vase", Money::new(3500, Currency::USD));
        let card = ProductCard::from_product(&product, 10);
        let html = render_product_card(&card);

        assert!(html.contains(r#"href="/product/p3""#));
        assert!(html.contains("Out of Stock"));
        assert!(!html.contains("btn-quick-add"));
    }

    #[test]
    fn test_grid_states() {
        assert!(render_product_grid(&LoadState::Loading).contains("Loading products..."));
        assert!(render_product_grid(&LoadState::Loaded(Vec::new())).contains("No products found."));
    }
}
