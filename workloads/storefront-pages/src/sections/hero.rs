//! Product detail section renderer.

use storefront_commerce::prelude::*;

use super::html::{escape_html, render_stars};
use crate::views::{CartAction, ImageGallery, LoadState, ProductDetailView, QuantitySelector};

/// Render the product detail section.
pub fn render_product_detail(view: &ProductDetailView<'_>) -> String {
    match view.state {
        LoadState::Loading => r#"<section class="product-hero product-hero--loading" data-section="hero">
    <p class="product-loading">Loading product...</p>
</section>"#
            .to_string(),
        LoadState::Failed(message) => render_hero_fallback(message),
        LoadState::Loaded(product) => render_hero(product, view),
    }
}

fn render_hero(product: &Product, view: &ProductDetailView<'_>) -> String {
    let status = product.stock_status(view.low_stock_threshold);
    let badge = status
        .badge()
        .map(|text| {
            format!(
                r#"<span class="badge {}">{}</span>"#,
                status.badge_class(),
                text
            )
        })
        .unwrap_or_default();

    let actions = if product.is_purchasable() {
        render_purchase_actions(view.quantity, view.action)
    } else {
        r#"<p class="out-of-stock">This item is currently out of stock</p>"#.to_string()
    };

    format!(
        r#"<section class="product-hero" data-section="hero">
    <a class="back-link" href="/">Back to products</a>
    {gallery}
    <div class="product-info">
        <p class="product-category">{category}</p>
        <h1 class="product-name">{name}</h1>
        <div class="product-rating">
            {stars}
            <span class="rating-count">({reviews} reviews)</span>
        </div>
        <p class="product-price">{price}</p>
        {badge}
        <div class="product-description">{description}</div>
        {actions}
        <p class="shipping-note">{shipping}</p>
    </div>
</section>"#,
        gallery = render_gallery(view.gallery, &product.name),
        category = escape_html(&product.category),
        name = escape_html(&product.name),
        stars = render_stars(product.rating, DEFAULT_STAR_COUNT),
        reviews = product.review_count,
        price = product.price.display(),
        badge = badge,
        description = escape_html(&product.description),
        actions = actions,
        shipping = escape_html(view.free_shipping_label)
    )
}

fn render_gallery(gallery: &ImageGallery, alt: &str) -> String {
    let main = match gallery.selected_image() {
        Some(url) => format!(
            r#"<img src="{}" alt="{}" class="product-image-main">"#,
            escape_html(url),
            escape_html(alt)
        ),
        None => r#"<div class="product-image-placeholder">No image available</div>"#.to_string(),
    };

    let thumbnails = if gallery.has_thumbnails() {
        let items: String = gallery
            .images()
            .iter()
            .enumerate()
            .map(|(index, url)| {
                let selected = if index == gallery.selected() {
                    " product-thumbnail--selected"
                } else {
                    ""
                };
                format!(
                    r#"<button class="product-thumbnail{}" data-image-index="{}"><img src="{}" alt="{}"></button>"#,
                    selected,
                    index,
                    escape_html(url),
                    escape_html(alt)
                )
            })
            .collect();
        format!(r#"<div class="product-thumbnails">{}</div>"#, items)
    } else {
        String::new()
    };

    format!(
        r#"<div class="product-gallery">
        {}
        {}
    </div>"#,
        main, thumbnails
    )
}

fn render_purchase_actions(quantity: &QuantitySelector, action: CartAction) -> String {
    let adding = action == CartAction::Adding;
    let disabled = |off: bool| if off { " disabled" } else { "" };

    format!(
        r#"<div class="quantity-selector">
            <button class="btn-decrement" data-action="decrement"{dec}>-</button>
            <span class="quantity-value">{value}</span>
            <button class="btn-increment" data-action="increment"{inc}>+</button>
        </div>
        <div class="product-actions">
            <button class="btn-add-to-cart" data-action="add-to-cart"{busy}>{add_label}</button>
            <button class="btn-buy-now" data-action="buy-now"{busy}>Buy Now</button>
        </div>"#,
        dec = disabled(!quantity.can_decrement()),
        value = quantity.value(),
        inc = disabled(!quantity.can_increment()),
        busy = disabled(adding),
        add_label = if adding { "Adding..." } else { "Add to Cart" }
    )
}

/// Render hero fallback when the product fails to load.
pub fn render_hero_fallback(message: &str) -> String {
    format!(
        r#"<section class="product-hero product-hero--error" data-section="hero">
    <div class="error-message">
        <p>{}</p>
        <button class="btn-retry" data-action="reload-product">Try Again</button>
        <a class="back-link" href="/">Back to products</a>
    </div>
</section>"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_of<'a>(
        state: &'a LoadState<Product>,
        gallery: &'a ImageGallery,
        quantity: &'a QuantitySelector,
    ) -> ProductDetailView<'a> {
        ProductDetailView {
            state,
            gallery,
            quantity,
            action: CartAction::Idle,
            low_stock_threshold: 10,
            free_shipping_label: "Free shipping on orders over $50",
        }
    }

    #[test]
    fn test_hero_low_stock() {
        let product = Product::new("p1", "Lamp & Shade", Money::new(4999, Currency::USD))
            .with_image("/a.jpg")
            .with_stock(3);
        let gallery = ImageGallery::new(product.images.clone());
        let quantity = QuantitySelector::new(product.stock);
        let state = LoadState::Loaded(product);

        let html = render_product_detail(&view_of(&state, &gallery, &quantity));
        assert!(html.contains("Lamp &amp; Shade"));
        assert!(html.contains("$49.99"));
        assert!(html.contains("Only 3 left"));
        assert!(!html.contains("product-thumbnails"));
        assert!(html.contains(r#"data-action="decrement" disabled"#));
        assert!(html.contains("Free shipping on orders over $50"));
    }

    #[test]
    fn test_hero_out_of_stock_hides_actions() {
        let product = Product::new("p2", "Chair", Money::new(100, Currency::USD));
        let gallery = ImageGallery::default();
        let quantity = QuantitySelector::default();
        let state = LoadState::Loaded(product);

        let html = render_product_detail(&view_of(&state, &gallery, &quantity));
        assert!(html.contains("Out of Stock"));
        assert!(html.contains("No image available"));
        assert!(!html.contains("btn-add-to-cart"));
    }

    #[test]
    fn test_fallback() {
        let html = render_hero_fallback("Product not found");
        assert!(html.contains("Product not found"));
        assert!(html.contains("Try Again"));
    }
}
