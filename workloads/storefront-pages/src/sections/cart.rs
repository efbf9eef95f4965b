//! Cart section renderer.

use storefront_commerce::prelude::*;

use super::html::escape_html;
use crate::views::LoadState;

/// Render the cart page body.
pub fn render_cart(state: &LoadState<Cart>, free_shipping: bool, shipping_label: &str) -> String {
    let body = match state {
        LoadState::Loading => r#"<p class="cart-loading">Loading cart...</p>"#.to_string(),
        LoadState::Failed(message) => format!(
            r#"<div class="cart-error">
        <p class="error-message">{}</p>
        <button class="btn-retry" data-action="reload-cart">Try Again</button>
    </div>"#,
            escape_html(message)
        ),
        LoadState::Loaded(cart) if cart.is_empty() => r#"<div class="cart-empty">
        <p>Your cart is empty</p>
        <a class="btn-continue" href="/">Continue Shopping</a>
    </div>"#
            .to_string(),
        LoadState::Loaded(cart) => render_cart_contents(cart, free_shipping, shipping_label),
    };

    format!(
        r#"<section class="cart" data-section="cart">
    <h1>Shopping Cart</h1>
    {}
</section>"#,
        body
    )
}

fn render_cart_contents(cart: &Cart, free_shipping: bool, shipping_label: &str) -> String {
    let lines: String = cart.items.iter().map(render_line_item).collect();

    let subtotal = cart
        .subtotal()
        .map(|m| m.display())
        .unwrap_or_else(|_| "-".to_string());

    let shipping = if free_shipping {
        r#"<p class="shipping-note shipping-note--free">Free shipping</p>"#.to_string()
    } else {
        format!(r#"<p class="shipping-note">{}</p>"#, escape_html(shipping_label))
    };

    let count = cart.item_count();
    let plural = if count == 1 { "" } else { "s" };

    format!(
        r#"<ul class="cart-items">{lines}</ul>
    <div class="cart-summary">
        <p class="cart-count">{count} item{plural}</p>
        <p class="cart-subtotal">Subtotal: <strong>{subtotal}</strong></p>
        {shipping}
    </div>"#,
        lines = lines,
        count = count,
        plural = plural,
        subtotal = subtotal,
        shipping = shipping
    )
}

fn render_line_item(item: &LineItem) -> String {
    let total = item
        .total_price()
        .map(|m| m.display())
        .unwrap_or_else(|_| "-".to_string());

    format!(
        r#"<li class="cart-item" data-product-id="{id}">
        <a href="/product/{id}" class="cart-item-name">{name}</a>
        <span class="cart-item-price">{price}</span>
        <input type="number" class="cart-item-quantity" min="0" value="{quantity}">
        <span class="cart-item-total">{total}</span>
        <button class="btn-remove" data-action="remove-item">Remove</button>
    </li>"#,
        id = escape_html(item.product_id.as_str()),
        name = escape_html(&item.product_name),
        price = item.unit_price.display(),
        quantity = item.quantity,
        total = total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_contents() {
        let mut cart = Cart::default();
        cart.add_item(ProductId::new("p1"), "Mug", 2, Money::new(1250, Currency::USD))
            .unwrap();
        let html = render_cart(&LoadState::Loaded(cart), false, "Free shipping on orders over $50");

        assert!(html.contains("2 items"));
        assert!(html.contains("Subtotal: <strong>$25.00</strong>"));
        assert!(html.contains("Free shipping on orders over $50"));
    }

    #[test]
    fn test_empty_cart() {
        let html = render_cart(&LoadState::Loaded(Cart::default()), false, "");
        assert!(html.contains("Your cart is empty"));
    }
}
