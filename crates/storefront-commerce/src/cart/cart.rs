//! Cart and line item types.

use crate::error::CommerceError;
use crate::ids::{CartId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Items in the cart, in insertion order.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            currency,
        }
    }

    /// Add an item to the cart.
    ///
    /// Adding a product that is already in the cart merges the quantities.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The merged quantity would exceed MAX_QUANTITY_PER_ITEM
    /// - The price currency differs from the cart currency
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            return Ok(());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.items.push(LineItem {
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity,
        });
        Ok(())
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item. Returns whether the item existed.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove an item from the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by product ID.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(LineItem::total_price)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(lines.iter(), self.currency).ok_or(CommerceError::Overflow)
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub product_name: String,
    /// Unit price at the time it was added.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
}

impl LineItem {
    /// Unit price times quantity.
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::default();
        cart.add_item(ProductId::new("p1"), "Mug", 2, usd(1250)).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().unwrap(), usd(2500));
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = Cart::default();
        cart.add_item(ProductId::new("p1"), "Mug", 2, usd(1000)).unwrap();
        cart.add_item(ProductId::new("p1"), "Mug", 3, usd(1000)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::default();
        let err = cart
            .add_item(ProductId::new("p1"), "Mug", 0, usd(1000))
            .unwrap_err();
        assert_eq!(err, CommerceError::InvalidQuantity(0));
    }

    #[test]
    fn test_merge_respects_limit() {
        let mut cart = Cart::default();
        cart.add_item(ProductId::new("p1"), "Mug", 9000, usd(100)).unwrap();
        let err = cart
            .add_item(ProductId::new("p1"), "Mug", 1000, usd(100))
            .unwrap_err();
        assert_eq!(err, CommerceError::QuantityExceedsLimit(10000, MAX_QUANTITY_PER_ITEM));
        assert_eq!(cart.item_count(), 9000);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::default();
        let id = ProductId::new("p1");
        cart.add_item(id.clone(), "Mug", 2, usd(1000)).unwrap();

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());
        assert!(!cart.update_quantity(&id, 3).unwrap());
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut cart = Cart::default();
        let err = cart
            .add_item(ProductId::new("p1"), "Mug", 1, Money::new(100, Currency::EUR))
            .unwrap_err();
        assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
    }
}
