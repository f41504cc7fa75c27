//! Shopping cart.
//!
//! The cart holds a denormalized snapshot of each added product (title,
//! price, discount, weight) so its totals stay stable even when the
//! catalog list is refetched. Its subtotal and total weight are the
//! inputs the shipping calculator works from.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{CartId, CustomerId, LineItemId, ProductId, ShippingMethodId};
use crate::money::{Currency, Money};
use crate::shipping::ShippingRequest;
use crate::weight::Weight;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique line identifier.
    pub id: LineItemId,
    /// The product this line holds.
    pub product_id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Unit price before discount.
    pub unit_price: Money,
    /// Percent off the unit price, 0..=100.
    pub discount_percent: u8,
    /// Unit weight for shipping.
    pub unit_weight: Weight,
    /// Quantity.
    pub quantity: u32,
}

impl CartItem {
    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: LineItemId::generate(),
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            discount_percent: product.discount_percent,
            unit_weight: product.weight,
            quantity,
        }
    }

    /// Unit price after discount, rounded half up to the cent.
    pub fn sale_price(&self) -> Money {
        self.unit_price
            .percentage(100u8.saturating_sub(self.discount_percent))
    }

    /// Line total (`sale_price * quantity`), `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.sale_price().try_multiply(i64::from(self.quantity))
    }

    /// Line weight (`unit_weight * quantity`), `None` on overflow.
    pub fn line_weight(&self) -> Option<Weight> {
        self.unit_weight.try_multiply(i64::from(self.quantity))
    }
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Owning customer, if the session is authenticated.
    pub customer_id: Option<CustomerId>,
    /// Cart currency; every added product must match it.
    pub currency: Currency,
    /// Lines in the cart.
    pub items: Vec<CartItem>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            customer_id: None,
            currency,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product to the cart, merging with an existing line for the
    /// same product.
    ///
    /// Returns an error if the quantity is zero, the merged quantity
    /// would exceed [`MAX_QUANTITY_PER_ITEM`], or the product's currency
    /// does not match the cart's.
    pub fn add_product(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<LineItemId, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if product.currency() != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.currency().code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
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
            self.updated_at = current_timestamp();
            return Ok(existing.id.clone());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = CartItem::from_product(product, quantity);
        let id = item.id.clone();
        self.items.push(item);
        self.updated_at = current_timestamp();
        Ok(id)
    }

    /// Update a line's quantity; zero removes the line.
    ///
    /// Returns whether a line was found.
    pub fn update_quantity(
        &mut self,
        item_id: &LineItemId,
        quantity: u32,
    ) -> Result<bool, CommerceError> {
        if quantity == 0 {
            return Ok(self.remove_item(item_id));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == item_id) {
            item.quantity = quantity;
            self.updated_at = current_timestamp();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove a line from the cart.
    pub fn remove_item(&mut self, item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != item_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Clear all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = current_timestamp();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of unique lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by id.
    pub fn get_item(&self, item_id: &LineItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == item_id)
    }

    /// Get a line by product id.
    pub fn get_item_by_product(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of line totals at sale prices.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let mut total = Money::zero(self.currency);
        for item in &self.items {
            let line = item.line_total().ok_or(CommerceError::Overflow)?;
            total = total.try_add(&line).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }

    /// Sum of line weights.
    pub fn total_weight(&self) -> Result<Weight, CommerceError> {
        let mut total = Weight::zero();
        for item in &self.items {
            let line = item.line_weight().ok_or(CommerceError::Overflow)?;
            total = total.try_add(&line).ok_or(CommerceError::Overflow)?;
        }
        Ok(total)
    }

    /// Bundle the cart's subtotal and weight into a shipping request.
    pub fn shipping_request(
        &self,
        method_id: ShippingMethodId,
        zone: Option<String>,
    ) -> Result<ShippingRequest, CommerceError> {
        let mut request = ShippingRequest::new(method_id, self.subtotal()?, self.total_weight()?);
        request.zone = zone;
        Ok(request)
    }

    /// Claim the cart for an authenticated customer.
    pub fn set_customer(&mut self, customer_id: CustomerId) {
        self.customer_id = Some(customer_id);
        self.updated_at = current_timestamp();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
