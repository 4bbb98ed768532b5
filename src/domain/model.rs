use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog view of a product. Carries no quantity. Fields beyond the known
/// ones are kept in `extra` and travel into the line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub id: ProductId,
    pub amount: u32,
}

/// One product in the cart. `amount` can never be zero; an item that would
/// drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub amount: NonZeroU32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    pub fn from_descriptor(product: ProductDescriptor, amount: NonZeroU32) -> Self {
        let mut extra = product.extra;
        extra.remove("amount");

        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
            extra,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount.get())
    }
}

/// Ordered line items, at most one per product id. Decoding goes through
/// `from_items`, so stored duplicates collapse to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart keeping the first occurrence of each id.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if cart.find(item.id).is_none() {
                cart.items.push(item);
            }
        }
        cart
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Requested quantity of a product, 0 when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.find(id).map(|item| item.amount.get()).unwrap_or(0)
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Copy of the cart with one item's amount replaced, or `None` if the id is absent.
    pub fn with_amount(&self, id: ProductId, amount: NonZeroU32) -> Option<Cart> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let mut next = self.clone();
        next.items[index].amount = amount;
        Some(next)
    }

    /// Copy of the cart with `item` appended. An existing item with the same id
    /// is replaced in place so ids stay unique.
    pub fn with_item(&self, item: LineItem) -> Cart {
        let mut next = self.clone();
        match next.items.iter().position(|existing| existing.id == item.id) {
            Some(index) => next.items[index] = item,
            None => next.items.push(item),
        }
        next
    }

    /// Copy of the cart without the given id, or `None` if the id is absent.
    pub fn without(&self, id: ProductId) -> Option<Cart> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let mut next = self.clone();
        next.items.remove(index);
        Some(next)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Argument of `CartEngine::update_product_amount`. The amount may be zero or
/// negative, which makes the update a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}
