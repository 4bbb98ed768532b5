use crate::core::persistence::PersistenceBridge;
use crate::core::{
    Cart, CartFailure, DurableStore, LineItem, NotificationSink, Outcome, ProductCatalog,
    ProductId, StockOracle, StockSnapshot, UpdateProductAmount,
};
use crate::utils::error::{CartError, Result};
use std::num::NonZeroU32;
use tokio::sync::{watch, Mutex};

/// Owns the cart and is its only writer.
///
/// Mutations are serialized through `writer`: the lock is held from the first
/// read of the cart until the new value is committed, fetches included, so a
/// second mutation always starts from the first one's result. Readers go through
/// the watch channel and only ever see committed values.
pub struct CartEngine<O, P, S, N>
where
    S: DurableStore,
{
    oracle: O,
    catalog: P,
    notifier: N,
    writer: Mutex<PersistenceBridge<S>>,
    state: watch::Sender<Cart>,
}

impl<O, P, S, N> CartEngine<O, P, S, N>
where
    O: StockOracle,
    P: ProductCatalog,
    S: DurableStore,
    N: NotificationSink,
{
    /// Seeds the cart from `store`. Hydration never writes back.
    pub async fn new(oracle: O, catalog: P, store: S, notifier: N) -> Self {
        let (bridge, cart) = PersistenceBridge::hydrate(store).await;
        let (state, _) = watch::channel(cart);

        Self {
            oracle,
            catalog,
            notifier,
            writer: Mutex::new(bridge),
            state,
        }
    }

    /// Snapshot of the last committed cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver notified whenever a commit changes the cart's content.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    pub async fn add_product(&self, product_id: ProductId) -> Outcome {
        let mut bridge = self.writer.lock().await;

        match self.try_add(product_id).await {
            Ok(next) => self.commit(&mut bridge, next).await,
            Err(e) => self.reject(CartFailure::from_add_error(&e), product_id, &e),
        }
    }

    async fn try_add(&self, product_id: ProductId) -> Result<Cart> {
        let current = self.cart();
        let desired = i64::from(current.amount_of(product_id)) + 1;

        let stock = self.oracle.stock(product_id).await?;
        let amount = checked_amount(product_id, desired, &stock)?;

        if let Some(next) = current.with_amount(product_id, amount) {
            return Ok(next);
        }

        let product = self.catalog.product(product_id).await?;
        if product.id != product_id {
            tracing::debug!(
                "Catalog answered {} for product {}, keeping requested id",
                product.id,
                product_id
            );
        }
        let mut item = LineItem::from_descriptor(product, amount);
        item.id = product_id;

        Ok(current.with_item(item))
    }

    pub async fn remove_product(&self, product_id: ProductId) -> Outcome {
        let mut bridge = self.writer.lock().await;

        match self.cart().without(product_id) {
            Some(next) => self.commit(&mut bridge, next).await,
            None => {
                let e = CartError::ProductNotFound { product_id };
                self.reject(CartFailure::RemoveFailed, product_id, &e)
            }
        }
    }

    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> Outcome {
        let UpdateProductAmount { product_id, amount } = request;
        if amount <= 0 {
            tracing::debug!("Ignoring update of product {} to {}", product_id, amount);
            return Outcome::Unchanged;
        }

        let mut bridge = self.writer.lock().await;

        match self.try_update(product_id, amount).await {
            Ok(next) => self.commit(&mut bridge, next).await,
            Err(e) => self.reject(CartFailure::from_update_error(&e), product_id, &e),
        }
    }

    async fn try_update(&self, product_id: ProductId, requested: i64) -> Result<Cart> {
        let stock = self.oracle.stock(product_id).await?;
        let amount = checked_amount(product_id, requested, &stock)?;

        self.cart()
            .with_amount(product_id, amount)
            .ok_or(CartError::ProductNotFound { product_id })
    }

    async fn commit(&self, bridge: &mut PersistenceBridge<S>, next: Cart) -> Outcome {
        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });

        bridge.persist(&next).await;

        if changed {
            tracing::info!("Committed cart: {} items, total {:.2}", next.len(), next.total());
            Outcome::Committed
        } else {
            Outcome::Unchanged
        }
    }

    fn reject(&self, failure: CartFailure, product_id: ProductId, err: &CartError) -> Outcome {
        tracing::warn!("{:?} for product {}: {}", failure, product_id, err);
        self.notifier.error(failure.message());
        Outcome::Rejected(failure)
    }
}

/// Validates `requested` against the stock snapshot and turns it into a line
/// item amount.
fn checked_amount(
    product_id: ProductId,
    requested: i64,
    stock: &StockSnapshot,
) -> Result<NonZeroU32> {
    tracing::debug!(
        "Stock for product {}: {} available, {} requested",
        product_id,
        stock.amount,
        requested
    );

    if requested > i64::from(stock.amount) {
        return Err(CartError::StockExceeded {
            product_id,
            requested,
            available: stock.amount,
        });
    }

    u32::try_from(requested)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(CartError::InvalidAmount {
            product_id,
            amount: requested,
        })
}
