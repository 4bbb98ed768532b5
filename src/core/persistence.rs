use crate::core::{Cart, DurableStore};
use crate::utils::error::Result;

/// Storage key shared by every cart in the application.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Written,
    Skipped,
    Failed,
}

/// Writes the cart to the durable store whenever its content differs from the
/// last successfully written snapshot.
pub struct PersistenceBridge<S: DurableStore> {
    store: S,
    last_persisted: Cart,
}

impl<S: DurableStore> PersistenceBridge<S> {
    /// Reads the stored cart and seeds `last_persisted` with it, so hydration
    /// itself never produces a write. Unreadable or undecodable data yields an
    /// empty cart.
    pub async fn hydrate(store: S) -> (Self, Cart) {
        let cart = match Self::load(&store).await {
            Ok(Some(cart)) => {
                tracing::debug!("Hydrated cart with {} items", cart.len());
                cart
            }
            Ok(None) => {
                tracing::debug!("No stored cart under {}, starting empty", CART_STORAGE_KEY);
                Cart::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring stored cart: {}", e);
                Cart::new()
            }
        };

        let bridge = Self {
            store,
            last_persisted: cart.clone(),
        };
        (bridge, cart)
    }

    async fn load(store: &S) -> Result<Option<Cart>> {
        match store.read(CART_STORAGE_KEY).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn persist(&mut self, cart: &Cart) -> PersistOutcome {
        if *cart == self.last_persisted {
            tracing::debug!("Cart unchanged since last write, skipping");
            return PersistOutcome::Skipped;
        }

        match self.write(cart).await {
            Ok(()) => {
                self.last_persisted = cart.clone();
                tracing::debug!("Persisted cart with {} items", cart.len());
                PersistOutcome::Written
            }
            Err(e) => {
                tracing::warn!("Failed to persist cart: {}", e);
                PersistOutcome::Failed
            }
        }
    }

    async fn write(&self, cart: &Cart) -> Result<()> {
        let data = serde_json::to_vec(cart)?;
        self.store.write(CART_STORAGE_KEY, &data).await
    }

    pub fn last_persisted(&self) -> &Cart {
        &self.last_persisted
    }
}
