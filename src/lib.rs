pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CartCommand, CliConfig};

pub use crate::adapters::{ConsoleNotifier, HttpShopApi, LocalStorage};
pub use crate::config::TomlConfig;
pub use crate::core::engine::CartEngine;
pub use crate::core::persistence::{PersistenceBridge, CART_STORAGE_KEY};
pub use crate::core::{Cart, CartFailure, LineItem, Outcome, ProductId, UpdateProductAmount};
pub use crate::utils::error::{CartError, Result};
