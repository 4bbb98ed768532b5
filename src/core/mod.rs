pub mod engine;
pub mod failure;
pub mod persistence;

pub use crate::domain::model::{
    Cart, LineItem, ProductDescriptor, ProductId, StockSnapshot, UpdateProductAmount,
};
pub use crate::domain::ports::{
    ConfigProvider, DurableStore, NotificationSink, ProductCatalog, RequestPolicy, StockOracle,
};
pub use crate::utils::error::Result;
pub use failure::{CartFailure, Outcome};
