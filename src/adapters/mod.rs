// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod notify;
pub mod storage;

pub use http::HttpShopApi;
pub use notify::ConsoleNotifier;
pub use storage::LocalStorage;
