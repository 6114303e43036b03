mod admin_store;
mod lifecycle;

pub use admin_store::AdminStore;
pub use lifecycle::{shutdown_signal, ResetGuard};
