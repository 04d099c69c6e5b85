pub mod client;
pub mod fetch;
pub mod oid;
pub mod session;

#[cfg(test)]
pub mod testing;

pub use client::SnmpClient;
pub use fetch::fetch;
pub use session::{Session, SessionOptions, SnmpValue, VarBind, Version};
