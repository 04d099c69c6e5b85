pub mod health;
pub mod metrics;
pub mod scrape;

pub use health::health;
pub use metrics::self_metrics;
pub use scrape::scrape;
