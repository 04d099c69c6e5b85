pub mod counters;
pub mod logging;

pub use counters::{
    CATALOG_BUILDS, DROPPED_BATCHES, DROPPED_VARBINDS, DUPLICATE_SAMPLES, SESSION_FAILURES,
    UNPARSABLE_SAMPLES, render,
};
pub use logging::init_tracing;
