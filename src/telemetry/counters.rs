//! Внутренние счётчики экспортера.
//!
//! Пачки и сэмплы, которые протокол или парсер молча отбрасывают, здесь
//! хотя бы подсчитываются. На `rittal_value` / `rittal_status` это не влияет.

use anyhow::Result;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;

/// Реестр метрик самого экспортера (`/metrics`)
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

fn counter(name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::new(name, help).expect("valid counter definition");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("counter registered once");
    counter
}

/// GET-пачки, отброшенные из-за error-status в ответе
pub static DROPPED_BATCHES: LazyLock<IntCounter> = LazyLock::new(|| {
    counter(
        "rittal_exporter_dropped_batches_total",
        "SNMP GET batches dropped because the agent reported an error status",
    )
});

/// varbind с noSuchObject / noSuchInstance
pub static DROPPED_VARBINDS: LazyLock<IntCounter> = LazyLock::new(|| {
    counter(
        "rittal_exporter_dropped_varbinds_total",
        "Varbinds dropped as noSuchObject or noSuchInstance",
    )
});

pub static UNPARSABLE_SAMPLES: LazyLock<IntCounter> = LazyLock::new(|| {
    counter(
        "rittal_exporter_unparsable_samples_total",
        "Scraped values or status codes that could not be parsed",
    )
});

pub static DUPLICATE_SAMPLES: LazyLock<IntCounter> = LazyLock::new(|| {
    counter(
        "rittal_exporter_duplicate_samples_total",
        "Scraped samples dropped because their label set was already emitted",
    )
});

pub static SESSION_FAILURES: LazyLock<IntCounter> = LazyLock::new(|| {
    counter(
        "rittal_exporter_session_failures_total",
        "Scrapes that ended early on a session or transport failure",
    )
});

/// Сборки каталога по результату (`ok` / `error`)
pub static CATALOG_BUILDS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    let vec = IntCounterVec::new(
        Opts::new(
            "rittal_exporter_catalog_builds_total",
            "Catalog builds at startup by result",
        ),
        &["result"],
    )
    .expect("valid counter definition");
    REGISTRY
        .register(Box::new(vec.clone()))
        .expect("counter registered once");
    vec
});

/// Текстовая экспозиция внутренних счётчиков
pub fn render() -> Result<String> {
    // Регистрируем всё заранее, чтобы нулевые счётчики тоже попали в вывод
    LazyLock::force(&DROPPED_BATCHES);
    LazyLock::force(&DROPPED_VARBINDS);
    LazyLock::force(&UNPARSABLE_SAMPLES);
    LazyLock::force(&DUPLICATE_SAMPLES);
    LazyLock::force(&SESSION_FAILURES);
    LazyLock::force(&CATALOG_BUILDS);

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
