use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{error, info, warn};

mod catalog;
mod classify;
mod collector;
mod config;
mod handlers;
mod routes;
mod snmp;
mod state;
mod telemetry;

use catalog::DeviceCatalog;
use classify::{Classifier, builtin_rules};
use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(config::locate()?)?;
    telemetry::init_tracing(config.log.json);

    let classifier = Classifier::new(builtin_rules().into_iter().chain(config.naming_rules.clone()))?;

    let catalogs = load_catalogs(&config).await;
    info!(
        targets = config.targets.len(),
        ready = catalogs.len(),
        "Готов к обработке запросов"
    );

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("Не удалось занять адрес {}", config.listen))?;
    info!(listen = %config.listen, "HTTP сервер запущен");

    let state = Arc::new(AppState {
        config,
        catalogs,
        classifier,
    });

    axum::serve(listener, routes::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP сервер завершился с ошибкой")?;

    info!("Сервер остановлен");
    Ok(())
}

/// Собирает каталоги всех устройств параллельно, по задаче на устройство.
/// Устройство с ошибкой сборки остаётся без каталога до перезапуска.
async fn load_catalogs(config: &AppConfig) -> HashMap<String, DeviceCatalog> {
    let options = config.snmp.session_options();
    let mut workers = JoinSet::new();

    for target in config.targets.clone() {
        let community = config.community.clone();
        let options = options.clone();
        workers.spawn(async move {
            info!(device = %target.host, "Загрузка каталога устройства");
            let start = Instant::now();
            let result = catalog::build(&target, &community, &options).await;
            (target, result, start.elapsed())
        });
    }

    let mut catalogs = HashMap::new();
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((target, Ok(catalog), elapsed)) => {
                telemetry::CATALOG_BUILDS.with_label_values(&["ok"]).inc();
                info!(
                    device = %target.host,
                    objects = catalog.object_count(),
                    duration_seconds = elapsed.as_secs_f64(),
                    "Каталог загружен"
                );
                if catalog.is_empty() {
                    warn!(device = %target.host, "Устройство не сообщило ни одной переменной");
                }
                catalogs.insert(target.host, catalog);
            }
            Ok((target, Err(e), _)) => {
                telemetry::CATALOG_BUILDS.with_label_values(&["error"]).inc();
                error!(device = %target.host, error = %format!("{:#}", e), "Ошибка загрузки каталога");
            }
            Err(e) => {
                telemetry::CATALOG_BUILDS.with_label_values(&["error"]).inc();
                error!(error = %e, "Задача загрузки каталога упала");
            }
        }
    }

    catalogs
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Не удалось подписаться на Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Не удалось подписаться на SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Завершение работы сервера...");
}
