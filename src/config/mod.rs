use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

pub mod settings;
pub mod target;

pub use settings::{LogSettings, SnmpSettings};
pub use target::Target;

use crate::classify::NamingRule;

const DEFAULT_LISTEN: &str = "0.0.0.0:9191";
const SEARCH_PATHS: [&str; 2] = ["/etc/rittal-exporter/config.yaml", "./config.yaml"];

/// Главная конфигурация приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Community для всех устройств
    pub community: String,
    #[serde(default = "default_listen")]
    pub listen: String,
    pub targets: Vec<Target>,
    #[serde(default)]
    pub snmp: SnmpSettings,
    /// Дополнительные правила именования, после встроенных
    #[serde(default)]
    pub naming_rules: Vec<NamingRule>,
    #[serde(default)]
    pub log: LogSettings,
}

fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

/// Путь к конфигу: RITTAL_EXPORTER_CONFIG или первый существующий из стандартных
pub fn locate() -> Result<PathBuf> {
    if let Ok(path) = env::var("RITTAL_EXPORTER_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    SEARCH_PATHS
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
        .with_context(|| format!("Конфигурация не найдена, искали: {}", SEARCH_PATHS.join(", ")))
}

impl AppConfig {
    /// Загружает конфигурацию из YAML файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Не удалось прочитать файл: {}", path.display()))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yml::from_str(content).context("Не удалось распарсить YAML")
    }

    /// RITTAL_COMMUNITY и RITTAL_LISTEN перекрывают значения из файла
    fn apply_env(&mut self) {
        if let Ok(community) = env::var("RITTAL_COMMUNITY") {
            self.community = community;
        }
        if let Ok(listen) = env::var("RITTAL_LISTEN") {
            self.listen = listen;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            anyhow::bail!("В конфигурации нет ни одного target");
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.host.trim().is_empty() {
                anyhow::bail!("У target '{}' пустой host", target.alias);
            }
            if !seen.insert(target.host.as_str()) {
                anyhow::bail!("Повторяющийся target: {}", target.host);
            }
            if !target.alias.is_empty() && target.alias != target.host && !seen.insert(target.alias.as_str()) {
                anyhow::bail!("Повторяющийся target: {}", target.alias);
            }
        }

        Ok(())
    }

    /// Ищет target по адресу или алиасу
    pub fn find_target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.matches(name))
    }
}
