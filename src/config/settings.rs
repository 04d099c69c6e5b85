use serde::Deserialize;
use std::time::Duration;

use crate::snmp::{SessionOptions, Version};

/// Настройки SNMP сессий
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnmpSettings {
    pub port: u16,
    pub version: Version,
    /// Таймаут одного запроса (секунды)
    pub timeout_secs: u64,
    /// Максимум OID в одном GET
    pub max_repetitions: u32,
}

impl Default for SnmpSettings {
    fn default() -> Self {
        Self {
            port: 161,
            version: Version::V2c,
            timeout_secs: 30,
            max_repetitions: 50,
        }
    }
}

impl SnmpSettings {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            port: self.port,
            version: self.version,
            timeout: Duration::from_secs(self.timeout_secs),
            max_repetitions: self.max_repetitions,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// JSON вместо обычного текста
    pub json: bool,
}
