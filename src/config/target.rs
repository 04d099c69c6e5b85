use serde::Deserialize;

/// Опрашиваемое устройство из конфигурации
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub alias: String,
    pub host: String,
    /// Передаётся как есть в label `type`
    #[serde(rename = "type", default)]
    pub device_type: String,
}

impl Target {
    /// Совпадает ли параметр `target` запроса с адресом или алиасом
    pub fn matches(&self, name: &str) -> bool {
        self.host == name || (!self.alias.is_empty() && self.alias == name)
    }
}
