use std::collections::HashMap;

use crate::catalog::DeviceCatalog;
use crate::classify::Classifier;
use crate::config::AppConfig;

/// Общее состояние HTTP слоя. После старта только читается.
pub struct AppState {
    pub config: AppConfig,
    /// Каталоги по адресу устройства; устройства с неудачной сборкой здесь нет
    pub catalogs: HashMap<String, DeviceCatalog>,
    pub classifier: Classifier,
}
