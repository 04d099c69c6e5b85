//! OID поддерева Rittal CMC III (enterprise 2606)

const DEVICE_TABLE: &str = "1.3.6.1.4.1.2606.7.4.1.2.1";
const VARIABLE_TABLE: &str = "1.3.6.1.4.1.2606.7.4.2.2.1";

/// Количество подключённых устройств
pub const DEVICE_COUNT: &str = "1.3.6.1.4.1.2606.7.4.1.1.2.0";
/// Количество переменных на устройство
pub const VARIABLE_COUNT: &str = "1.3.6.1.4.1.2606.7.4.2.1.1.0";

pub fn device_name(device: u32) -> String {
    format!("{}.3.{}", DEVICE_TABLE, device)
}

pub fn variable_name(device: u32, variable: u32) -> String {
    format!("{}.3.{}.{}", VARIABLE_TABLE, device, variable)
}

pub fn variable_type(device: u32, variable: u32) -> String {
    format!("{}.4.{}.{}", VARIABLE_TABLE, device, variable)
}

/// Описание или числовое значение (столбец 10)
pub fn variable_value(device: u32, variable: u32) -> String {
    format!("{}.10.{}.{}", VARIABLE_TABLE, device, variable)
}

/// Код статуса (столбец 11)
pub fn variable_status(device: u32, variable: u32) -> String {
    format!("{}.11.{}.{}", VARIABLE_TABLE, device, variable)
}
