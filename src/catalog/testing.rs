//! Заготовки агента Rittal для тестов

use super::oids;
use crate::snmp::testing::FakeAgent;
use crate::snmp::{SnmpValue, Version};

/// Агент с заполненными счётчиками и именами устройств
pub fn rittal_agent(devices: &[&str], variables: u32) -> FakeAgent {
    let mut agent = FakeAgent::new(Version::V2c, 50);
    agent.insert(oids::DEVICE_COUNT, SnmpValue::Integer(devices.len() as i64));
    agent.insert(oids::VARIABLE_COUNT, SnmpValue::Integer(i64::from(variables)));
    for (i, name) in devices.iter().enumerate() {
        agent.insert_string(&oids::device_name(i as u32 + 1), name);
    }
    agent
}

/// Ячейка: имя, код роли и значение в столбце 10 (или 11 для статуса)
pub fn add_cell(
    agent: &mut FakeAgent,
    device: u32,
    variable: u32,
    name: &str,
    role: i64,
    value: SnmpValue,
) {
    agent.insert_string(&oids::variable_name(device, variable), name);
    agent.insert(&oids::variable_type(device, variable), SnmpValue::Integer(role));
    let column = if role == 7 {
        oids::variable_status(device, variable)
    } else {
        oids::variable_value(device, variable)
    };
    agent.insert(&column, value);
}
