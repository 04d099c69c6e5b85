use std::collections::BTreeMap;

pub mod builder;
pub mod oids;

#[cfg(test)]
pub mod testing;

pub use builder::build;

/// Роль ячейки (устройство, переменная) по коду типа из таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Description,
    Value,
    Status,
    Ignored,
}

impl From<i64> for Role {
    fn from(code: i64) -> Self {
        match code {
            1 => Role::Description,
            2 => Role::Value,
            7 => Role::Status,
            _ => Role::Ignored,
        }
    }
}

/// Ячейка таблицы имён
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedName {
    pub name: String,
    pub device: u32,
    pub variable: u32,
    pub device_name: String,
}

impl IndexedName {
    /// Имя без последнего сегмента: соседние ячейки попадают в одну группу
    pub fn group_key(&self) -> &str {
        self.split().0
    }

    /// Последний сегмент имени
    pub fn leaf(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        self.name.rsplit_once('.').unwrap_or(("", self.name.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedOid {
    pub name: String,
    pub oid: String,
}

/// Одна логическая переменная устройства
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryObject {
    pub description: String,
    pub raw_title: String,
    pub values: Vec<NamedOid>,
    pub statuses: Vec<NamedOid>,
}

/// устройство -> ключ группы -> переменная
///
/// Строится один раз при старте, дальше только читается.
#[derive(Debug, Clone, Default)]
pub struct DeviceCatalog {
    devices: BTreeMap<String, BTreeMap<String, QueryObject>>,
}

impl DeviceCatalog {
    /// Добавляет ячейку в её группу. Группа создаётся при любой роли.
    pub fn insert(&mut self, cell: &IndexedName, role: Role, description: Option<&str>) {
        let object = self
            .devices
            .entry(cell.device_name.clone())
            .or_default()
            .entry(cell.group_key().to_string())
            .or_default();

        match role {
            Role::Description => {
                object.description = description.unwrap_or_default().to_string();
                object.raw_title = cell.name.clone();
            }
            Role::Value => object.values.push(NamedOid {
                name: cell.leaf().to_string(),
                oid: oids::variable_value(cell.device, cell.variable),
            }),
            Role::Status => object.statuses.push(NamedOid {
                name: cell.leaf().to_string(),
                oid: oids::variable_status(cell.device, cell.variable),
            }),
            Role::Ignored => {}
        }
    }

    #[cfg(test)]
    pub fn device(&self, name: &str) -> Option<&BTreeMap<String, QueryObject>> {
        self.devices.get(name)
    }

    /// Все переменные: (устройство, ключ группы, переменная)
    pub fn objects(&self) -> impl Iterator<Item = (&str, &str, &QueryObject)> {
        self.devices.iter().flat_map(|(device, variables)| {
            variables
                .iter()
                .map(move |(key, object)| (device.as_str(), key.as_str(), object))
        })
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn object_count(&self) -> usize {
        self.devices.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str, variable: u32) -> IndexedName {
        IndexedName {
            name: name.to_string(),
            device: 1,
            variable,
            device_name: "PDU".to_string(),
        }
    }

    #[test]
    fn role_codes() {
        assert_eq!(Role::from(1), Role::Description);
        assert_eq!(Role::from(2), Role::Value);
        assert_eq!(Role::from(7), Role::Status);
        assert_eq!(Role::from(3), Role::Ignored);
        assert_eq!(Role::from(-1), Role::Ignored);
    }

    #[test]
    fn group_key_and_leaf() {
        let c = cell("Socket 1.Power.Value", 1);
        assert_eq!(c.group_key(), "Socket 1.Power");
        assert_eq!(c.leaf(), "Value");

        let flat = cell("Uptime", 1);
        assert_eq!(flat.group_key(), "");
        assert_eq!(flat.leaf(), "Uptime");
    }

    #[test]
    fn siblings_share_one_object() {
        let mut catalog = DeviceCatalog::default();
        catalog.insert(&cell("Socket 1.Power.DescName", 1), Role::Description, Some("Power"));
        catalog.insert(&cell("Socket 1.Power.Value", 2), Role::Value, None);
        catalog.insert(&cell("Socket 1.Power.Status", 3), Role::Status, None);
        catalog.insert(&cell("Socket 1.Power.Unit", 4), Role::Ignored, None);

        assert_eq!(catalog.object_count(), 1);
        let object = &catalog.device("PDU").unwrap()["Socket 1.Power"];
        assert_eq!(object.description, "Power");
        assert_eq!(object.raw_title, "Socket 1.Power.DescName");
        assert_eq!(
            object.values,
            vec![NamedOid {
                name: "Value".into(),
                oid: "1.3.6.1.4.1.2606.7.4.2.2.1.10.1.2".into(),
            }]
        );
        assert_eq!(
            object.statuses,
            vec![NamedOid {
                name: "Status".into(),
                oid: "1.3.6.1.4.1.2606.7.4.2.2.1.11.1.3".into(),
            }]
        );
    }

    #[test]
    fn ignored_role_still_creates_empty_object() {
        let mut catalog = DeviceCatalog::default();
        catalog.insert(&cell("Misc.Unit", 1), Role::Ignored, None);
        let object = &catalog.device("PDU").unwrap()["Misc"];
        assert_eq!(object, &QueryObject::default());
    }
}
