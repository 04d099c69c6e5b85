use std::collections::HashMap;

use crate::catalog::DeviceCatalog;
use crate::classify::Classifier;

/// Labels, к которым относится сэмпл по OID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub device: String,
    pub variable: String,
    pub item: Option<String>,
}

/// OID -> labels, в порядке обхода каталога
#[derive(Debug, Default)]
pub struct OidLabels {
    order: Vec<String>,
    labels: HashMap<String, Lookup>,
}

impl OidLabels {
    fn insert(&mut self, oid: &str, lookup: Lookup) {
        if self.labels.insert(oid.to_string(), lookup).is_none() {
            self.order.push(oid.to_string());
        }
    }

    pub fn oids(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, oid: &str) -> Option<&Lookup> {
        self.labels.get(oid)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Карты value/status OID, собираются заново на каждый scrape
#[derive(Debug, Default)]
pub struct LabelLookup {
    pub values: OidLabels,
    pub statuses: OidLabels,
}

impl LabelLookup {
    pub fn build(catalog: &DeviceCatalog, classifier: &Classifier) -> Self {
        let mut lookup = Self::default();

        for (device, _, object) in catalog.objects() {
            // Пустое описание: слот переменной не заполнен
            if object.description.is_empty() {
                continue;
            }
            let class = classifier.classify(&object.raw_title);

            for named in &object.values {
                lookup.values.insert(
                    &named.oid,
                    Lookup {
                        device: device.to_string(),
                        variable: class.variable_label(&object.description, &named.name, " Value"),
                        item: class.item.clone(),
                    },
                );
            }
            for named in &object.statuses {
                lookup.statuses.insert(
                    &named.oid,
                    Lookup {
                        device: device.to_string(),
                        variable: class.variable_label(&object.description, &named.name, " Status"),
                        item: class.item.clone(),
                    },
                );
            }
        }

        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{IndexedName, Role};

    fn cell(device: &str, index: u32, variable: u32, name: &str) -> IndexedName {
        IndexedName {
            name: name.to_string(),
            device: index,
            variable,
            device_name: device.to_string(),
        }
    }

    #[test]
    fn labels_follow_classification_and_fallback() {
        let mut catalog = DeviceCatalog::default();
        catalog.insert(&cell("PDU", 1, 1, "Sockets.Socket 2.Power.DescName"), Role::Description, Some("Power"));
        catalog.insert(&cell("PDU", 1, 2, "Sockets.Socket 2.Power.Value"), Role::Value, None);
        catalog.insert(&cell("LCP", 2, 1, "Water.In.DescName"), Role::Description, Some("Water In"));
        catalog.insert(&cell("LCP", 2, 2, "Water.In.Value"), Role::Value, None);
        catalog.insert(&cell("LCP", 2, 3, "Water.In.Status"), Role::Status, None);

        let lookup = LabelLookup::build(&catalog, &Classifier::builtin().unwrap());

        assert_eq!(lookup.values.len(), 2);
        assert_eq!(
            lookup.values.get("1.3.6.1.4.1.2606.7.4.2.2.1.10.1.2"),
            Some(&Lookup {
                device: "PDU".into(),
                variable: "Power".into(),
                item: Some("Socket 2".into()),
            })
        );
        assert_eq!(
            lookup.values.get("1.3.6.1.4.1.2606.7.4.2.2.1.10.2.2"),
            Some(&Lookup {
                device: "LCP".into(),
                variable: "Water In".into(),
                item: None,
            })
        );
        assert_eq!(
            lookup.statuses.get("1.3.6.1.4.1.2606.7.4.2.2.1.11.2.3").map(|l| l.variable.as_str()),
            Some("Water In")
        );
    }

    #[test]
    fn objects_without_description_are_skipped() {
        let mut catalog = DeviceCatalog::default();
        catalog.insert(&cell("LCP", 1, 2, "Water.In.Value"), Role::Value, None);

        let lookup = LabelLookup::build(&catalog, &Classifier::builtin().unwrap());
        assert_eq!(lookup.values.len(), 0);
        assert_eq!(lookup.statuses.len(), 0);
    }
}
