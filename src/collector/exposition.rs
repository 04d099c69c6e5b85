use std::collections::HashMap;

use anyhow::Result;
use prometheus::core::{Collector, Desc};
use prometheus::proto::{Gauge, LabelPair, Metric, MetricFamily, MetricType};
use prometheus::{Encoder, Registry, TextEncoder};

use super::{MetricKind, MetricSample};

pub const VALUE_METRIC: &str = "rittal_value";
pub const STATUS_METRIC: &str = "rittal_status";

const VALUE_HELP: &str = "Numeric value of a Rittal device variable";

pub const STATUS_HELP: &str = "Value Mapping: 1 -> not available 2 -> configuration changed \
3 -> error 4 -> OK 5 -> alarm 6 -> warning value reached high warning threshold \
7 -> alarm value reached low threshold 8 -> alarm value reached high threshold \
9 -> warning value reached low warning threshold 10 -> output OFF 11 -> output ON \
12 -> door open 13 -> door closed 14 -> door locked 15 -> door unlocked remote input \
16 -> door unlocked reader or keypad 17 -> door unlocked SNMP set 18 -> door unlocked WEB \
19 -> door unlocked timer 20 -> no access 21 -> orientation PSM unit circuit 1 \
22 -> orientation PSM unit circuit 2 23 -> battery low, wireless sensor \
24 -> sensor cable broken 25 -> sensor cable short 26 -> sensor calibration in progress \
27 -> sensor inactive 28 -> sensor active 29 -> no Power (PSM)";

/// Готовые сэмплы одного scrape в виде prometheus Collector.
///
/// У сэмплов разный набор labels (`item` есть не всегда), поэтому
/// семейства собираются вручную, а не через GaugeVec.
pub struct ScrapeSnapshot {
    descs: Vec<Desc>,
    samples: Vec<MetricSample>,
}

impl ScrapeSnapshot {
    pub fn new(samples: Vec<MetricSample>) -> prometheus::Result<Self> {
        let descs = vec![
            Desc::new(VALUE_METRIC.into(), VALUE_HELP.into(), vec![], HashMap::new())?,
            Desc::new(STATUS_METRIC.into(), STATUS_HELP.into(), vec![], HashMap::new())?,
        ];
        Ok(Self { descs, samples })
    }

    fn family(&self, kind: MetricKind, name: &str, help: &str) -> Option<MetricFamily> {
        let metrics: Vec<Metric> = self
            .samples
            .iter()
            .filter(|s| s.kind == kind)
            .map(to_metric)
            .collect();
        if metrics.is_empty() {
            return None;
        }

        let mut family = MetricFamily::default();
        family.set_name(name.to_string());
        family.set_help(help.to_string());
        family.set_field_type(MetricType::GAUGE);
        family.set_metric(metrics.into());
        Some(family)
    }
}

impl Collector for ScrapeSnapshot {
    fn desc(&self) -> Vec<&Desc> {
        self.descs.iter().collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        [
            self.family(MetricKind::Value, VALUE_METRIC, VALUE_HELP),
            self.family(MetricKind::Status, STATUS_METRIC, STATUS_HELP),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn label(name: &str, value: &str) -> LabelPair {
    let mut pair = LabelPair::default();
    pair.set_name(name.to_string());
    pair.set_value(value.to_string());
    pair
}

fn to_metric(sample: &MetricSample) -> Metric {
    let mut labels = vec![
        label("device", &sample.device),
        label("variable", &sample.variable),
        label("type", &sample.device_type),
    ];
    if let Some(item) = &sample.item {
        labels.push(label("item", item));
    }

    let mut gauge = Gauge::default();
    gauge.set_value(sample.value);

    let mut metric = Metric::default();
    metric.set_label(labels.into());
    metric.set_gauge(gauge);
    metric
}

/// Текстовая экспозиция сэмплов через отдельный реестр на каждый scrape
pub fn render(samples: Vec<MetricSample>) -> Result<String> {
    let registry = Registry::new();
    registry.register(Box::new(ScrapeSnapshot::new(samples)?))?;

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
