use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, warn};

use crate::catalog::DeviceCatalog;
use crate::classify::Classifier;
use crate::config::Target;
use crate::snmp::oid::normalize;
use crate::snmp::{Session, SessionOptions, SnmpClient, VarBind, fetch};
use crate::telemetry;

pub mod exposition;
pub mod lookup;

pub use exposition::render;
pub use lookup::{LabelLookup, Lookup, OidLabels};

/// Ведущее число в строке значения: "23.5 C" -> 23.5
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d[\d,]*(?:\.\d*)?").expect("valid number pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Value,
    Status,
}

/// Один сэмпл `rittal_value` или `rittal_status`
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub kind: MetricKind,
    pub device: String,
    pub variable: String,
    pub device_type: String,
    pub item: Option<String>,
    pub value: f64,
}

type SampleKey = (String, String, String, Option<String>);

/// Число из строкового значения. Запятые внутри числа не поддерживаются,
/// такое значение отбрасывается.
pub fn parse_numeric(bytes: &[u8]) -> Option<f64> {
    let text = String::from_utf8_lossy(bytes);
    NUMBER.find(&text)?.as_str().parse().ok()
}

/// Scrape одного устройства в свежей сессии.
///
/// Ошибка открытия сессии даёт пустой результат. Дедлайн входящего HTTP
/// запроса сюда не передаётся: зависший агент держит scrape до таймаутов
/// отдельных запросов.
#[instrument(skip_all, fields(device = %target.host))]
pub async fn collect(
    target: &Target,
    catalog: &DeviceCatalog,
    community: &str,
    options: &SessionOptions,
    classifier: &Classifier,
) -> Vec<MetricSample> {
    match SnmpClient::connect(&target.host, community.as_bytes(), options.clone()).await {
        Ok(mut client) => collect_with(&mut client, target, catalog, classifier).await,
        Err(e) => {
            telemetry::SESSION_FAILURES.inc();
            warn!(error = %e, "Не удалось открыть сессию для scrape");
            Vec::new()
        }
    }
}

pub async fn collect_with<S: Session>(
    session: &mut S,
    target: &Target,
    catalog: &DeviceCatalog,
    classifier: &Classifier,
) -> Vec<MetricSample> {
    let lookup = LabelLookup::build(catalog, classifier);
    debug!(
        values = lookup.values.len(),
        statuses = lookup.statuses.len(),
        "Scraping ..."
    );

    let mut emitter = Emitter::new(&target.device_type);
    if lookup.values.is_empty() && lookup.statuses.is_empty() {
        return emitter.samples;
    }

    let Some(values) = fetch_or_abort(session, &lookup.values).await else {
        return emitter.samples;
    };
    for v in values {
        let Some(labels) = lookup.values.get(normalize(&v.oid)) else {
            continue;
        };
        match v.value.as_bytes().and_then(parse_numeric) {
            Some(value) => emitter.push(MetricKind::Value, labels, value),
            None => telemetry::UNPARSABLE_SAMPLES.inc(),
        }
    }

    let Some(statuses) = fetch_or_abort(session, &lookup.statuses).await else {
        return emitter.samples;
    };
    for v in statuses {
        let Some(labels) = lookup.statuses.get(normalize(&v.oid)) else {
            continue;
        };
        match v.value.as_i64() {
            Some(code) => emitter.push(MetricKind::Status, labels, code as f64),
            None => telemetry::UNPARSABLE_SAMPLES.inc(),
        }
    }

    emitter.samples
}

async fn fetch_or_abort<S: Session>(session: &mut S, oids: &OidLabels) -> Option<Vec<VarBind>> {
    match fetch(session, oids.oids()).await {
        Ok(data) => Some(data),
        Err(e) => {
            telemetry::SESSION_FAILURES.inc();
            warn!(error = %e, "Scrape прерван");
            None
        }
    }
}

/// Собирает сэмплы, пропуская повторы по (device, variable, type, item)
struct Emitter<'a> {
    device_type: &'a str,
    seen: HashSet<(MetricKind, SampleKey)>,
    samples: Vec<MetricSample>,
}

impl<'a> Emitter<'a> {
    fn new(device_type: &'a str) -> Self {
        Self {
            device_type,
            seen: HashSet::new(),
            samples: Vec::new(),
        }
    }

    fn push(&mut self, kind: MetricKind, labels: &Lookup, value: f64) {
        let key = (
            labels.device.clone(),
            labels.variable.clone(),
            self.device_type.to_string(),
            labels.item.clone(),
        );
        if !self.seen.insert((kind, key)) {
            telemetry::DUPLICATE_SAMPLES.inc();
            return;
        }

        self.samples.push(MetricSample {
            kind,
            device: labels.device.clone(),
            variable: labels.variable.clone(),
            device_type: self.device_type.to_string(),
            item: labels.item.clone(),
            value,
        });
    }
}
