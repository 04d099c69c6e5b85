//! Агент в памяти для тестов сбора без сети.

use std::collections::{HashMap, HashSet};

use anyhow::{Result, bail};

use super::oid::normalize;
use super::session::{ErrorStatus, Response, Session, SnmpValue, VarBind, Version};

pub struct FakeAgent {
    version: Version,
    max_repetitions: u32,
    values: HashMap<String, SnmpValue>,
    failing: HashSet<String>,
    silent_after: Option<usize>,
    /// Все полученные GET в порядке поступления
    pub requests: Vec<Vec<String>>,
}

impl FakeAgent {
    pub fn new(version: Version, max_repetitions: u32) -> Self {
        Self {
            version,
            max_repetitions,
            values: HashMap::new(),
            failing: HashSet::new(),
            silent_after: None,
            requests: Vec::new(),
        }
    }

    pub fn insert(&mut self, oid: &str, value: SnmpValue) {
        self.values.insert(normalize(oid).to_string(), value);
    }

    pub fn insert_string(&mut self, oid: &str, text: &str) {
        self.insert(oid, SnmpValue::OctetString(text.as_bytes().to_vec()));
    }

    /// Любая пачка с этим OID получит genErr
    pub fn fail_batch_with(&mut self, oid: &str) {
        self.failing.insert(normalize(oid).to_string());
    }

    /// После `n` ответов агент перестаёт отвечать (ошибка транспорта)
    pub fn go_silent_after(&mut self, n: usize) {
        self.silent_after = Some(n);
    }
}

impl Session for FakeAgent {
    fn version(&self) -> Version {
        self.version
    }

    fn max_repetitions(&self) -> u32 {
        self.max_repetitions
    }

    async fn get(&mut self, oids: &[String]) -> Result<Response> {
        if self.silent_after.is_some_and(|n| self.requests.len() >= n) {
            bail!("timeout waiting for {}", oids.join(","));
        }
        self.requests.push(oids.to_vec());

        if oids.iter().any(|oid| self.failing.contains(normalize(oid))) {
            return Ok(Response {
                error_status: ErrorStatus::Other(5),
                varbinds: Vec::new(),
            });
        }

        if self.version == Version::V1
            && oids.iter().any(|oid| !self.values.contains_key(normalize(oid)))
        {
            return Ok(Response {
                error_status: ErrorStatus::NoSuchName,
                varbinds: Vec::new(),
            });
        }

        let varbinds = oids
            .iter()
            .map(|oid| VarBind {
                oid: normalize(oid).to_string(),
                value: self
                    .values
                    .get(normalize(oid))
                    .cloned()
                    .unwrap_or(SnmpValue::NoSuchObject),
            })
            .collect();

        Ok(Response {
            error_status: ErrorStatus::NoError,
            varbinds,
        })
    }
}
