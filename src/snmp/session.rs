use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

/// Версия протокола, с которой открывается сессия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Version {
    #[serde(rename = "1")]
    V1,
    #[serde(rename = "2c")]
    V2c,
}

/// Параметры сессии: порт, таймаут одного запроса и размер пачки OID
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub port: u16,
    pub version: Version,
    pub timeout: Duration,
    pub max_repetitions: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            port: 161,
            version: Version::V2c,
            timeout: Duration::from_secs(30),
            max_repetitions: 50,
        }
    }
}

impl SessionOptions {
    /// Адрес агента: хост без порта дополняется портом из настроек
    pub fn address(&self, host: &str) -> String {
        if host.parse::<std::net::SocketAddr>().is_ok() {
            host.to_string()
        } else {
            format!("{}:{}", host, self.port)
        }
    }
}

/// error-status из ответа агента
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    NoError,
    NoSuchName,
    Other(u32),
}

impl From<u32> for ErrorStatus {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorStatus::NoError,
            2 => ErrorStatus::NoSuchName,
            other => ErrorStatus::Other(other),
        }
    }
}

/// Значение varbind, скопированное из буфера сессии
#[derive(Debug, Clone, PartialEq)]
pub enum SnmpValue {
    Integer(i64),
    OctetString(Vec<u8>),
    Unsigned(u64),
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
    Other,
}

impl SnmpValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SnmpValue::OctetString(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SnmpValue::Integer(n) => Some(*n),
            SnmpValue::Unsigned(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// noSuchObject / noSuchInstance: объекта на агенте нет
    pub fn is_absent(&self) -> bool {
        matches!(self, SnmpValue::NoSuchObject | SnmpValue::NoSuchInstance)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    pub oid: String,
    pub value: SnmpValue,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub error_status: ErrorStatus,
    pub varbinds: Vec<VarBind>,
}

/// Открытая сессия к одному агенту.
///
/// `get` отправляет один GET на весь переданный список OID. Err означает
/// транспортную ошибку (таймаут, сокет), ошибки протокола приходят в
/// `Response::error_status`.
#[allow(async_fn_in_trait)]
pub trait Session {
    fn version(&self) -> Version;

    fn max_repetitions(&self) -> u32;

    async fn get(&mut self, oids: &[String]) -> Result<Response>;
}
