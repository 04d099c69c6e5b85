use anyhow::{Context, Result, anyhow};
use snmp2::{AsyncSession, Oid, Value};
use tokio::time::timeout;

use super::oid::parse_oid;
use super::session::{ErrorStatus, Response, Session, SessionOptions, SnmpValue, VarBind, Version};

/// SNMP клиент поверх snmp2 (v1 / v2c, community)
pub struct SnmpClient {
    pub(crate) session: AsyncSession,
    options: SessionOptions,
}

impl SnmpClient {
    pub async fn connect(host: &str, community: &[u8], options: SessionOptions) -> Result<Self> {
        let target = options.address(host);
        let session = match options.version {
            Version::V1 => AsyncSession::new_v1(target.as_str(), community, 0).await,
            Version::V2c => AsyncSession::new_v2c(target.as_str(), community, 0).await,
        }
        .with_context(|| format!("Не удалось создать SNMP сессию к {}", target))?;

        Ok(Self { session, options })
    }
}

impl Session for SnmpClient {
    fn version(&self) -> Version {
        self.options.version
    }

    fn max_repetitions(&self) -> u32 {
        self.options.max_repetitions
    }

    /// Один GET со всеми OID пачки
    async fn get(&mut self, oids: &[String]) -> Result<Response> {
        let parsed = oids
            .iter()
            .map(|oid| parse_oid(oid))
            .collect::<Result<Vec<Oid<'static>>>>()?;
        let refs: Vec<&Oid<'_>> = parsed.iter().collect();

        let limit = self.options.timeout;
        let pdu = timeout(limit, self.session.get_many(&refs))
            .await
            .map_err(|_| anyhow!("Таймаут SNMP GET на {} OID ({:?})", oids.len(), limit))?
            .context("SNMP GET запрос не удался")?;

        Ok(Response {
            error_status: ErrorStatus::from(pdu.error_status),
            varbinds: pdu
                .varbinds
                .map(|(name, value)| VarBind {
                    oid: name.to_string(),
                    value: SnmpValue::from(&value),
                })
                .collect(),
        })
    }
}

impl From<&Value<'_>> for SnmpValue {
    fn from(value: &Value<'_>) -> Self {
        match value {
            Value::Integer(n) => SnmpValue::Integer(*n),
            Value::OctetString(bytes) => SnmpValue::OctetString(bytes.to_vec()),
            Value::Counter32(n) | Value::Unsigned32(n) | Value::Timeticks(n) => {
                SnmpValue::Unsigned(u64::from(*n))
            }
            Value::Counter64(n) => SnmpValue::Unsigned(*n),
            Value::NoSuchObject => SnmpValue::NoSuchObject,
            Value::NoSuchInstance => SnmpValue::NoSuchInstance,
            Value::EndOfMibView => SnmpValue::EndOfMibView,
            _ => SnmpValue::Other,
        }
    }
}
