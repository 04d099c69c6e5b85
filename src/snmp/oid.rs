use anyhow::{Context, Result};
use snmp2::Oid;

pub fn parse_oid(s: &str) -> Result<Oid<'static>> {
    let parts: Result<Vec<u64>, _> = s
        .trim()
        .split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>())
        .collect();

    let parts = parts.context(format!("Невалидный OID: {}", s))?;
    Oid::from(&parts).map_err(|e| anyhow::anyhow!("Не удалось создать Oid: {:?}", e))
}

/// Приводит OID к виду без ведущей точки
pub fn normalize(oid: &str) -> &str {
    oid.trim().trim_start_matches('.')
}

/// Последние `N` числовых компонентов OID (индексы строки таблицы)
pub fn trailing_indices<const N: usize>(oid: &str) -> Option<[u32; N]> {
    let mut out = [0u32; N];
    let mut parts = normalize(oid).rsplit('.');
    for slot in out.iter_mut().rev() {
        *slot = parts.next()?.parse().ok()?;
    }
    Some(out)
}
