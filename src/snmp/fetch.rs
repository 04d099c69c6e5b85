use anyhow::Result;
use tracing::debug;

use super::session::{ErrorStatus, Session, VarBind, Version};
use crate::telemetry;

/// Сколько OID уходит в один GET.
///
/// max_repetitions может быть 0, размер пачки нет. SNMPv1 сообщает только
/// одну ошибку на запрос, поэтому там пачка всегда из одного OID.
pub fn batch_size(version: Version, max_repetitions: u32) -> usize {
    if max_repetitions == 0 || version == Version::V1 {
        1
    } else {
        max_repetitions as usize
    }
}

/// Читает значения произвольного списка OID пачками.
///
/// Пачка с error-status в ответе отбрасывается целиком, varbind с
/// noSuchObject / noSuchInstance отбрасываются по одному. Ошибка
/// транспорта прерывает чтение и возвращается вызывающему. Порядок
/// результата совпадает с порядком запроса.
pub async fn fetch<S: Session>(session: &mut S, oids: &[String]) -> Result<Vec<VarBind>> {
    let version = session.version();
    let size = batch_size(version, session.max_repetitions());
    let mut variables = Vec::with_capacity(oids.len());

    for batch in oids.chunks(size) {
        let response = session.get(batch).await?;

        match response.error_status {
            ErrorStatus::NoError => {}
            // SNMPv1 не говорит, какой именно OID из пачки не найден
            ErrorStatus::NoSuchName if version == Version::V1 => {
                telemetry::DROPPED_BATCHES.inc();
                debug!(first_oid = %batch[0], "noSuchName, пачка пропущена");
                continue;
            }
            status => {
                telemetry::DROPPED_BATCHES.inc();
                debug!(?status, first_oid = %batch[0], size = batch.len(), "Ошибка в ответе, пачка пропущена");
                continue;
            }
        }

        for varbind in response.varbinds.into_iter().take(batch.len()) {
            if varbind.value.is_absent() {
                telemetry::DROPPED_VARBINDS.inc();
                continue;
            }
            variables.push(varbind);
        }
    }

    Ok(variables)
}
