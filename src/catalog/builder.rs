use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use super::{DeviceCatalog, IndexedName, Role, oids};
use crate::config::Target;
use crate::snmp::oid::trailing_indices;
use crate::snmp::{Session, SessionOptions, SnmpClient, fetch};

/// (индекс устройства, индекс переменной)
type CellIndex = (u32, u32);

/// Строит каталог устройства: открывает свою сессию и опрашивает таблицы
#[instrument(skip_all, fields(device = %target.host))]
pub async fn build(
    target: &Target,
    community: &str,
    options: &SessionOptions,
) -> Result<DeviceCatalog> {
    let mut client = SnmpClient::connect(&target.host, community.as_bytes(), options.clone()).await?;
    build_with(&mut client).await
}

pub async fn build_with<S: Session>(session: &mut S) -> Result<DeviceCatalog> {
    let devices = read_count(session, oids::DEVICE_COUNT)
        .await
        .context("Не удалось получить количество устройств")?;
    let variables = read_count(session, oids::VARIABLE_COUNT)
        .await
        .context("Не удалось получить количество переменных")?;
    debug!(devices, variables, "Размер таблиц");

    let mut catalog = DeviceCatalog::default();
    if devices == 0 || variables == 0 {
        return Ok(catalog);
    }

    let device_names = load_device_names(session, devices).await?;
    let cells = load_cells(session, devices, variables, &device_names).await?;
    let roles = load_roles(session, &cells).await?;
    let descriptions = load_descriptions(session, &cells, &roles).await?;

    for cell in &cells {
        let index = (cell.device, cell.variable);
        let role = roles.get(&index).copied().unwrap_or(Role::Ignored);
        let description = descriptions.get(&index).map(String::as_str);
        catalog.insert(cell, role, description);
    }

    debug!(
        devices = catalog.device_count(),
        objects = catalog.object_count(),
        "Каталог собран"
    );
    Ok(catalog)
}

async fn read_count<S: Session>(session: &mut S, oid: &str) -> Result<u32> {
    let data = fetch(session, &[oid.to_string()]).await?;
    let value = data
        .first()
        .and_then(|v| v.value.as_i64())
        .with_context(|| format!("Агент не вернул значение {}", oid))?;

    u32::try_from(value).with_context(|| format!("Некорректное значение {}: {}", oid, value))
}

async fn load_device_names<S: Session>(
    session: &mut S,
    devices: u32,
) -> Result<HashMap<u32, String>> {
    let oids: Vec<String> = (1..=devices).map(oids::device_name).collect();

    let names = fetch(session, &oids)
        .await?
        .into_iter()
        .filter_map(|v| {
            let [index] = trailing_indices::<1>(&v.oid)?;
            let name = String::from_utf8_lossy(v.value.as_bytes()?).into_owned();
            Some((index, name))
        })
        .collect();

    Ok(names)
}

async fn load_cells<S: Session>(
    session: &mut S,
    devices: u32,
    variables: u32,
    device_names: &HashMap<u32, String>,
) -> Result<Vec<IndexedName>> {
    let oids: Vec<String> = (1..=devices)
        .flat_map(|d| (1..=variables).map(move |v| oids::variable_name(d, v)))
        .collect();

    let mut cells = Vec::new();
    for v in fetch(session, &oids).await? {
        let (Some([device, variable]), Some(name)) =
            (trailing_indices::<2>(&v.oid), v.value.as_bytes())
        else {
            continue;
        };
        let Some(device_name) = device_names.get(&device) else {
            debug!(device, variable, "Нет имени устройства, ячейка пропущена");
            continue;
        };

        cells.push(IndexedName {
            name: String::from_utf8_lossy(name).into_owned(),
            device,
            variable,
            device_name: device_name.clone(),
        });
    }

    Ok(cells)
}

async fn load_roles<S: Session>(
    session: &mut S,
    cells: &[IndexedName],
) -> Result<HashMap<CellIndex, Role>> {
    let oids: Vec<String> = cells
        .iter()
        .map(|c| oids::variable_type(c.device, c.variable))
        .collect();

    let roles = fetch(session, &oids)
        .await?
        .into_iter()
        .filter_map(|v| {
            let [device, variable] = trailing_indices::<2>(&v.oid)?;
            Some(((device, variable), Role::from(v.value.as_i64()?)))
        })
        .collect();

    Ok(roles)
}

async fn load_descriptions<S: Session>(
    session: &mut S,
    cells: &[IndexedName],
    roles: &HashMap<CellIndex, Role>,
) -> Result<HashMap<CellIndex, String>> {
    let oids: Vec<String> = cells
        .iter()
        .filter(|c| roles.get(&(c.device, c.variable)) == Some(&Role::Description))
        .map(|c| oids::variable_value(c.device, c.variable))
        .collect();

    let descriptions = fetch(session, &oids)
        .await?
        .into_iter()
        .filter_map(|v| {
            let [device, variable] = trailing_indices::<2>(&v.oid)?;
            let text = String::from_utf8_lossy(v.value.as_bytes()?).into_owned();
            Some(((device, variable), text))
        })
        .collect();

    Ok(descriptions)
}
