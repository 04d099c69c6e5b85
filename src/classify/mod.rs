//! Классификация иерархических имён переменных Rittal.
//!
//! Из сырого имени вида `Sockets.Socket 3.Power.Value` получаем label `item`
//! (розетка, вентилятор, сторона сервера) и, если правило это задаёт,
//! собственное имя переменной. Правила — это данные: регулярное выражение и
//! шаблоны подстановки (`$1`, `$0`, обычный текст). Срабатывает первое
//! совпавшее правило.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

/// Правило именования из таблицы
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamingRule {
    pub pattern: String,
    /// Шаблон для label `item`
    pub item: String,
    /// Шаблон имени переменной; без него имя строится из описания
    #[serde(default)]
    pub name: Option<String>,
}

/// Встроенные правила в порядке приоритета
const BUILTIN_RULES: &[(&str, &str, Option<&str>)] = &[
    (r"Sockets\.(Socket \d+)\.([^.]+)\..*", "$1", Some("$2")),
    (r"Air Temp.(Server (?:Out|In)).(\w+)", "$1", Some("Temperature $2")),
    (r"Fans.Current Speed.(Fan\d)", "$1", Some("Speed")),
    (r"(?:Fans|Control Valve)\.Remote", "$0", None),
];

pub fn builtin_rules() -> Vec<NamingRule> {
    BUILTIN_RULES
        .iter()
        .map(|(pattern, item, name)| NamingRule {
            pattern: pattern.to_string(),
            item: item.to_string(),
            name: name.map(str::to_string),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub item: Option<String>,
    pub name: Option<String>,
}

impl Classification {
    /// Имя переменной для value/status OID с последним сегментом `leaf`
    pub fn variable_label(&self, description: &str, leaf: &str, suffix: &str) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => fallback_label(description, leaf, suffix),
        }
    }
}

/// `<описание> <сегмент>` без хвостового ` Value` / ` Status`
pub fn fallback_label(description: &str, leaf: &str, suffix: &str) -> String {
    let label = format!("{} {}", description, leaf);
    match label.strip_suffix(suffix) {
        Some(stripped) => stripped.to_string(),
        None => label,
    }
}

#[derive(Debug)]
struct CompiledRule {
    regex: Regex,
    item: String,
    name: Option<String>,
}

#[derive(Debug)]
pub struct Classifier {
    rules: Vec<CompiledRule>,
}

impl Classifier {
    pub fn new(rules: impl IntoIterator<Item = NamingRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern)
                    .with_context(|| format!("Невалидное правило именования: {}", rule.pattern))?;
                Ok(CompiledRule {
                    regex,
                    item: rule.item,
                    name: rule.name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(builtin_rules())
    }

    pub fn classify(&self, raw_title: &str) -> Classification {
        for rule in &self.rules {
            let Some(captures) = rule.regex.captures(raw_title) else {
                continue;
            };

            let expand = |template: &str| {
                let mut out = String::new();
                captures.expand(template, &mut out);
                Some(out).filter(|s| !s.is_empty())
            };

            return Classification {
                item: expand(&rule.item),
                name: rule.name.as_deref().and_then(expand),
            };
        }

        Classification::default()
    }
}
