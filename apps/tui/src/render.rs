use serde::Serialize;

use crate::domain::{CountryRecord, Role};

pub const PLACEHOLDER: &str = "N/A";

/// A country rendered for display, bound to the code it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub code: String,
    pub role: Role,
    pub name: String,
    pub flag_emoji: Option<String>,
    pub flag_image: Option<String>,
    pub region: String,
    pub population: String,
    pub languages: String,
    pub currencies: String,
}

impl Card {
    pub fn render(record: &CountryRecord, role: Role) -> Self {
        let name = if record.name.common.trim().is_empty() {
            PLACEHOLDER.to_string()
        } else {
            record.name.common.clone()
        };

        Self {
            code: record.cca3.clone(),
            role,
            name,
            flag_emoji: record.flag.clone().filter(|flag| !flag.is_empty()),
            flag_image: flag_image(record),
            region: record
                .region
                .clone()
                .filter(|region| !region.is_empty())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            population: format_population(record.population),
            languages: join_or_placeholder(record.languages.iter().map(|(_, name)| name.as_str())),
            currencies: join_or_placeholder(
                record
                    .currencies
                    .iter()
                    .filter_map(|(_, currency)| currency.name.as_deref()),
            ),
        }
    }

    pub fn title(&self) -> String {
        self.flag_emoji.as_ref().map_or_else(
            || self.name.clone(),
            |flag| format!("{flag} {}", self.name),
        )
    }
}

/// PNG first, SVG as fallback.
fn flag_image(record: &CountryRecord) -> Option<String> {
    let flags = record.flags.as_ref()?;
    flags
        .png
        .as_ref()
        .or(flags.svg.as_ref())
        .filter(|url| !url.is_empty())
        .cloned()
}

/// Millions with one decimal; zero and unknown populations show the placeholder.
pub fn format_population(population: Option<u64>) -> String {
    match population {
        Some(people) if people > 0 => {
            #[allow(clippy::cast_precision_loss)]
            let millions = people as f64 / 1_000_000.0;
            format!("{millions:.1} M")
        }
        _ => PLACEHOLDER.to_string(),
    }
}

fn join_or_placeholder<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined = values
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        joined
    }
}
