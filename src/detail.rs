//! Projection of a fetched record into the detail screen's fields

use serde::{Deserialize, Serialize};

use crate::roster::sprite_url;
use crate::state::{PokemonRecord, PokemonStat, SpeciesRecord};

pub const FALLBACK_COLOR: &str = "#A8A8A8";
pub const NO_DESCRIPTION: &str = "No description available.";
/// Progress bars are scaled against this; higher stats clip.
pub const STAT_BAR_MAX: u16 = 100;

const TYPE_COLORS: [(&str, &str); 17] = [
    ("normal", "#A8A878"),
    ("fire", "#F08030"),
    ("water", "#6890F0"),
    ("electric", "#F8D030"),
    ("grass", "#78C850"),
    ("ice", "#98D8D8"),
    ("fighting", "#C03028"),
    ("poison", "#A040A0"),
    ("ground", "#E0C068"),
    ("flying", "#A890F0"),
    ("psychic", "#F85888"),
    ("bug", "#A8B820"),
    ("rock", "#B8A038"),
    ("ghost", "#705898"),
    ("dragon", "#7038F8"),
    ("dark", "#705848"),
    ("steel", "#B8B8D0"),
];

const STAT_LABELS: [(&str, &str); 6] = [
    ("hp", "HP"),
    ("attack", "ATK"),
    ("defense", "DEF"),
    ("special-attack", "SATK"),
    ("special-defense", "SDEF"),
    ("speed", "SPD"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
    pub id: u16,
    pub title: String,
    pub name: String,
    pub number: String,
    pub accent: String,
    pub image_url: String,
    pub image_alt: String,
    pub types: Vec<TypeBadge>,
    pub weight: String,
    pub height: String,
    pub abilities: Vec<String>,
    pub stats: Vec<StatLine>,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeBadge {
    pub label: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub label: String,
    pub value: String,
    pub raw: u16,
}

impl StatLine {
    pub fn from_stat(stat: &PokemonStat) -> Self {
        Self {
            label: stat_label(&stat.name),
            value: format!("{:03}", stat.base_stat),
            raw: stat.base_stat,
        }
    }

    /// Filled cells for a bar `width` cells wide.
    pub fn filled(&self, width: usize) -> usize {
        usize::from(self.raw.min(STAT_BAR_MAX)) * width / usize::from(STAT_BAR_MAX)
    }
}

pub fn project(record: &PokemonRecord, species: &SpeciesRecord) -> DetailView {
    let name = capitalize(&record.name);
    let accent = record
        .types
        .first()
        .map(|name| type_color(name))
        .unwrap_or(FALLBACK_COLOR);

    DetailView {
        id: record.id,
        title: name.clone(),
        number: format!("#{:03}", record.id),
        accent: accent.to_string(),
        image_url: sprite_url(record.id),
        image_alt: format!("{name} Image"),
        types: record
            .types
            .iter()
            .map(|name| TypeBadge {
                label: capitalize(name),
                color: type_color(name).to_string(),
            })
            .collect(),
        weight: format!("{}kg", tenths(record.weight)),
        height: format!("{}m", tenths(record.height)),
        abilities: record.abilities.iter().map(|name| capitalize(name)).collect(),
        stats: record.stats.iter().map(StatLine::from_stat).collect(),
        description: flavor_text(species),
        name,
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

pub fn type_color(name: &str) -> &'static str {
    TYPE_COLORS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

pub fn stat_label(name: &str) -> String {
    STAT_LABELS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| name.to_ascii_uppercase())
}

/// First English flavor text with form feeds flattened to spaces.
pub fn flavor_text(species: &SpeciesRecord) -> String {
    species
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language == "en")
        .map(|entry| entry.flavor_text.replace('\u{000C}', " "))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

/// `raw / 10` without a trailing `.0`, e.g. 69 -> "6.9", 100 -> "10".
fn tenths(raw: u16) -> String {
    match raw % 10 {
        0 => (raw / 10).to_string(),
        rest => format!("{}.{rest}", raw / 10),
    }
}
