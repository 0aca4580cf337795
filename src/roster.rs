//! Filter engine and row model for the roster screen

use serde::{Deserialize, Serialize};

use crate::state::RosterEntry;

const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/pokeapi/sprites/master/sprites/pokemon/other/official-artwork";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    #[default]
    ByNumber,
    ByName,
    Off,
}

impl FilterMode {
    pub fn cycle(self) -> Self {
        match self {
            FilterMode::ByNumber => FilterMode::ByName,
            FilterMode::ByName => FilterMode::Off,
            FilterMode::Off => FilterMode::ByNumber,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::ByNumber => "Number",
            FilterMode::ByName => "Name",
            FilterMode::Off => "Off",
        }
    }
}

/// Ordered subsequence of `roster` matching `text` under `mode`.
pub fn filter_roster(roster: &[RosterEntry], text: &str, mode: FilterMode) -> Vec<RosterEntry> {
    match mode {
        FilterMode::ByNumber => {
            let needle = text.trim().to_lowercase();
            roster
                .iter()
                .filter(|entry| {
                    needle.is_empty()
                        || entry
                            .identifier()
                            .is_some_and(|id| id.starts_with(needle.as_str()))
                })
                .cloned()
                .collect()
        }
        FilterMode::ByName => {
            let needle = text.to_lowercase();
            roster
                .iter()
                .filter(|entry| entry.name.to_lowercase().starts_with(needle.as_str()))
                .cloned()
                .collect()
        }
        FilterMode::Off => roster.to_vec(),
    }
}

pub fn sprite_url(id: impl std::fmt::Display) -> String {
    format!("{SPRITE_BASE}/{id}.png")
}

/// What one list row displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterRow {
    pub number: String,
    pub sprite_url: String,
    pub name: String,
}

impl RosterRow {
    pub fn from_entry(entry: &RosterEntry) -> Self {
        let id = entry.identifier().unwrap_or_default();
        Self {
            number: format!("#{id}"),
            sprite_url: sprite_url(id),
            name: entry.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kanto() -> Vec<RosterEntry> {
        (1..=151)
            .map(|id| RosterEntry {
                name: format!("mon-{id}"),
                url: format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
            })
            .collect()
    }

    fn ids(entries: &[RosterEntry]) -> Vec<u16> {
        entries
            .iter()
            .filter_map(|entry| entry.identifier()?.parse().ok())
            .collect()
    }

    #[test]
    fn number_prefix_one() {
        let filtered = filter_roster(&kanto(), "1", FilterMode::ByNumber);
        let mut expected = vec![1];
        expected.extend(10..=19);
        expected.extend(100..=151);
        assert_eq!(ids(&filtered), expected);
    }

    #[test]
    fn number_filter_trims_text() {
        let filtered = filter_roster(&kanto(), " 15 ", FilterMode::ByNumber);
        assert_eq!(ids(&filtered), vec![15, 150, 151]);
    }

    #[test]
    fn name_filter_ignores_case() {
        let roster = vec![
            RosterEntry {
                name: "pikachu".into(),
                url: "https://pokeapi.co/api/v2/pokemon/25/".into(),
            },
            RosterEntry {
                name: "raichu".into(),
                url: "https://pokeapi.co/api/v2/pokemon/26/".into(),
            },
        ];
        let filtered = filter_roster(&roster, "PIK", FilterMode::ByName);
        assert_eq!(filtered, vec![roster[0].clone()]);
    }

    #[test]
    fn empty_text_keeps_roster_in_order() {
        let roster = kanto();
        for mode in [FilterMode::ByNumber, FilterMode::ByName, FilterMode::Off] {
            assert_eq!(filter_roster(&roster, "", mode), roster);
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let roster = kanto();
        for (text, mode) in [
            ("1", FilterMode::ByNumber),
            ("mon-4", FilterMode::ByName),
            ("zzz", FilterMode::ByName),
            ("7", FilterMode::Off),
        ] {
            let once = filter_roster(&roster, text, mode);
            let twice = filter_roster(&once, text, mode);
            assert_eq!(once, twice, "text {text:?} mode {mode:?}");
        }
    }

    #[test]
    fn row_uses_png_artwork() {
        let row = RosterRow::from_entry(&RosterEntry {
            name: "mew".into(),
            url: "https://pokeapi.co/api/v2/pokemon/151/".into(),
        });
        assert_eq!(row.number, "#151");
        assert_eq!(row.name, "mew");
        assert!(row.sprite_url.ends_with("/official-artwork/151.png"));
    }

    #[test]
    fn mode_cycles_through_all() {
        let mode = FilterMode::default();
        assert_eq!(mode, FilterMode::ByNumber);
        assert_eq!(mode.cycle().cycle().cycle(), mode);
    }
}
