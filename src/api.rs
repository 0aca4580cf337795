//! PokeAPI client for the roster and detail loaders

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::PokedexError;
use crate::route::MAX_POKEMON;
use crate::state::{FlavorTextEntry, PokemonRecord, PokemonStat, RosterEntry, SpeciesRecord};

pub const API_BASE: &str = "https://pokeapi.co/api/v2";

static SHARED: OnceLock<PokeApi> = OnceLock::new();

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonSpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntryResponse>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntryResponse {
    flavor_text: String,
    language: NamedResource,
}

impl From<PokemonResponse> for PokemonRecord {
    fn from(response: PokemonResponse) -> Self {
        PokemonRecord {
            id: response.id,
            name: response.name,
            types: response
                .types
                .into_iter()
                .map(|slot| slot.type_info.name)
                .collect(),
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            stats: response
                .stats
                .into_iter()
                .map(|slot| PokemonStat {
                    name: slot.stat.name,
                    base_stat: slot.base_stat,
                })
                .collect(),
            weight: response.weight,
            height: response.height,
        }
    }
}

impl From<PokemonSpeciesResponse> for SpeciesRecord {
    fn from(response: PokemonSpeciesResponse) -> Self {
        SpeciesRecord {
            flavor_text_entries: response
                .flavor_text_entries
                .into_iter()
                .map(|entry| FlavorTextEntry {
                    language: entry.language.name,
                    flavor_text: entry.flavor_text,
                })
                .collect(),
        }
    }
}

/// PokeAPI client bound to one base url.
#[derive(Clone, Debug)]
pub struct PokeApi {
    base: String,
    http: reqwest::Client,
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

impl PokeApi {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub async fn fetch_roster(&self) -> Result<Vec<RosterEntry>, PokedexError> {
        let url = format!("{}/pokemon?limit={MAX_POKEMON}", self.base);
        let response: ListResponse = self.fetch_json(&url).await?;
        Ok(response
            .results
            .into_iter()
            .map(|entry| RosterEntry {
                name: entry.name,
                url: entry.url,
            })
            .collect())
    }

    pub async fn fetch_record(&self, id: u16) -> Result<PokemonRecord, PokedexError> {
        let url = format!("{}/pokemon/{id}", self.base);
        let response: PokemonResponse = self.fetch_json(&url).await?;
        Ok(response.into())
    }

    pub async fn fetch_species(&self, id: u16) -> Result<SpeciesRecord, PokedexError> {
        let url = format!("{}/pokemon-species/{id}", self.base);
        let response: PokemonSpeciesResponse = self.fetch_json(&url).await?;
        Ok(response.into())
    }

    /// Record and species in parallel; fails as soon as either leg fails.
    pub async fn fetch_detail(
        &self,
        id: u16,
    ) -> Result<(PokemonRecord, SpeciesRecord), PokedexError> {
        tokio::try_join!(self.fetch_record(id), self.fetch_species(id))
    }

    /// Gate for row activation: both legs must succeed, the data is dropped.
    pub async fn prefetch(&self, id: u16) -> Result<(), PokedexError> {
        self.fetch_detail(id).await.map(|_| ())
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, PokedexError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Client shared by the running app's effect tasks.
pub fn shared() -> &'static PokeApi {
    SHARED.get_or_init(PokeApi::default)
}

/// Point the shared client at `base` instead of the public PokeAPI.
///
/// Must run before the first `shared()` call; later calls are ignored.
pub fn set_api_base(base: impl Into<String>) {
    let _ = SHARED.set(PokeApi::new(base));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_roster_page() {
        let body = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=151&limit=151",
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;
        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[1].name, "ivysaur");
    }

    #[test]
    fn decode_pokemon_record() {
        let body = r#"{
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "base_experience": 64,
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
                {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
            ],
            "abilities": [
                {"ability": {"name": "overgrow", "url": "u"}, "is_hidden": false, "slot": 1},
                {"ability": {"name": "chlorophyll", "url": "u"}, "is_hidden": true, "slot": 3}
            ],
            "stats": [
                {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": "u"}},
                {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": "u"}}
            ]
        }"#;
        let response: PokemonResponse = serde_json::from_str(body).unwrap();
        let record = PokemonRecord::from(response);
        assert_eq!(record.id, 1);
        assert_eq!(record.types, vec!["grass", "poison"]);
        assert_eq!(record.abilities, vec!["overgrow", "chlorophyll"]);
        assert_eq!(
            record.stats[0],
            PokemonStat {
                name: "hp".into(),
                base_stat: 45
            }
        );
        assert_eq!((record.weight, record.height), (69, 7));
    }

    #[test]
    fn decode_species_keeps_entry_order() {
        let body = r#"{
            "flavor_text_entries": [
                {"flavor_text": "Eine Knospe", "language": {"name": "de", "url": "u"}, "version": {"name": "x", "url": "u"}},
                {"flavor_text": "A strange seed\fwas planted", "language": {"name": "en", "url": "u"}, "version": {"name": "red", "url": "u"}}
            ]
        }"#;
        let response: PokemonSpeciesResponse = serde_json::from_str(body).unwrap();
        let species = SpeciesRecord::from(response);
        assert_eq!(species.flavor_text_entries.len(), 2);
        assert_eq!(species.flavor_text_entries[0].language, "de");
        assert_eq!(
            species.flavor_text_entries[1].flavor_text,
            "A strange seed\u{000C}was planted"
        );
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        assert_eq!(PokeApi::default().base(), "https://pokeapi.co/api/v2");
        assert_eq!(PokeApi::new("http://127.0.0.1:9000/").base(), "http://127.0.0.1:9000");
    }
}
