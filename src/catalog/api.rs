//! PokeAPI client
//!
//! Three read-only endpoints are used: the pokedex entry list, species
//! details (capture rate) and creature details (sprites, types, stats,
//! measurements).

use super::{display_name, BaseStat, FetchError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Catalog entry as listed by the pokedex endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStub {
    /// Position within the requested catalog
    pub entry_number: u32,
    /// Display name
    pub name: String,
    /// National id used for the detail lookups
    pub national_id: u32,
}

/// Fields taken from the species payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesDetails {
    pub capture_rate: u8,
}

/// Fields taken from the creature payload
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureDetails {
    pub sprite_ref: Option<String>,
    pub categories: Vec<String>,
    pub stats: Vec<BaseStat>,
    /// Height in decimeters
    pub height_dm: u32,
    /// Weight in hectograms
    pub weight_hg: u32,
}

/// Remote source of catalog data
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Ordered entry list for a catalog
    async fn entries(&self, catalog_id: &str) -> Result<Vec<EntryStub>, FetchError>;

    /// Species details for a national id
    async fn species(&self, national_id: u32) -> Result<SpeciesDetails, FetchError>;

    /// Creature details for a national id
    async fn creature(&self, national_id: u32) -> Result<CreatureDetails, FetchError>;
}

/// HTTP client for PokeAPI
#[derive(Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a client against the public API
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Create a client against an alternative base URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Shared reqwest client, reused for sprite downloads
    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::trace!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let bytes = self.get_bytes(url).await?;
        decode(url, &bytes)
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    async fn entries(&self, catalog_id: &str) -> Result<Vec<EntryStub>, FetchError> {
        let url = format!("{}/pokedex/{}/", self.base_url, catalog_id);
        let response: PokedexResponse = self.get_json(&url).await?;
        Ok(response.into_stubs())
    }

    async fn species(&self, national_id: u32) -> Result<SpeciesDetails, FetchError> {
        let url = format!("{}/pokemon-species/{}/", self.base_url, national_id);
        let response: SpeciesResponse = self.get_json(&url).await?;
        Ok(response.into_details())
    }

    async fn creature(&self, national_id: u32) -> Result<CreatureDetails, FetchError> {
        let url = format!("{}/pokemon/{}/", self.base_url, national_id);
        let response: PokemonResponse = self.get_json(&url).await?;
        Ok(response.into_details())
    }
}

fn decode<T: DeserializeOwned>(url: &str, bytes: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(bytes).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Deserialize)]
struct PokedexResponse {
    pokemon_entries: Vec<PokedexEntryResponse>,
}

#[derive(Deserialize)]
struct PokedexEntryResponse {
    entry_number: u32,
    pokemon_species: NamedResource,
}

impl PokedexResponse {
    fn into_stubs(self) -> Vec<EntryStub> {
        self.pokemon_entries
            .into_iter()
            .map(|entry| EntryStub {
                entry_number: entry.entry_number,
                name: display_name(&entry.pokemon_species.name),
                national_id: id_from_resource_url(&entry.pokemon_species.url)
                    .unwrap_or(entry.entry_number),
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct SpeciesResponse {
    #[serde(default)]
    capture_rate: Option<u8>,
}

impl SpeciesResponse {
    fn into_details(self) -> SpeciesDetails {
        SpeciesDetails {
            capture_rate: self.capture_rate.unwrap_or(0),
        }
    }
}

#[derive(Deserialize)]
struct PokemonResponse {
    height: u32,
    weight: u32,
    types: Vec<TypeSlot>,
    stats: Vec<StatSlot>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Deserialize)]
struct StatSlot {
    base_stat: u16,
    stat: NamedResource,
}

impl PokemonResponse {
    fn into_details(self) -> CreatureDetails {
        let sprite_ref = pointer_string(&self.sprites, "/other/official-artwork/front_default")
            .or_else(|| pointer_string(&self.sprites, "/front_default"));

        CreatureDetails {
            sprite_ref,
            categories: self
                .types
                .into_iter()
                .map(|slot| display_name(&slot.type_info.name))
                .collect(),
            stats: self
                .stats
                .into_iter()
                .map(|slot| BaseStat {
                    name: slot.stat.name,
                    base: slot.base_stat,
                })
                .collect(),
            height_dm: self.height,
            weight_hg: self.weight,
        }
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Trailing numeric id of a resource URL (`.../pokemon-species/25/` -> 25).
fn id_from_resource_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_resource_url() {
        assert_eq!(
            id_from_resource_url("https://pokeapi.co/api/v2/pokemon-species/25/"),
            Some(25)
        );
        assert_eq!(
            id_from_resource_url("https://pokeapi.co/api/v2/pokemon-species/152"),
            Some(152)
        );
        assert_eq!(id_from_resource_url("https://pokeapi.co/api/v2/"), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = PokeApiClient::with_base_url("http://localhost:8000/api/v2/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000/api/v2");
        assert_eq!(PokeApiClient::new().unwrap().base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_pokedex_payload_to_stubs() {
        let json = r#"{
            "id": 2,
            "name": "kanto",
            "pokemon_entries": [
                {"entry_number": 1, "pokemon_species": {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon-species/1/"}},
                {"entry_number": 2, "pokemon_species": {"name": "mr-mime", "url": "https://pokeapi.co/api/v2/pokemon-species/122/"}},
                {"entry_number": 3, "pokemon_species": {"name": "odd", "url": "not-a-url"}}
            ]
        }"#;
        let response: PokedexResponse = decode("test", json.as_bytes()).unwrap();
        let stubs = response.into_stubs();

        assert_eq!(stubs.len(), 3);
        assert_eq!(stubs[0].name, "Bulbasaur");
        assert_eq!(stubs[1].name, "Mr-Mime");
        assert_eq!(stubs[1].national_id, 122);
        assert_eq!(stubs[2].national_id, 3);
    }

    #[test]
    fn test_species_payload_capture_rate() {
        let with_rate: SpeciesResponse =
            decode("test", br#"{"name": "mewtwo", "capture_rate": 3}"#).unwrap();
        assert_eq!(with_rate.into_details().capture_rate, 3);

        let without: SpeciesResponse = decode("test", br#"{"name": "missingno"}"#).unwrap();
        assert_eq!(without.into_details().capture_rate, 0);
    }

    #[test]
    fn test_pokemon_payload_to_details() {
        let json = r#"{
            "id": 1,
            "height": 7,
            "weight": 69,
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
                {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
            ],
            "stats": [
                {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": "u"}},
                {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": "u"}}
            ],
            "sprites": {
                "front_default": "https://img/front/1.png",
                "other": {"official-artwork": {"front_default": "https://img/artwork/1.png"}}
            }
        }"#;
        let response: PokemonResponse = decode("test", json.as_bytes()).unwrap();
        let details = response.into_details();

        assert_eq!(details.categories, vec!["Grass", "Poison"]);
        assert_eq!(details.stats[0], BaseStat { name: "hp".to_string(), base: 45 });
        assert_eq!(details.stats[1].base, 49);
        assert_eq!(details.height_dm, 7);
        assert_eq!(details.weight_hg, 69);
        assert_eq!(details.sprite_ref.as_deref(), Some("https://img/artwork/1.png"));
    }

    #[test]
    fn test_sprite_falls_back_to_front_default() {
        let json = r#"{
            "height": 1, "weight": 1, "types": [], "stats": [],
            "sprites": {"front_default": "https://img/front/9.png", "other": {"official-artwork": {"front_default": null}}}
        }"#;
        let details = decode::<PokemonResponse>("test", json.as_bytes())
            .unwrap()
            .into_details();
        assert_eq!(details.sprite_ref.as_deref(), Some("https://img/front/9.png"));

        let bare = r#"{"height": 1, "weight": 1, "types": [], "stats": [], "sprites": {}}"#;
        let details = decode::<PokemonResponse>("test", bare.as_bytes())
            .unwrap()
            .into_details();
        assert_eq!(details.sprite_ref, None);
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let err = decode::<PokemonResponse>("https://x/pokemon/1/", b"{\"height\": \"tall\"}")
            .err()
            .unwrap();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert!(err.to_string().contains("https://x/pokemon/1/"));
    }
}
