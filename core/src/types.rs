//! Domain DTOs for the hero API and the IBGE localidades API.
//!
//! # Design
//! These mirror the mock server's schema but are defined independently;
//! integration tests catch drift. IBGE answers in Portuguese field names, so
//! the geo types rename on the wire and expose English accessors.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Heroes
// ---------------------------------------------------------------------------

/// A hero record as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hero {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Payload for creating a hero. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewHero {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Geo reference data
// ---------------------------------------------------------------------------

/// One of the five Brazilian macro-regions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeoRegion {
    pub id: u32,
    #[serde(rename = "sigla")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
}

/// A federative unit (state), e.g. `{ id: 35, code: "SP", name: "São Paulo" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeoState {
    pub id: u32,
    #[serde(rename = "sigla")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(
        rename = "regiao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<GeoRegion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mesoregion {
    pub id: u32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "UF")]
    pub state: GeoState,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Microregion {
    pub id: u32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "mesorregiao")]
    pub mesoregion: Mesoregion,
}

/// A municipality. The parent state hangs off the micro/meso-region chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeoCity {
    pub id: u32,
    #[serde(rename = "nome")]
    pub name: String,
    // IBGE has shipped `null` here for a handful of recently created
    // municipalities.
    #[serde(
        rename = "microrregiao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub microregion: Option<Microregion>,
}

impl GeoCity {
    /// The state this city belongs to, when the server included it.
    pub fn state(&self) -> Option<&GeoState> {
        self.microregion.as_ref().map(|m| &m.mesoregion.state)
    }
}
