//! Seeded stand-in for the IBGE localidades endpoints.
//!
//! Only a handful of states and cities are served, but the JSON shapes match
//! IBGE's (Portuguese keys, cities nesting their state under
//! `microrregiao.mesorregiao.UF`).

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::AppState;

#[derive(Clone, Debug, Serialize)]
pub struct Region {
    pub id: u32,
    pub sigla: &'static str,
    pub nome: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Uf {
    pub id: u32,
    pub sigla: &'static str,
    pub nome: &'static str,
    pub regiao: Region,
}

#[derive(Clone, Debug, Serialize)]
pub struct Mesorregiao {
    pub id: u32,
    pub nome: &'static str,
    #[serde(rename = "UF")]
    pub uf: Uf,
}

#[derive(Clone, Debug, Serialize)]
pub struct Microrregiao {
    pub id: u32,
    pub nome: &'static str,
    pub mesorregiao: Mesorregiao,
}

#[derive(Clone, Debug, Serialize)]
pub struct Municipio {
    pub id: u32,
    pub nome: &'static str,
    pub microrregiao: Microrregiao,
}

#[derive(Debug, Default)]
pub struct GeoData {
    pub states: Vec<Uf>,
    pub cities: Vec<Municipio>,
}

const SUDESTE: Region = Region {
    id: 3,
    sigla: "SE",
    nome: "Sudeste",
};

const SUL: Region = Region {
    id: 4,
    sigla: "S",
    nome: "Sul",
};

const NORDESTE: Region = Region {
    id: 2,
    sigla: "NE",
    nome: "Nordeste",
};

fn uf(id: u32, sigla: &'static str, nome: &'static str, regiao: Region) -> Uf {
    Uf {
        id,
        sigla,
        nome,
        regiao,
    }
}

/// (city id, city name, micro id, micro name, meso id, meso name)
type CityRow = (u32, &'static str, u32, &'static str, u32, &'static str);

fn municipios(state: &Uf, rows: &[CityRow]) -> Vec<Municipio> {
    rows.iter()
        .map(|&(id, nome, micro_id, micro_nome, meso_id, meso_nome)| Municipio {
            id,
            nome,
            microrregiao: Microrregiao {
                id: micro_id,
                nome: micro_nome,
                mesorregiao: Mesorregiao {
                    id: meso_id,
                    nome: meso_nome,
                    uf: state.clone(),
                },
            },
        })
        .collect()
}

impl GeoData {
    pub fn seeded() -> Self {
        let sp = uf(35, "SP", "São Paulo", SUDESTE);
        let rj = uf(33, "RJ", "Rio de Janeiro", SUDESTE);
        let mg = uf(31, "MG", "Minas Gerais", SUDESTE);
        let pr = uf(41, "PR", "Paraná", SUL);
        let ba = uf(29, "BA", "Bahia", NORDESTE);

        let mut cities = municipios(
            &sp,
            &[
                (3550308, "São Paulo", 35061, "São Paulo", 3515, "Metropolitana de São Paulo"),
                (3509502, "Campinas", 35032, "Campinas", 3507, "Campinas"),
                (3548500, "Santos", 35063, "Santos", 3515, "Metropolitana de São Paulo"),
            ],
        );
        cities.extend(municipios(
            &rj,
            &[
                (3304557, "Rio de Janeiro", 33018, "Rio de Janeiro", 3306, "Metropolitana do Rio de Janeiro"),
                (3303302, "Niterói", 33018, "Rio de Janeiro", 3306, "Metropolitana do Rio de Janeiro"),
            ],
        ));
        cities.extend(municipios(
            &mg,
            &[(3106200, "Belo Horizonte", 31030, "Belo Horizonte", 3107, "Metropolitana de Belo Horizonte")],
        ));
        cities.extend(municipios(
            &pr,
            &[(4106902, "Curitiba", 41037, "Curitiba", 4110, "Metropolitana de Curitiba")],
        ));

        Self {
            states: vec![sp, rj, mg, pr, ba],
            cities,
        }
    }

    /// Cities of the state whose code (`SP`) or numeric id (`35`) matches.
    pub fn cities_of(&self, state: &str) -> Vec<Municipio> {
        self.cities
            .iter()
            .filter(|city| {
                let uf = &city.microrregiao.mesorregiao.uf;
                uf.sigla.eq_ignore_ascii_case(state) || uf.id.to_string() == state
            })
            .cloned()
            .collect()
    }
}

pub(crate) async fn list_states(State(state): State<AppState>) -> Json<Vec<Uf>> {
    Json(state.geo.states.clone())
}

/// Unknown states yield an empty array, as IBGE does.
pub(crate) async fn list_cities(
    State(state): State<AppState>,
    Path(uf): Path<String>,
) -> Json<Vec<Municipio>> {
    Json(state.geo.cities_of(&uf))
}
