use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub mod geo;

pub use geo::GeoData;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Body of POST and PUT. An `id` in the body is ignored; the path or the
/// store decides it.
#[derive(Deserialize)]
pub struct HeroInput {
    pub name: String,
    #[serde(default)]
    pub active: Option<bool>,
}

/// json-server style equality filters on the collection.
#[derive(Debug, Default, Deserialize)]
pub struct HeroFilter {
    pub id: Option<u64>,
    pub name: Option<String>,
}

#[derive(Debug, Default)]
pub struct HeroStore {
    heroes: BTreeMap<u64, Hero>,
}

impl HeroStore {
    pub fn with_heroes(heroes: Vec<Hero>) -> Self {
        Self {
            heroes: heroes.into_iter().map(|h| (h.id, h)).collect(),
        }
    }

    fn next_id(&self) -> u64 {
        self.heroes.keys().next_back().map_or(1, |id| id + 1)
    }
}

pub type Db = Arc<RwLock<HeroStore>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub geo: Arc<GeoData>,
}

/// Nine heroes named `json-server`, `json-server2` .. `json-server9`.
pub fn seed_heroes() -> Vec<Hero> {
    (1..=9)
        .map(|id| Hero {
            id,
            name: if id == 1 {
                "json-server".to_string()
            } else {
                format!("json-server{id}")
            },
            active: Some(true),
        })
        .collect()
}

/// Router with an empty hero collection and the seeded geo data.
pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(heroes: Vec<Hero>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(HeroStore::with_heroes(heroes))),
        geo: Arc::new(GeoData::seeded()),
    };
    Router::new()
        .route("/heroes", get(list_heroes).post(create_hero))
        .route(
            "/heroes/{id}",
            get(get_hero).put(update_hero).delete(delete_hero),
        )
        .route("/localidades/estados", get(geo::list_states))
        .route("/localidades/estados/{uf}/municipios", get(geo::list_cities))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, heroes: Vec<Hero>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(heroes)).await
}

async fn list_heroes(
    State(state): State<AppState>,
    Query(filter): Query<HeroFilter>,
) -> Json<Vec<Hero>> {
    let store = state.db.read().await;
    let heroes = store
        .heroes
        .values()
        .filter(|h| filter.id.map_or(true, |id| h.id == id))
        .filter(|h| filter.name.as_deref().map_or(true, |name| h.name == name))
        .cloned()
        .collect();
    Json(heroes)
}

async fn create_hero(
    State(state): State<AppState>,
    Json(input): Json<HeroInput>,
) -> (StatusCode, Json<Hero>) {
    let mut store = state.db.write().await;
    let hero = Hero {
        id: store.next_id(),
        name: input.name,
        active: input.active,
    };
    store.heroes.insert(hero.id, hero.clone());
    tracing::debug!(id = hero.id, "hero created");
    (StatusCode::CREATED, Json(hero))
}

async fn get_hero(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Hero>, StatusCode> {
    let store = state.db.read().await;
    store.heroes.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement: an absent `active` clears the stored flag.
async fn update_hero(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<HeroInput>,
) -> Result<Json<Hero>, StatusCode> {
    let mut store = state.db.write().await;
    let hero = store.heroes.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    hero.name = input.name;
    hero.active = input.active;
    tracing::debug!(id, "hero replaced");
    Ok(Json(hero.clone()))
}

/// json-server answers a delete with `200 {}`.
async fn delete_hero(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut store = state.db.write().await;
    store.heroes.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::debug!(id, "hero deleted");
    Ok(Json(serde_json::json!({})))
}
