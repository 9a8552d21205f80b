use hero_geo_core::{ApiError, Hero, HeroClient, NewHero};

use crate::executor::Executor;

/// Async CRUD access to the `/heroes` collection.
#[derive(Clone)]
pub struct HeroService {
    client: HeroClient,
    executor: Executor,
}

impl HeroService {
    pub fn new(client: HeroClient, executor: Executor) -> Self {
        Self { client, executor }
    }

    pub fn collection_url(&self) -> String {
        self.client.collection_url()
    }

    /// Every hero, in the order the server returned them.
    pub async fn list(&self) -> Result<Vec<Hero>, ApiError> {
        let client = &self.client;
        self.executor
            .call(client.build_list_heroes(), |r| client.parse_list_heroes(r))
            .await
    }

    /// `None` when no returned record carries `id`.
    pub async fn get_by_id(&self, id: u64) -> Result<Option<Hero>, ApiError> {
        let client = &self.client;
        self.executor
            .call(client.build_get_hero(id), |r| client.parse_get_hero(r, id))
            .await
    }

    pub async fn add(&self, hero: &NewHero) -> Result<Hero, ApiError> {
        let client = &self.client;
        let request = client.build_create_hero(hero)?;
        self.executor
            .call(request, |r| client.parse_create_hero(r))
            .await
    }

    pub async fn update(&self, hero: &Hero) -> Result<Hero, ApiError> {
        let client = &self.client;
        let request = client.build_update_hero(hero)?;
        self.executor
            .call(request, |r| client.parse_update_hero(r))
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        let client = &self.client;
        self.executor
            .call(client.build_delete_hero(id), |r| client.parse_delete_hero(r))
            .await
    }

    /// A blank query resolves to no heroes without touching the network.
    pub async fn search(&self, text: &str) -> Result<Vec<Hero>, ApiError> {
        let client = &self.client;
        let Some(request) = client.build_search_heroes(text) else {
            return Ok(Vec::new());
        };
        self.executor
            .call(request, |r| client.parse_search_heroes(r))
            .await
    }
}
