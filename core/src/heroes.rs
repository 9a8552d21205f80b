//! Stateless request builder and response parser for the hero API.
//!
//! # Design
//! `HeroClient` holds the base URL and the static bearer token. Each
//! operation is split into a `build_*` method producing an `HttpRequest`
//! and a `parse_*` method consuming the `HttpResponse`. Retrying and the
//! actual round-trip belong to the caller.

use crate::error::ApiError;
use crate::http::{check_status, decode, encode, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Hero, NewHero};

/// Token sent on writes when none is configured.
pub const DEFAULT_AUTH_TOKEN: &str = "my-auth-token";

/// Synchronous, stateless client for the `/heroes` collection.
#[derive(Debug, Clone)]
pub struct HeroClient {
    base_url: String,
    auth_token: String,
}

impl HeroClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = token.into();
        self
    }

    /// `{base}/heroes`
    pub fn collection_url(&self) -> String {
        format!("{}/heroes", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/heroes/{id}", self.base_url)
    }

    fn write_headers(&self) -> Vec<(String, String)> {
        vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("authorization".to_string(), self.auth_token.clone()),
        ]
    }

    pub fn build_list_heroes(&self) -> HttpRequest {
        HttpRequest::get(self.collection_url())
    }

    /// Filtered collection query. The parse step still scans for the id, so
    /// a server that ignores the filter gives the same answer.
    pub fn build_get_hero(&self, id: u64) -> HttpRequest {
        HttpRequest::get(format!("{}?id={id}", self.collection_url()))
    }

    pub fn build_create_hero(&self, input: &NewHero) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: self.write_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_update_hero(&self, hero: &Hero) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item_url(hero.id),
            headers: self.write_headers(),
            body: Some(encode(hero)?),
        })
    }

    pub fn build_delete_hero(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: self.write_headers(),
            body: None,
        }
    }

    /// Returns `None` for a blank query: there is nothing to ask the server.
    pub fn build_search_heroes(&self, text: &str) -> Option<HttpRequest> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(HttpRequest::get(format!(
            "{}?name={}",
            self.collection_url(),
            urlencoding::encode(text)
        )))
    }

    pub fn parse_list_heroes(&self, response: HttpResponse) -> Result<Vec<Hero>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_get_hero(&self, response: HttpResponse, id: u64) -> Result<Option<Hero>, ApiError> {
        let heroes = self.parse_list_heroes(response)?;
        Ok(heroes.into_iter().find(|hero| hero.id == id))
    }

    pub fn parse_create_hero(&self, response: HttpResponse) -> Result<Hero, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_update_hero(&self, response: HttpResponse) -> Result<Hero, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// Any 2xx counts; the body is not inspected.
    pub fn parse_delete_hero(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_search_heroes(&self, response: HttpResponse) -> Result<Vec<Hero>, ApiError> {
        self.parse_list_heroes(response)
    }
}
