//! Request builder and response parser for the IBGE localidades API.

use crate::error::ApiError;
use crate::http::{check_status, decode, HttpRequest, HttpResponse};
use crate::types::{GeoCity, GeoState};

/// Public IBGE endpoint the client talks to unless configured otherwise.
pub const IBGE_LOCALIDADES_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// Read-only client for states and their cities.
#[derive(Debug, Clone)]
pub struct GeoClient {
    base_url: String,
}

impl Default for GeoClient {
    fn default() -> Self {
        Self::new(IBGE_LOCALIDADES_URL)
    }
}

impl GeoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_states(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/estados", self.base_url))
    }

    pub fn build_list_cities(&self, state_code: &str) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/estados/{}/municipios",
            self.base_url,
            urlencoding::encode(state_code)
        ))
    }

    pub fn parse_list_states(&self, response: HttpResponse) -> Result<Vec<GeoState>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// Returns the cities exactly as served; no filtering by state happens here.
    pub fn parse_list_cities(&self, response: HttpResponse) -> Result<Vec<GeoCity>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }
}
