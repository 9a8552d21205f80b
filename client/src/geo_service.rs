use hero_geo_core::{ApiError, GeoCity, GeoClient, GeoState};

use crate::executor::Executor;

/// Read-only access to IBGE states and cities.
///
/// Failures come back as `Err`; presenting them is up to the caller.
#[derive(Clone)]
pub struct GeoLookupService {
    client: GeoClient,
    executor: Executor,
}

impl GeoLookupService {
    pub fn new(client: GeoClient, executor: Executor) -> Self {
        Self { client, executor }
    }

    pub async fn list_states(&self) -> Result<Vec<GeoState>, ApiError> {
        let client = &self.client;
        self.executor
            .call(client.build_list_states(), |r| client.parse_list_states(r))
            .await
    }

    pub async fn list_cities(&self, state_code: &str) -> Result<Vec<GeoCity>, ApiError> {
        let client = &self.client;
        self.executor
            .call(client.build_list_cities(state_code), |r| {
                client.parse_list_cities(r)
            })
            .await
    }
}
