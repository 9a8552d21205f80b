//! View models for the hero list and the geo lookup form.
//!
//! # Design
//! Each view owns its display state and a `Teardown`. Loads go through
//! `Teardown::run`, so after `destroy` an in-flight result is dropped and
//! the state stays as it was. Service errors are kept on the view instead of
//! being shown directly; the embedding UI decides how to present them.

use hero_geo_core::{
    ApiError, DataTable, FormError, GeoCity, GeoSelection, GeoSelectionForm, GeoState, Hero,
};

use crate::geo_service::GeoLookupService;
use crate::hero_service::HeroService;
use crate::teardown::Teardown;

pub struct HeroListView {
    service: HeroService,
    table: DataTable<Hero>,
    loading: bool,
    error: Option<ApiError>,
    teardown: Teardown,
}

impl HeroListView {
    pub fn new(service: HeroService) -> Self {
        Self {
            service,
            table: DataTable::default(),
            loading: false,
            error: None,
            teardown: Teardown::new(),
        }
    }

    pub async fn init(&mut self) {
        self.load().await;
    }

    /// Fetch the full collection into the table, keeping filter and sort.
    pub async fn load(&mut self) {
        self.loading = true;
        let Some(result) = self.teardown.run(self.service.list()).await else {
            return;
        };
        self.loading = false;
        match result {
            Ok(heroes) => {
                self.error = None;
                self.table.set_rows(heroes);
            }
            Err(e) => self.error = Some(e),
        }
    }

    pub fn apply_filter(&mut self, text: &str) {
        self.table.apply_filter(text);
    }

    pub fn table(&self) -> &DataTable<Hero> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<Hero> {
        &mut self.table
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Handle for raising the cancellation signal from outside the view.
    pub fn teardown(&self) -> Teardown {
        self.teardown.clone()
    }

    pub fn destroy(&self) {
        self.teardown.cancel();
    }
}

pub struct GeoLookupView {
    service: GeoLookupService,
    states: Vec<GeoState>,
    cities: Vec<GeoCity>,
    form: GeoSelectionForm,
    error: Option<ApiError>,
    teardown: Teardown,
}

impl GeoLookupView {
    pub fn new(service: GeoLookupService) -> Self {
        Self {
            service,
            states: Vec::new(),
            cities: Vec::new(),
            form: GeoSelectionForm::default(),
            error: None,
            teardown: Teardown::new(),
        }
    }

    pub async fn init(&mut self) {
        let Some(result) = self.teardown.run(self.service.list_states()).await else {
            return;
        };
        match result {
            Ok(states) => {
                self.error = None;
                self.states = states;
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Record the state choice and load its cities. A new state empties the
    /// city list and the city field until the load completes.
    pub async fn select_state(&mut self, code: &str) {
        if self.form.state() != code {
            self.cities.clear();
        }
        self.form.set_state(code);

        let Some(result) = self.teardown.run(self.service.list_cities(code)).await else {
            return;
        };
        match result {
            Ok(cities) => {
                self.error = None;
                self.cities = cities;
            }
            Err(e) => self.error = Some(e),
        }
    }

    pub fn select_city(&mut self, name: &str) {
        self.form.set_city(name);
    }

    pub fn submit(&self) -> Result<GeoSelection, FormError> {
        let selection = self.form.validate()?;
        tracing::info!(
            state = %selection.state_code,
            city = %selection.city,
            "geo selection submitted"
        );
        Ok(selection)
    }

    pub fn states(&self) -> &[GeoState] {
        &self.states
    }

    pub fn cities(&self) -> &[GeoCity] {
        &self.cities
    }

    pub fn form(&self) -> &GeoSelectionForm {
        &self.form
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn teardown(&self) -> Teardown {
        self.teardown.clone()
    }

    pub fn destroy(&self) {
        self.teardown.cancel();
    }
}
