//! Sans-IO core for the hero and IBGE geo lookup clients.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The host crate executes the round-trip and loops
//! on the `RetryPolicy`, keeping everything here deterministic.
//!
//! # Design
//! - `HeroClient` and `GeoClient` hold only configuration (base URL, token).
//! - Each operation is split into `build_*` and `parse_*`.
//! - `DataTable` and `GeoSelectionForm` carry the view state the UI binds to;
//!   they are plain data so they can be tested without a runtime.

pub mod error;
pub mod form;
pub mod geo;
pub mod heroes;
pub mod http;
pub mod retry;
pub mod table;
pub mod types;

pub use error::ApiError;
pub use form::{FormError, FormField, GeoSelection, GeoSelectionForm};
pub use geo::{GeoClient, IBGE_LOCALIDADES_URL};
pub use heroes::{HeroClient, DEFAULT_AUTH_TOKEN};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use retry::{RetryPolicy, DEFAULT_MAX_RETRIES};
pub use table::{DataTable, SortDirection, TableRow};
pub use types::{GeoCity, GeoRegion, GeoState, Hero, Microregion, Mesoregion, NewHero};
