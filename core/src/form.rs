//! State + city selection form with required-field validation.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    State,
    City,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::State => write!(f, "state"),
            FormField::City => write!(f, "city"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("required field(s) missing: {}", field_list(.0))]
    Missing(Vec<FormField>),
}

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoSelection {
    pub state_code: String,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoSelectionForm {
    state: String,
    city: String,
}

impl GeoSelectionForm {
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Selecting a different state invalidates the chosen city.
    pub fn set_state(&mut self, code: &str) {
        if self.state != code {
            self.city.clear();
        }
        self.state = code.to_string();
    }

    pub fn set_city(&mut self, city: &str) {
        self.city = city.to_string();
    }

    pub fn missing_fields(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.state.trim().is_empty() {
            missing.push(FormField::State);
        }
        if self.city.trim().is_empty() {
            missing.push(FormField::City);
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn validate(&self) -> Result<GeoSelection, FormError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::Missing(missing));
        }
        Ok(GeoSelection {
            state_code: self.state.trim().to_string(),
            city: self.city.trim().to_string(),
        })
    }
}
