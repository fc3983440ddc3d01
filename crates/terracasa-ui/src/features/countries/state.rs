//! Country guide selection and loading.

use crate::core::http::ApiError;
use crate::core::logic::normalize_country_code;
use terracasa_api_models::{Country, CountryOverview, CountrySection};
use tracing::debug;

/// Overview and sections for one country.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountryGuide {
    /// Header data.
    pub overview: CountryOverview,
    /// Editorial sections in display order.
    pub sections: Vec<CountrySection>,
}

/// Pending guide fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuideTicket {
    /// Upper-case country code.
    pub code: String,
    /// Selection generation at issue time.
    pub generation: u64,
}

/// Countries page state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountriesState {
    countries: Vec<Country>,
    list_error: Option<ApiError>,
    selected: Option<String>,
    guide: Option<CountryGuide>,
    loading: bool,
    error: Option<ApiError>,
    generation: u64,
}

impl CountriesState {
    /// Empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the country list.
    pub fn set_countries(&mut self, result: Result<Vec<Country>, ApiError>) {
        match result {
            Ok(mut countries) => {
                for country in &mut countries {
                    country.code = country.code.trim().to_ascii_uppercase();
                }
                self.countries = countries;
                self.list_error = None;
            }
            Err(err) => {
                self.countries.clear();
                self.list_error = Some(err);
            }
        }
    }

    /// Select a country by code; returns the fetch to run.
    ///
    /// Re-selecting the loaded country and blank codes return `None`.
    pub fn select(&mut self, raw: &str) -> Option<GuideTicket> {
        let code = normalize_country_code(raw)?;
        if self.selected.as_deref() == Some(code.as_str()) && (self.guide.is_some() || self.loading) {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.selected = Some(code.clone());
        self.guide = None;
        self.error = None;
        self.loading = true;
        debug!(country = %code, "country guide requested");
        Some(GuideTicket {
            code,
            generation: self.generation,
        })
    }

    /// Commit a fetched guide; returns `false` for superseded tickets.
    pub fn apply(&mut self, ticket: &GuideTicket, result: Result<CountryGuide, ApiError>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(guide) => self.guide = Some(guide),
            Err(err) => self.error = Some(err),
        }
        true
    }

    /// Known countries.
    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Failure loading the list.
    #[must_use]
    pub const fn list_error(&self) -> Option<&ApiError> {
        self.list_error.as_ref()
    }

    /// Selected upper-case code.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Display name of the selected country, if listed.
    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        let code = self.selected.as_deref()?;
        self.countries
            .iter()
            .find(|country| country.code == code)
            .map(|country| country.name.as_str())
    }

    /// Loaded guide.
    #[must_use]
    pub const fn guide(&self) -> Option<&CountryGuide> {
        self.guide.as_ref()
    }

    /// A guide fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Failure loading the guide.
    #[must_use]
    pub const fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guide(code: &str) -> CountryGuide {
        CountryGuide {
            overview: CountryOverview {
                code: code.to_string(),
                name: format!("Country {code}"),
                ..CountryOverview::default()
            },
            sections: vec![CountrySection {
                key: "buying".to_string(),
                title: "Buying".to_string(),
                body: "Steps".to_string(),
            }],
        }
    }

    #[test]
    fn selection_is_keyed_by_upper_case_code() {
        let mut state = CountriesState::new();
        state.set_countries(Ok(vec![Country {
            code: "es".to_string(),
            name: "Spain".to_string(),
        }]));
        assert_eq!(state.select(" "), None);
        let ticket = state.select("es");
        assert_eq!(ticket.as_ref().map(|t| t.code.as_str()), Some("ES"));
        assert_eq!(state.selected_name(), Some("Spain"));
        assert_eq!(state.select("ES"), None);
        assert!(state.is_loading());
    }

    #[test]
    fn superseded_guides_are_ignored() {
        let mut state = CountriesState::new();
        let (Some(first), Some(second)) = (state.select("pt"), state.select("tr")) else {
            panic!("expected tickets");
        };
        assert!(!state.apply(&first, Ok(guide("PT"))));
        assert!(state.guide().is_none());
        assert!(state.apply(&second, Ok(guide("TR"))));
        assert_eq!(state.guide().map(|g| g.overview.code.as_str()), Some("TR"));
        assert!(!state.is_loading());
    }

    #[test]
    fn failures_are_recorded() {
        let mut state = CountriesState::new();
        state.set_countries(Err(ApiError::network("offline")));
        assert!(state.list_error().is_some());
        let Some(ticket) = state.select("de") else {
            panic!("expected a ticket");
        };
        state.apply(&ticket, Err(ApiError::network("offline")));
        assert!(state.error().is_some());
        assert!(state.select("DE").is_some());
    }
}
