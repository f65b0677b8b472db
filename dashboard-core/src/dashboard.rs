use serde::Serialize;
use tracing::{error, info, instrument};

use crate::{
    model::WeatherRecord,
    pagination::{PageControls, Pagination},
    provider::{FetchError, WeatherProvider},
    store::{CityList, Entry, RecordId},
    units::{TemperatureUnit, convert},
};

/// One card as the view shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    #[serde(skip)]
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
}

impl CardView {
    fn new(entry: &Entry, unit: TemperatureUnit) -> Self {
        let record = &entry.record;
        Self {
            id: entry.id,
            name: record.name.clone(),
            description: record.description().to_string(),
            temperature: convert(record.temp_kelvin(), unit),
            humidity: record.humidity().to_string(),
            wind_speed: record.wind_speed().to_string(),
        }
    }
}

/// Snapshot of everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub loading: bool,
    pub search: String,
    pub unit: TemperatureUnit,
    pub toggle_label: &'static str,
    pub cards: Vec<CardView>,
    pub controls: PageControls,
    pub current_page: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Owns all dashboard state: the city list, search text, loading flag,
/// display unit and page position.
#[derive(Debug)]
pub struct Dashboard<P> {
    provider: P,
    cities: CityList,
    search: String,
    loading: bool,
    unit: TemperatureUnit,
    pagination: Pagination,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, TemperatureUnit::default(), Pagination::default())
    }

    pub fn with_settings(provider: P, unit: TemperatureUnit, pagination: Pagination) -> Self {
        Self {
            provider,
            cities: CityList::new(),
            search: String::new(),
            loading: false,
            unit,
            pagination,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cities(&self) -> &CityList {
        &self.cities
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Fetch the current search text and append the result.
    ///
    /// On success the search field is cleared. Any failure is logged and
    /// leaves both the list and the search field untouched.
    #[instrument(skip(self), fields(search = %self.search))]
    pub async fn add_city(&mut self) -> Option<RecordId> {
        let query = self.start_add();
        let result = self.provider.fetch_current(&query).await;
        self.finish_add(result)
    }

    /// Raise the loading flag and hand back the text to look up.
    pub fn start_add(&mut self) -> String {
        self.loading = true;
        self.search.clone()
    }

    /// Apply a lookup started with [`start_add`](Self::start_add) and lower
    /// the loading flag. The flag is a plain bool: with overlapping lookups
    /// the last one to finish decides it.
    pub fn finish_add(&mut self, result: Result<WeatherRecord, FetchError>) -> Option<RecordId> {
        let added = match result {
            Ok(record) if record.is_success_code() => {
                let name = record.name.clone();
                let id = self.cities.push(record);
                self.search.clear();
                info!(%id, %name, "city added");
                Some(id)
            }
            Ok(record) => {
                error!(cod = ?record.cod, "city not found");
                None
            }
            Err(err) => {
                error!(error = %err, "error fetching weather data");
                None
            }
        };
        self.loading = false;
        added
    }

    /// Remove every card named `name` and pull the page back into range.
    pub fn delete_city(&mut self, name: &str) -> usize {
        let removed = self.cities.remove_by_name(name);
        self.pagination.clamp(self.cities.len());
        info!(%name, removed, "city deleted");
        removed
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggle();
        self.unit
    }

    pub fn next_page(&mut self) {
        self.pagination.next(self.cities.len());
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.cities.len());
    }

    pub fn current_page_entries(&self) -> &[Entry] {
        self.pagination.slice(self.cities.entries())
    }

    pub fn view(&self) -> DashboardView {
        let total = self.cities.len();
        DashboardView {
            loading: self.loading,
            search: self.search.clone(),
            unit: self.unit,
            toggle_label: self.unit.toggle_label(),
            cards: self
                .current_page_entries()
                .iter()
                .map(|entry| CardView::new(entry, self.unit))
                .collect(),
            controls: self.pagination.controls(total),
            current_page: self.pagination.current_page(),
            page_count: self.pagination.page_count(total),
            total,
        }
    }
}
