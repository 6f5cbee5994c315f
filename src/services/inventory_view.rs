//! Estado de la vista de inventario
//!
//! `InventoryView` guarda los vehículos cargados y los criterios del usuario,
//! y memoriza la lista derivada hasta que cambien los datos o un criterio.
//! `InventoryPage` añade la carga remota, el estado de error con reintento
//! manual y el debounce del texto de búsqueda.

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::client::CatalogClient;
use crate::models::vehicle::Vehicle;
use crate::services::inventory_filter::{available_makes, filter_vehicles, FilterCriteria, SortOption};
use crate::utils::debounce::Debouncer;

/// Retardo del buscador del inventario
pub const SEARCH_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Vista derivada del inventario
#[derive(Debug, Default)]
pub struct InventoryView {
    vehicles: Vec<Vehicle>,
    makes: Vec<String>,
    criteria: FilterCriteria,
    revision: u64,
    memo: Option<(u64, Vec<Vehicle>)>,
}

impl InventoryView {
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Reemplazar los datos; los rangos se ajustan a los nuevos min/max
    pub fn load(&mut self, vehicles: Vec<Vehicle>) {
        self.criteria.fit_ranges_to(&vehicles);
        self.makes = available_makes(&vehicles);
        self.vehicles = vehicles;
        self.touch();
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Marcas disponibles (distintas y ordenadas)
    pub fn makes(&self) -> &[String] {
        &self.makes
    }

    pub fn set_search(&mut self, search: &str) {
        if self.criteria.search != search {
            self.criteria.search = search.to_string();
            self.touch();
        }
    }

    pub fn set_price_range(&mut self, range: RangeInclusive<f64>) {
        if self.criteria.price_range != range {
            self.criteria.price_range = range;
            self.touch();
        }
    }

    pub fn set_year_range(&mut self, range: RangeInclusive<i32>) {
        if self.criteria.year_range != range {
            self.criteria.year_range = range;
            self.touch();
        }
    }

    /// Marcar o desmarcar una marca
    pub fn toggle_make(&mut self, make: &str) {
        if !self.criteria.makes.remove(make) {
            self.criteria.makes.insert(make.to_string());
        }
        self.touch();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        if self.criteria.sort != sort {
            log::info!("🔀 Sorted by: {}", sort.label());
            self.criteria.sort = sort;
            self.touch();
        }
    }

    /// Volver a los criterios iniciales con rangos de los datos actuales
    pub fn reset(&mut self) {
        let mut criteria = FilterCriteria {
            price_range: self.criteria.price_range.clone(),
            year_range: self.criteria.year_range.clone(),
            ..FilterCriteria::default()
        };
        criteria.fit_ranges_to(&self.vehicles);
        self.criteria = criteria;
        self.touch();
        log::info!("🧹 Filters reset successfully");
    }

    /// Lista visible; se recalcula solo si algo cambió
    pub fn visible(&mut self) -> &[Vehicle] {
        let stale = !matches!(&self.memo, Some((rev, _)) if *rev == self.revision);
        if stale {
            let results = filter_vehicles(&self.vehicles, &self.criteria);
            self.memo = Some((self.revision, results));
        }

        match &self.memo {
            Some((_, results)) => results,
            None => &[],
        }
    }
}

/// Estado de carga de la página
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Página de inventario: datos remotos + vista + buscador con debounce
pub struct InventoryPage {
    client: CatalogClient,
    view: InventoryView,
    search: Debouncer<String>,
    search_input: String,
    state: LoadState,
}

impl InventoryPage {
    pub fn new(client: CatalogClient) -> Self {
        Self::with_search_delay(client, SEARCH_DEBOUNCE_DELAY)
    }

    pub fn with_search_delay(client: CatalogClient, delay: Duration) -> Self {
        Self {
            client,
            view: InventoryView::new(),
            search: Debouncer::new(String::new(), delay),
            search_input: String::new(),
            state: LoadState::Loading,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Mensaje de error visible, si la última carga falló
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Cargar vehículos (montaje de la página)
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;

        match self.client.try_fetch_vehicles().await {
            Ok(vehicles) => {
                log::info!("✅ Inventario cargado: {} vehículos", vehicles.len());
                self.view.load(vehicles);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                log::error!("❌ Error loading vehicles: {}", e);
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Reintento manual tras un error
    pub async fn retry(&mut self) {
        self.load().await;
    }

    /// Texto tecleado; se aplica a la vista tras el debounce
    pub fn type_search(&mut self, text: &str) {
        self.search_input = text.to_string();
        self.search.push(self.search_input.clone());
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn view_mut(&mut self) -> &mut InventoryView {
        &mut self.view
    }

    pub fn makes(&self) -> &[String] {
        self.view.makes()
    }

    /// Restablecer filtros, incluido el buscador
    pub fn reset_filters(&mut self) {
        self.search_input.clear();
        self.search.set_now(String::new());
        self.view.reset();
    }

    /// Lista visible con el último texto de búsqueda publicado
    pub fn visible(&mut self) -> &[Vehicle] {
        let debounced = self.search.current();
        self.view.set_search(&debounced);
        self.view.visible()
    }
}
