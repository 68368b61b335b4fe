use std::cell::RefCell;
use std::rc::Rc;

use crate::color::SequentialScale;
use crate::data::aggregate::{YearSummary, aggregate};
use crate::data::filter::rows_for_year;
use crate::data::model::IndicatorDataset;
use crate::selection::{SelectionController, SelectionError};

/// How many countries the ranking view shows.
pub const RANKING_SIZE: usize = 20;

// ---------------------------------------------------------------------------
// View synchronisation flags
// ---------------------------------------------------------------------------

/// Set by the selection observers, consumed by [`AppState::refresh_views`].
#[derive(Debug, Default)]
struct ViewFlags {
    ranking_stale: bool,
    trend_stale: bool,
}

/// One bar of the ranking view. Countries with a missing value for the
/// active indicator are not ranked at all (missing is not zero).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCountry {
    pub country: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<IndicatorDataset>,

    /// Per-year means for every indicator, computed once per load.
    pub summaries: Vec<YearSummary>,

    /// Shared year selection; built alongside the dataset.
    pub selection: Option<SelectionController>,

    /// Flags raised by the selection observers for each dependent view.
    view_flags: Rc<RefCell<ViewFlags>>,

    /// The indicator currently shown.
    pub indicator: Option<String>,

    /// Country substring filter for the ranking view.
    pub country_query: String,

    /// Cached top countries for the selected year (descending by value).
    pub ranking: Vec<RankedCountry>,

    /// Year highlighted in the trend view; follows the selection.
    pub trend_highlight: Option<i32>,

    /// Colour scale over the active indicator's values.
    pub color_scale: Option<SequentialScale>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            summaries: Vec::new(),
            selection: None,
            view_flags: Rc::new(RefCell::new(ViewFlags::default())),
            indicator: None,
            country_query: String::new(),
            ranking: Vec::new(),
            trend_highlight: None,
            color_scale: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: aggregate per year, build the year
    /// selection (defaulting to the latest year), wire the view observers.
    pub fn set_dataset(&mut self, dataset: IndicatorDataset) {
        self.summaries = aggregate(&dataset.observations, &dataset.indicators);
        self.indicator = dataset.indicators.first().cloned();
        self.country_query.clear();

        self.selection = if dataset.years.is_empty() {
            None
        } else {
            let controller = SelectionController::new(dataset.years.clone(), None);

            let ranking_flag = Rc::clone(&self.view_flags);
            controller.subscribe(move |_| ranking_flag.borrow_mut().ranking_stale = true);
            let trend_flag = Rc::clone(&self.view_flags);
            controller.subscribe(move |_| trend_flag.borrow_mut().trend_stale = true);

            Some(controller)
        };

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;

        // First draw: both views need their caches.
        {
            let mut flags = self.view_flags.borrow_mut();
            flags.ranking_stale = true;
            flags.trend_stale = true;
        }
        self.rebuild_color_scale();
        self.refresh_views();
    }

    /// Forward a slider change to the controller. Invalid years leave state
    /// and views untouched; the error becomes a status message.
    pub fn select_year(&mut self, year: i32) {
        let Some(controller) = &self.selection else {
            return;
        };
        match controller.set_year(year) {
            Ok(()) => self.refresh_views(),
            Err(e @ SelectionError::InvalidYear(_)) => {
                log::warn!("rejected year selection: {e}");
                self.status_message = Some(e.to_string());
            }
            Err(e @ SelectionError::ReentrantUpdate) => {
                log::error!("selection bug: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Switch the active indicator and rebuild the dependent views.
    pub fn set_indicator(&mut self, indicator: String) {
        self.indicator = Some(indicator);
        self.rebuild_color_scale();
        self.view_flags.borrow_mut().ranking_stale = true;
        self.refresh_views();
    }

    /// Update the country filter and rebuild the ranking.
    pub fn set_country_query(&mut self, query: String) {
        self.country_query = query;
        self.view_flags.borrow_mut().ranking_stale = true;
        self.refresh_views();
    }

    /// Clear the country filter (the reset control).
    pub fn reset_country_query(&mut self) {
        self.set_country_query(String::new());
    }

    /// Rebuild whatever the observers marked stale.
    fn refresh_views(&mut self) {
        let (ranking_stale, trend_stale) = {
            let mut flags = self.view_flags.borrow_mut();
            let out = (flags.ranking_stale, flags.trend_stale);
            flags.ranking_stale = false;
            flags.trend_stale = false;
            out
        };

        if ranking_stale {
            self.rebuild_ranking();
        }
        if trend_stale {
            self.trend_highlight = self.selection.as_ref().map(|c| c.current_year());
        }
    }

    /// Top countries for the selected year and active indicator, descending.
    fn rebuild_ranking(&mut self) {
        self.ranking.clear();
        let (Some(dataset), Some(controller), Some(indicator)) =
            (&self.dataset, &self.selection, &self.indicator)
        else {
            return;
        };

        let year = controller.current_year();
        let mut ranked: Vec<RankedCountry> = rows_for_year(dataset, year, &self.country_query)
            .into_iter()
            .filter_map(|i| {
                let obs = &dataset.observations[i];
                obs.value(indicator).map(|value| RankedCountry {
                    country: obs.country.clone(),
                    value,
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
        ranked.truncate(RANKING_SIZE);
        self.ranking = ranked;
    }

    /// Scale spans the active indicator across the whole dataset, so bar
    /// colours stay comparable when the year changes.
    fn rebuild_color_scale(&mut self) {
        self.color_scale = match (&self.dataset, &self.indicator) {
            (Some(dataset), Some(indicator)) => SequentialScale::from_values(
                dataset
                    .observations
                    .iter()
                    .filter_map(|obs| obs.value(indicator)),
            ),
            _ => None,
        };
    }
}
