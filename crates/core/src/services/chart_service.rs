use crate::errors::CoreError;
use crate::models::asset::Asset;
use crate::models::chart::{ChartSeries, TimeRange};
use crate::models::price::PricePoint;
use crate::models::settings::Settings;
use crate::providers::traits::MarketDataProvider;

/// Detail overlay state for the selected asset.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    /// Modal open, history request in flight.
    Loading { asset: Asset },
    /// Modal open with a chart.
    Ready { asset: Asset, series: ChartSeries },
    /// Modal open, placeholder shown, no chart.
    Failed { asset: Asset },
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DetailState::Closed)
    }

    pub fn asset(&self) -> Option<&Asset> {
        match self {
            DetailState::Closed => None,
            DetailState::Loading { asset }
            | DetailState::Ready { asset, .. }
            | DetailState::Failed { asset } => Some(asset),
        }
    }

    pub fn series(&self) -> Option<&ChartSeries> {
        match self {
            DetailState::Ready { series, .. } => Some(series),
            _ => None,
        }
    }
}

/// Identifies one history load. Results carrying an outdated ticket are
/// dropped, so a slow response never replaces a newer selection's chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTicket {
    generation: u64,
    pub id: String,
    pub days: u32,
}

impl ChartTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What applying a load result did to the view.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Ready,
    Failed,
    /// The ticket was superseded or the modal was closed; nothing changed.
    Stale,
}

/// `Closed → Loading → Ready | Failed` state machine for the detail view.
#[derive(Debug, Clone)]
pub struct DetailView {
    state: DetailState,
    time_range: TimeRange,
    generation: u64,
    chart_days: u32,
    follows_range: bool,
}

impl DetailView {
    pub fn new(chart_days: u32, follows_range: bool) -> Self {
        Self {
            state: DetailState::Closed,
            time_range: TimeRange::default(),
            generation: 0,
            chart_days,
            follows_range,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.chart_days, settings.chart_follows_range)
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Days of history the next load requests.
    ///
    /// Unless `follows_range` is set this is the fixed window, whatever
    /// range is selected.
    pub fn window_days(&self) -> u32 {
        if self.follows_range {
            self.time_range.days()
        } else {
            self.chart_days
        }
    }

    /// Open the modal for `asset` and start loading its history.
    pub fn select(&mut self, asset: Asset) -> ChartTicket {
        self.generation += 1;
        let ticket = ChartTicket {
            generation: self.generation,
            id: asset.id.clone(),
            days: self.window_days(),
        };
        self.state = DetailState::Loading { asset };
        ticket
    }

    /// Change the range selector. With an asset open this re-enters
    /// `Loading` and returns the ticket for the re-fetch.
    pub fn set_time_range(&mut self, range: TimeRange) -> Option<ChartTicket> {
        self.time_range = range;
        let asset = self.state.asset()?.clone();
        Some(self.select(asset))
    }

    /// Apply the result of the load identified by `ticket`.
    ///
    /// An empty series counts as a failure.
    pub fn complete(
        &mut self,
        ticket: &ChartTicket,
        result: Result<Vec<PricePoint>, CoreError>,
        currency: &str,
    ) -> ChartOutcome {
        if ticket.generation != self.generation {
            return ChartOutcome::Stale;
        }
        let asset = match &self.state {
            DetailState::Loading { asset } => asset.clone(),
            _ => return ChartOutcome::Stale,
        };

        match result {
            Ok(points) if !points.is_empty() => {
                let series = ChartSeries::from_points(&asset.name, currency, &points);
                self.state = DetailState::Ready { asset, series };
                ChartOutcome::Ready
            }
            Ok(_) => {
                tracing::warn!(id = %asset.id, "No price history available");
                self.state = DetailState::Failed { asset };
                ChartOutcome::Failed
            }
            Err(e) => {
                tracing::warn!(id = %asset.id, error = %e, "Failed to load price history");
                self.state = DetailState::Failed { asset };
                ChartOutcome::Failed
            }
        }
    }

    /// Close the modal and discard any chart.
    pub fn close(&mut self) {
        // Bump so in-flight loads for the closed selection are dropped.
        self.generation += 1;
        self.state = DetailState::Closed;
    }
}

impl Default for DetailView {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Fetches price history for detail-view tickets.
pub struct ChartService;

impl ChartService {
    /// Load the history a ticket asks for.
    pub async fn fetch(
        provider: &dyn MarketDataProvider,
        ticket: &ChartTicket,
        currency: &str,
    ) -> Result<Vec<PricePoint>, CoreError> {
        provider.market_chart(&ticket.id, currency, ticket.days).await
    }
}
