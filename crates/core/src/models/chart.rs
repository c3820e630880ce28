use serde::{Deserialize, Serialize};

use super::price::PricePoint;

/// Label format for chart points: short weekday, day of month, short month
/// (e.g., "Mon 13 Jan"). Rendered in UTC.
pub const CHART_LABEL_FORMAT: &str = "%a %-d %b";

/// A single labeled point handed to the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Chart-ready series for exactly one selected asset.
///
/// The core computes labels and values; the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Dataset title, e.g. "Bitcoin Price (EUR)"
    pub title: String,

    /// Points in chronological order
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Transform raw price samples into labeled points, preserving order.
    pub fn from_points(asset_name: &str, currency: &str, prices: &[PricePoint]) -> Self {
        let points = prices
            .iter()
            .map(|p| ChartPoint {
                label: p.timestamp.format(CHART_LABEL_FORMAT).to_string(),
                value: p.price,
            })
            .collect();

        Self {
            title: format!("{asset_name} Price ({})", currency.to_uppercase()),
            points,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Time range offered by the detail view's range selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
    ];

    /// Number of days of history this range covers.
    pub fn days(self) -> u32 {
        match self {
            TimeRange::Day => 1,
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeRange::Day => write!(f, "24h"),
            TimeRange::Week => write!(f, "7d"),
            TimeRange::Month => write!(f, "30d"),
            TimeRange::Quarter => write!(f, "90d"),
            TimeRange::Year => write!(f, "1y"),
        }
    }
}
