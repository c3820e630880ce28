// ═══════════════════════════════════════════════════════════════════
// Model Tests: Asset, quotes, chart series, time ranges, notices,
// settings
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};

use crypto_watchlist_core::errors::CoreError;
use crypto_watchlist_core::models::asset::Asset;
use crypto_watchlist_core::models::chart::{ChartSeries, TimeRange};
use crypto_watchlist_core::models::notice::Notice;
use crypto_watchlist_core::models::price::{PricePoint, PriceQuote};
use crypto_watchlist_core::models::settings::{Settings, DEFAULT_API_BASE_URL, DEFAULT_STORAGE_KEY};

/// 2025-01-13T00:00:00Z, a Monday.
const MON_13_JAN_2025_MS: i64 = 1_736_726_400_000;
const DAY_MS: i64 = 86_400_000;

// ═══════════════════════════════════════════════════════════════════
// Asset
// ═══════════════════════════════════════════════════════════════════

mod asset {
    use super::*;

    #[test]
    fn new_uppercases_symbol() {
        let a = Asset::new("bitcoin", "Bitcoin", "btc");
        assert_eq!(a.id, "bitcoin");
        assert_eq!(a.name, "Bitcoin");
        assert_eq!(a.symbol, "BTC");
    }

    #[test]
    fn new_has_no_quote() {
        let a = Asset::new("ethereum", "Ethereum", "eth");
        assert_eq!(a.price, None);
        assert_eq!(a.change, None);
    }

    #[test]
    fn with_quote_sets_price_and_change() {
        let a = Asset::new("bitcoin", "Bitcoin", "btc")
            .with_quote(&PriceQuote::new(50_000.0, Some(2.5)));
        assert_eq!(a.price, Some(50_000.0));
        assert_eq!(a.change, Some(2.5));
    }

    #[test]
    fn apply_quote_overwrites_change_with_none() {
        let mut a = Asset::new("bitcoin", "Bitcoin", "btc")
            .with_quote(&PriceQuote::new(50_000.0, Some(2.5)));
        a.apply_quote(&PriceQuote::new(51_000.0, None));
        assert_eq!(a.price, Some(51_000.0));
        assert_eq!(a.change, None);
    }

    #[test]
    fn is_rising() {
        let mut a = Asset::new("x", "X", "x");
        assert!(a.is_rising());
        a.change = Some(0.0);
        assert!(a.is_rising());
        a.change = Some(-0.01);
        assert!(!a.is_rising());
    }

    #[test]
    fn display_formatting() {
        let a = Asset::new("bitcoin", "Bitcoin", "btc")
            .with_quote(&PriceQuote::new(50_000.456, Some(-1.234)));
        assert_eq!(a.display_price(), "50000.46");
        assert_eq!(a.display_change(), "-1.23%");

        let empty = Asset::new("x", "X", "x");
        assert_eq!(empty.display_price(), "-");
        assert_eq!(empty.display_change(), "-");
    }

    #[test]
    fn json_shape() {
        let a = Asset::new("bitcoin", "Bitcoin", "btc")
            .with_quote(&PriceQuote::new(50_000.0, Some(2.5)));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "bitcoin",
                "name": "Bitcoin",
                "symbol": "BTC",
                "price": 50000.0,
                "change": 2.5
            })
        );
    }

    #[test]
    fn deserialize_without_quote_fields() {
        let a: Asset =
            serde_json::from_str(r#"{"id":"eth","name":"Ethereum","symbol":"ETH"}"#).unwrap();
        assert_eq!(a.price, None);
        assert_eq!(a.change, None);
    }

    #[test]
    fn deserialize_null_quote_fields() {
        let a: Asset = serde_json::from_str(
            r#"{"id":"eth","name":"Ethereum","symbol":"ETH","price":null,"change":null}"#,
        )
        .unwrap();
        assert_eq!(a.price, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// PricePoint
// ═══════════════════════════════════════════════════════════════════

mod price_point {
    use super::*;

    #[test]
    fn from_millis() {
        let p = PricePoint::from_millis(MON_13_JAN_2025_MS, 42.0).unwrap();
        assert_eq!(p.timestamp, Utc.with_ymd_and_hms(2025, 1, 13, 0, 0, 0).unwrap());
        assert_eq!(p.price, 42.0);
    }

    #[test]
    fn from_millis_out_of_range() {
        assert!(PricePoint::from_millis(i64::MAX, 1.0).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartSeries
// ═══════════════════════════════════════════════════════════════════

mod chart_series {
    use super::*;

    fn points() -> Vec<PricePoint> {
        (0..3)
            .map(|i| PricePoint::from_millis(MON_13_JAN_2025_MS + i * DAY_MS, 100.0 + i as f64).unwrap())
            .collect()
    }

    #[test]
    fn labels_and_values_in_order() {
        let series = ChartSeries::from_points("Bitcoin", "eur", &points());
        assert_eq!(series.labels(), vec!["Mon 13 Jan", "Tue 14 Jan", "Wed 15 Jan"]);
        assert_eq!(series.values(), vec![100.0, 101.0, 102.0]);
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }

    #[test]
    fn title_uses_uppercase_currency() {
        let series = ChartSeries::from_points("Bitcoin", "eur", &points());
        assert_eq!(series.title, "Bitcoin Price (EUR)");
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let series = ChartSeries::from_points("Bitcoin", "eur", &[]);
        assert!(series.is_empty());
    }

    #[test]
    fn single_digit_day_has_no_padding() {
        let p = PricePoint::from_millis(
            Utc.with_ymd_and_hms(2025, 3, 2, 12, 0, 0).unwrap().timestamp_millis(),
            1.0,
        )
        .unwrap();
        let series = ChartSeries::from_points("X", "usd", &[p]);
        assert_eq!(series.labels(), vec!["Sun 2 Mar"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// TimeRange
// ═══════════════════════════════════════════════════════════════════

mod time_range {
    use super::*;

    #[test]
    fn days() {
        let days: Vec<u32> = TimeRange::ALL.iter().map(|r| r.days()).collect();
        assert_eq!(days, vec![1, 7, 30, 90, 365]);
    }

    #[test]
    fn default_is_24h() {
        assert_eq!(TimeRange::default(), TimeRange::Day);
    }

    #[test]
    fn display_and_serde_agree() {
        for range in TimeRange::ALL {
            let json = serde_json::to_string(&range).unwrap();
            assert_eq!(json, format!("\"{range}\""));
            let back: TimeRange = serde_json::from_str(&json).unwrap();
            assert_eq!(back, range);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Notice
// ═══════════════════════════════════════════════════════════════════

mod notice {
    use super::*;

    #[test]
    fn messages() {
        assert!(Notice::AlreadyPinned { id: "bitcoin".into() }
            .message()
            .contains("already been added"));
        assert!(Notice::NotFound { query: "zz".into() }.message().contains("not found"));
        assert!(Notice::SearchFailed.message().contains("searching"));
        assert!(Notice::ChartUnavailable { id: "bitcoin".into() }
            .message()
            .contains("chart"));
    }

    #[test]
    fn display_matches_message() {
        let n = Notice::SearchFailed;
        assert_eq!(n.to_string(), n.message());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.currency, "eur");
        assert_eq!(s.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(s.refresh_interval_secs, 60);
        assert_eq!(s.chart_days, 7);
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(s.storage_key, "pinnedCryptos");
        assert!(!s.resolve_aliases);
        assert!(!s.chart_follows_range);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let s = Settings::from_json(r#"{"currency":" USD ","refresh_interval_secs":30}"#).unwrap();
        assert_eq!(s.currency, "usd");
        assert_eq!(s.refresh_interval_secs, 30);
        assert_eq!(s.chart_days, 7);
        assert_eq!(s.refresh_interval(), std::time::Duration::from_secs(30));
    }

    #[test]
    fn from_json_empty_object() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(matches!(
            Settings::from_json("not json"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn validate_rejects_bad_currency() {
        for bad in ["eu", "euro", "e1r", ""] {
            let s = Settings {
                currency: bad.into(),
                ..Settings::default()
            };
            assert!(matches!(s.validate(), Err(CoreError::Validation(_))), "{bad}");
        }
    }

    #[test]
    fn validate_rejects_zero_interval_and_days() {
        let s = Settings {
            refresh_interval_secs: 0,
            ..Settings::default()
        };
        assert!(s.validate().is_err());

        let s = Settings {
            chart_days: 0,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_http_timeout() {
        let s = Settings {
            http_timeout_secs: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::Validation(_))));
        assert!(matches!(
            Settings::from_json(r#"{"http_timeout_secs":0}"#),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_blank_storage_key() {
        let s = Settings {
            storage_key: "  ".into(),
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }
}
