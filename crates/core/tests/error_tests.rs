// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use crypto_watchlist_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn storage() {
        let err = CoreError::Storage("disk full".into());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad float".into());
        assert_eq!(err.to_string(), "Serialization error: bad float");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("expected array".into());
        assert_eq!(err.to_string(), "Deserialization error: expected array");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn http_status() {
        let err = CoreError::HttpStatus {
            provider: "CoinGecko".into(),
            status: 429,
        };
        assert_eq!(err.to_string(), "API error (CoinGecko): HTTP status 429");
    }

    #[test]
    fn malformed_response() {
        let err = CoreError::MalformedResponse {
            provider: "CoinGecko".into(),
            message: "missing prices".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed response (CoinGecko): missing prices"
        );
    }

    #[test]
    fn malformed_helper_matches_variant() {
        let err = CoreError::malformed("Mock", "empty body");
        match err {
            CoreError::MalformedResponse { provider, message } => {
                assert_eq!(provider, "Mock");
                assert_eq!(message, "empty body");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn already_pinned() {
        let err = CoreError::AlreadyPinned("bitcoin".into());
        assert_eq!(err.to_string(), "Asset already pinned: bitcoin");
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound("zzzz".into());
        assert_eq!(err.to_string(), "Asset not found: zzzz");
    }

    #[test]
    fn validation() {
        let err = CoreError::Validation("index out of range".into());
        assert_eq!(err.to_string(), "Validation failed: index out of range");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CoreError = io.into();
        match err {
            CoreError::Storage(msg) => assert!(msg.contains("read-only")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_io_error() {
        fn read_missing() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here/watchlist.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::Storage(_))));
    }

    #[test]
    fn errors_are_debug() {
        let err = CoreError::AlreadyPinned("eth".into());
        let debug = format!("{err:?}");
        assert!(debug.contains("AlreadyPinned"));
        assert!(debug.contains("eth"));
    }
}
