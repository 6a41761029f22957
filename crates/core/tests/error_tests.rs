// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, ErrorKind
// ═══════════════════════════════════════════════════════════════════

use portfolio_core::errors::{CoreError, ErrorKind};

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Symbol must not be empty".into());
        assert_eq!(err.to_string(), "Validation failed: Symbol must not be empty");
    }

    #[test]
    fn stock_not_found() {
        let err = CoreError::StockNotFound("ZZZZ".into());
        assert_eq!(err.to_string(), "Stock not found: ZZZZ");
    }

    #[test]
    fn not_member() {
        let err = CoreError::NotMember {
            symbol: "AAPL".into(),
        };
        assert_eq!(err.to_string(), "AAPL is not in the portfolio");
    }

    #[test]
    fn already_member() {
        let err = CoreError::AlreadyMember {
            symbol: "AAPL".into(),
        };
        assert_eq!(err.to_string(), "AAPL is already in the portfolio");
    }

    #[test]
    fn provider_unavailable() {
        let err = CoreError::ProviderUnavailable {
            provider: "Financial Modeling Prep".into(),
            message: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Quote provider unavailable (Financial Modeling Prep): connection refused"
        );
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage("write failed".into());
        assert_eq!(err.to_string(), "Storage error: write failed");
    }

    #[test]
    fn invariant_violation() {
        let err = CoreError::InvariantViolation("two entries for (alice, AAPL)".into());
        assert_eq!(
            err.to_string(),
            "Membership invariant violated: two entries for (alice, AAPL)"
        );
    }
}

// ── ErrorKind classification ────────────────────────────────────────

mod kind {
    use super::*;

    #[test]
    fn validation_maps_to_validation() {
        let err = CoreError::ValidationError("bad".into());
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn negative_lookups_map_to_not_found() {
        assert_eq!(
            CoreError::StockNotFound("ZZZZ".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::NotMember {
                symbol: "AAPL".into()
            }
            .kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn already_member_maps_to_conflict() {
        let err = CoreError::AlreadyMember {
            symbol: "AAPL".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn provider_failures_map_to_dependency_unavailable() {
        let err = CoreError::ProviderUnavailable {
            provider: "FMP".into(),
            message: "timeout".into(),
        };
        assert_eq!(err.kind(), ErrorKind::DependencyUnavailable);
    }

    #[test]
    fn storage_and_invariant_are_distinct_kinds() {
        assert_eq!(CoreError::Storage("io".into()).kind(), ErrorKind::Storage);
        assert_eq!(
            CoreError::InvariantViolation("dupes".into()).kind(),
            ErrorKind::Invariant
        );
    }
}
