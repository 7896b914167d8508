//! Business-rule corrections for extracted counts

/// The four counts extracted for a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    /// Valid registrations
    pub applied: u64,
    /// Lottery slots available
    pub quota: u64,
    /// Winners
    pub won: u64,
    /// Non-winners
    pub lost: u64,
}

/// Which rule the correction pass applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Quota covers every registration: everyone won
    FullSubscription,

    /// Registrations exceed the quota
    QuotaExhausted {
        /// Whether a degenerate winner count was replaced by the quota
        won_forced: bool,
    },

    /// Neither rule applies; counts kept as extracted
    Unchanged,
}

/// Reconcile extracted counts with the lottery's invariants
///
/// Rules, in order:
/// 1. `applied > 0 && quota >= applied`: `won = applied`, `lost = 0`.
/// 2. `applied > quota && quota > 0`: a `won` of 0 or 1 is a misread and
///    becomes `quota`; then `lost = applied - won` (floored at 0).
/// 3. Otherwise the counts are returned untouched.
pub fn correct(counts: Counts) -> (Counts, Correction) {
    let Counts { applied, quota, won, .. } = counts;

    if applied > 0 && quota >= applied {
        let corrected = Counts { won: applied, lost: 0, ..counts };
        return (corrected, Correction::FullSubscription);
    }

    if applied > quota && quota > 0 {
        let won_forced = won <= 1;
        let won = if won_forced { quota } else { won };
        let corrected = Counts {
            won,
            lost: applied.saturating_sub(won),
            ..counts
        };
        return (corrected, Correction::QuotaExhausted { won_forced });
    }

    (counts, Correction::Unchanged)
}

/// Format the win rate of a period
///
/// Two decimals with a percent sign; exactly `"100%"` at or above 100, and
/// `"0%"` when nobody registered.
pub fn win_rate(won: u64, applied: u64) -> String {
    if applied == 0 {
        return "0%".to_string();
    }

    let rate = won as f64 / applied as f64 * 100.0;
    if rate >= 100.0 {
        "100%".to_string()
    } else {
        format!("{:.2}%", rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counts(applied: u64, quota: u64, won: u64, lost: u64) -> Counts {
        Counts { applied, quota, won, lost }
    }

    #[test]
    fn test_quota_exhausted_degenerate_won() {
        let (fixed, rule) = correct(counts(500, 100, 1, 0));
        assert_eq!(fixed, counts(500, 100, 100, 400));
        assert_eq!(rule, Correction::QuotaExhausted { won_forced: true });

        let (fixed, _) = correct(counts(500, 100, 0, 0));
        assert_eq!(fixed.won, 100);
        assert_eq!(fixed.lost, 400);
    }

    #[test]
    fn test_quota_exhausted_plausible_won_kept() {
        let (fixed, rule) = correct(counts(500, 100, 98, 0));
        assert_eq!(fixed, counts(500, 100, 98, 402));
        assert_eq!(rule, Correction::QuotaExhausted { won_forced: false });
    }

    #[test]
    fn test_quota_exhausted_won_above_applied_floors_lost() {
        let (fixed, _) = correct(counts(500, 100, 600, 0));
        assert_eq!(fixed.won, 600);
        assert_eq!(fixed.lost, 0);
    }

    #[test]
    fn test_full_subscription() {
        let (fixed, rule) = correct(counts(80, 100, 3, 77));
        assert_eq!(fixed, counts(80, 100, 80, 0));
        assert_eq!(rule, Correction::FullSubscription);

        let (fixed, _) = correct(counts(100, 100, 0, 100));
        assert_eq!(fixed, counts(100, 100, 100, 0));
    }

    #[test]
    fn test_unchanged_without_applied_or_quota() {
        let raw = counts(0, 100, 5, 5);
        assert_eq!(correct(raw), (raw, Correction::Unchanged));

        let raw = counts(500, 0, 7, 9);
        assert_eq!(correct(raw), (raw, Correction::Unchanged));
    }

    #[test]
    fn test_win_rate_boundaries() {
        assert_eq!(win_rate(100, 100), "100%");
        assert_eq!(win_rate(37, 200), "18.50%");
        assert_eq!(win_rate(0, 0), "0%");
        assert_eq!(win_rate(5, 0), "0%");
        assert_eq!(win_rate(0, 10), "0.00%");
        assert_eq!(win_rate(1, 3), "33.33%");
    }

    #[test]
    fn test_win_rate_caps_inconsistent_input() {
        assert_eq!(win_rate(600, 500), "100%");
    }

    proptest! {
        #[test]
        fn prop_full_subscription_has_no_losers(
            applied in 1u64..1_000_000,
            extra in 0u64..1_000_000,
            won in any::<u64>(),
            lost in any::<u64>(),
        ) {
            let (fixed, rule) = correct(counts(applied, applied + extra, won, lost));
            prop_assert_eq!(rule, Correction::FullSubscription);
            prop_assert_eq!(fixed.won, applied);
            prop_assert_eq!(fixed.lost, 0);
        }

        #[test]
        fn prop_quota_exhausted_balances(
            quota in 1u64..100_000,
            extra in 1u64..100_000,
            won in 0u64..100_000,
        ) {
            let applied = quota + extra;
            let (fixed, _) = correct(counts(applied, quota, won, 0));
            if fixed.won <= applied {
                prop_assert_eq!(fixed.won + fixed.lost, applied);
            }
            prop_assert!(fixed.won >= 2 || fixed.won == quota);
        }
    }
}
