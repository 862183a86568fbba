use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

#[derive(Debug, Default)]
pub struct Metrics {
    pub menu_lookups: AtomicU64,
    pub menu_misses: AtomicU64,
    pub totals_computed: AtomicU64,
    pub totals_rejected: AtomicU64,
    pub recipes_accepted: AtomicU64,
    pub field_rejections: AtomicU64,
    pub business_rule_rejections: AtomicU64,
    pub malformed_payloads: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {

        Self::default()

    }

    pub fn record_menu_lookup(&self, found: bool) {

        self.menu_lookups.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.menu_misses.fetch_add(1, Ordering::Relaxed);
        }

    }

    pub fn record_total(&self, computed: bool) {

        if computed {
            self.totals_computed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.totals_rejected.fetch_add(1, Ordering::Relaxed);
        }

    }

    pub fn record_recipe_accepted(&self) {

        self.recipes_accepted.fetch_add(1, Ordering::Relaxed);

    }

    pub fn record_field_rejection(&self) {

        self.field_rejections.fetch_add(1, Ordering::Relaxed);

    }

    pub fn record_business_rule_rejection(&self) {

        self.business_rule_rejections.fetch_add(1, Ordering::Relaxed);

    }

    pub fn record_malformed_payload(&self) {

        self.malformed_payloads.fetch_add(1, Ordering::Relaxed);

    }

    pub fn snapshot(&self) -> MetricsSnapshot {

        MetricsSnapshot {
            menu_lookups: self.menu_lookups.load(Ordering::Relaxed),
            menu_misses: self.menu_misses.load(Ordering::Relaxed),
            totals_computed: self.totals_computed.load(Ordering::Relaxed),
            totals_rejected: self.totals_rejected.load(Ordering::Relaxed),
            recipes_accepted: self.recipes_accepted.load(Ordering::Relaxed),
            field_rejections: self.field_rejections.load(Ordering::Relaxed),
            business_rule_rejections: self.business_rule_rejections.load(Ordering::Relaxed),
            malformed_payloads: self.malformed_payloads.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub menu_lookups: u64,
    pub menu_misses: u64,
    pub totals_computed: u64,
    pub totals_rejected: u64,
    pub recipes_accepted: u64,
    pub field_rejections: u64,
    pub business_rule_rejections: u64,
    pub malformed_payloads: u64,
}

impl MetricsSnapshot {
    pub fn recipes_submitted(&self) -> u64 {

        self.recipes_accepted
            + self.field_rejections
            + self.business_rule_rejections
            + self.malformed_payloads

    }

    pub fn menu_hit_rate(&self) -> f64 {

        if self.menu_lookups == 0 {
            return 0.0;
        }
        // the two counters are loaded separately, a racing miss can get ahead
        let hits = self.menu_lookups.saturating_sub(self.menu_misses);
        (hits as f64 / self.menu_lookups as f64) * 100.0

    }

    pub fn recipe_acceptance_rate(&self) -> f64 {

        let submitted = self.recipes_submitted();
        if submitted == 0 {
            return 0.0;
        }
        (self.recipes_accepted as f64 / submitted as f64) * 100.0

    }
}

/// Body served by `/metrics`: raw counters plus derived rates.
#[derive(Debug, Serialize)]
pub struct MetricsReport {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    pub recipes_submitted: u64,
    pub menu_hit_rate: f64,
    pub recipe_acceptance_rate: f64,
}

impl From<MetricsSnapshot> for MetricsReport {
    fn from(counters: MetricsSnapshot) -> Self {

        MetricsReport {
            recipes_submitted: counters.recipes_submitted(),
            menu_hit_rate: counters.menu_hit_rate(),
            recipe_acceptance_rate: counters.recipe_acceptance_rate(),
            counters,
        }

    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_empty_rates_are_zero() {

        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot.menu_hit_rate(), 0.0);
        assert_eq!(snapshot.recipe_acceptance_rate(), 0.0);

    }

    #[test]
    fn test_counters_and_rates() {

        let metrics = Metrics::new();
        metrics.record_menu_lookup(true);
        metrics.record_menu_lookup(true);
        metrics.record_menu_lookup(true);
        metrics.record_menu_lookup(false);
        metrics.record_recipe_accepted();
        metrics.record_field_rejection();
        metrics.record_business_rule_rejection();
        metrics.record_malformed_payload();
        metrics.record_total(true);
        metrics.record_total(false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.menu_lookups, 4);
        assert_eq!(snapshot.menu_misses, 1);
        assert_eq!(snapshot.menu_hit_rate(), 75.0);
        assert_eq!(snapshot.recipes_submitted(), 4);
        assert_eq!(snapshot.recipe_acceptance_rate(), 25.0);
        assert_eq!(snapshot.totals_computed, 1);
        assert_eq!(snapshot.totals_rejected, 1);

    }

    #[test]
    fn test_skewed_snapshot_does_not_underflow() {

        let snapshot = MetricsSnapshot {
            menu_lookups: 2,
            menu_misses: 3,
            totals_computed: 0,
            totals_rejected: 0,
            recipes_accepted: 0,
            field_rejections: 0,
            business_rule_rejections: 0,
            malformed_payloads: 0,
        };

        assert_eq!(snapshot.menu_hit_rate(), 0.0);

    }

    #[test]
    fn test_report_flattens_counters() {

        let metrics = Metrics::new();
        metrics.record_recipe_accepted();

        let value = serde_json::to_value(MetricsReport::from(metrics.snapshot())).unwrap();
        assert_eq!(value["recipes_accepted"], 1);
        assert_eq!(value["recipes_submitted"], 1);
        assert_eq!(value["recipe_acceptance_rate"], 100.0);

    }

}
