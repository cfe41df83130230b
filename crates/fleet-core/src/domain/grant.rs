//! Customer-to-customer access grants

use chrono::{DateTime, Utc};
use fleet_shared::CustomerId;
use serde::{Deserialize, Serialize};

/// Directed, time-bounded permission edge: `cust_id`'s principals may view
/// `related_customer_id`'s data. Direction matters; (A -> B) never implies
/// (B -> A).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerGrant {
    pub cust_id: CustomerId,
    pub related_customer_id: CustomerId,
    pub active: bool,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl CustomerGrant {
    /// A grant confers access only while active and inside its validity
    /// window.
    pub fn is_effective(&self, at: DateTime<Utc>) -> bool {
        self.active && self.valid_from <= at && at <= self.valid_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn grant(active: bool, from: i64, until: i64) -> CustomerGrant {
        CustomerGrant {
            cust_id: CustomerId(1),
            related_customer_id: CustomerId(2),
            active,
            valid_from: Utc.timestamp_opt(from, 0).unwrap(),
            valid_until: Utc.timestamp_opt(until, 0).unwrap(),
        }
    }

    #[test]
    fn effective_only_inside_window() {
        let at = Utc.timestamp_opt(1_000, 0).unwrap();
        assert!(grant(true, 500, 1_500).is_effective(at));
        assert!(!grant(true, 1_100, 1_500).is_effective(at));
        assert!(!grant(true, 500, 900).is_effective(at));
    }

    #[test]
    fn inactive_grant_never_effective() {
        let at = Utc.timestamp_opt(1_000, 0).unwrap();
        assert!(!grant(false, 500, 1_500).is_effective(at));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        assert!(grant(true, 1_000, 2_000).is_effective(Utc.timestamp_opt(1_000, 0).unwrap()));
        assert!(grant(true, 1_000, 2_000).is_effective(Utc.timestamp_opt(2_000, 0).unwrap()));
    }
}
