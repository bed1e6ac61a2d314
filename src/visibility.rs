//! Visibility and entitlement filter.
//!
//! Entitlement is two-tier: premium components are withheld from `basic`
//! organizations and available to every higher tier alike.

use crate::models::{PlacedInstance, SubscriptionTier};

/// Why an instance is withheld. `None` from [`skip_reason`] means render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    Hidden,
    PremiumRequired,
}

#[must_use]
pub fn skip_reason(placed: &PlacedInstance, tier: SubscriptionTier) -> Option<SkipReason> {
    if !placed.instance.is_enabled {
        return Some(SkipReason::Disabled);
    }
    if !placed.instance.is_visible {
        return Some(SkipReason::Hidden);
    }
    if placed.definition.is_premium && tier == SubscriptionTier::Basic {
        return Some(SkipReason::PremiumRequired);
    }
    None
}

/// Pure per-instance predicate.
#[must_use]
pub fn should_render(placed: &PlacedInstance, tier: SubscriptionTier) -> bool {
    skip_reason(placed, tier).is_none()
}

#[cfg(test)]
#[path = "visibility_test.rs"]
mod tests;
