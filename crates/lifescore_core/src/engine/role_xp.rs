//! Role experience accumulation.
//!
//! XP is the plain sum of raw `status` over every item tagged with the role,
//! across all dimensions and all routine buckets. It is not capped or averaged.

use crate::model::dimension::DimensionData;
use crate::model::snapshot::DimensionName;
use std::collections::BTreeMap;

/// XP needed to advance one level.
pub const XP_PER_LEVEL: u64 = 100;

/// Sums raw status of items whose `role_key` equals `role_key`.
///
/// Returns 0 when `dimensions` is missing.
pub fn role_xp(role_key: &str, dimensions: Option<&BTreeMap<DimensionName, DimensionData>>) -> u64 {
    let Some(dimensions) = dimensions else {
        return 0;
    };

    dimensions
        .values()
        .map(|data| {
            let trackable: u64 = data
                .trackables()
                .filter(|(_, item)| item.has_role(role_key))
                .map(|(_, item)| u64::from(item.status))
                .sum();
            let routines: u64 = data
                .routines
                .iter()
                .filter(|(_, routine)| routine.has_role(role_key))
                .map(|(_, routine)| u64::from(routine.status))
                .sum();
            trackable + routines
        })
        .sum()
}

/// Display level derived from XP: `floor(xp / 100) + 1`.
pub fn role_level(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}
