//! Per-item score contributions.
//!
//! # Invariants
//! - Goals, challenges and routines always count toward the denominator.
//! - Projects only add to the sum (when `status > 0`) and never count.
//! - Routines contribute adherence, not their cached `status`.

use crate::engine::adherence::adherence;
use crate::model::item::{Frequency, RecurringItem, TrackableItem, TrackableKind};
use crate::model::snapshot::ScoringWindow;
use serde::Serialize;

/// Running `(items counted, score sum)` pair used for averaging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTally {
    pub items_counted: u64,
    pub score_sum: u64,
}

impl ScoreTally {
    /// Adds one contribution.
    pub fn add(&mut self, contribution: Contribution) {
        if contribution.counted {
            self.items_counted += 1;
        }
        self.score_sum += u64::from(contribution.score);
    }

    pub fn merge(mut self, other: ScoreTally) -> ScoreTally {
        self.items_counted += other.items_counted;
        self.score_sum += other.score_sum;
        self
    }

    /// Averaged score with a floor-1 divisor, clamped to 100.
    pub fn score(&self) -> u8 {
        crate::engine::average_score(self.score_sum, self.items_counted)
    }
}

/// Score of one item plus whether it enters the denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub score: u8,
    pub counted: bool,
}

impl Contribution {
    const NONE: Contribution = Contribution {
        score: 0,
        counted: false,
    };
}

/// Typed list of items from one dimension bucket.
#[derive(Debug, Clone, Copy)]
pub enum ItemSource<'a> {
    Trackable(TrackableKind, &'a [TrackableItem]),
    Routines(Frequency, &'a [RecurringItem]),
}

/// Contribution of one goal, challenge or project.
pub fn trackable_contribution(kind: TrackableKind, item: &TrackableItem) -> Contribution {
    match kind {
        TrackableKind::Goal | TrackableKind::Challenge => Contribution {
            score: item.status,
            counted: true,
        },
        TrackableKind::Project if item.status > 0 => Contribution {
            score: item.status,
            counted: false,
        },
        TrackableKind::Project => Contribution::NONE,
    }
}

/// Contribution of one routine scored in the `frequency` bucket.
pub fn routine_contribution(
    routine: &RecurringItem,
    frequency: Frequency,
    window: &ScoringWindow,
) -> Contribution {
    Contribution {
        score: adherence(Some(routine), window, frequency),
        counted: true,
    }
}

/// Folds a typed item list into a tally.
pub fn resolve(source: ItemSource<'_>, window: &ScoringWindow) -> ScoreTally {
    let mut tally = ScoreTally::default();
    match source {
        ItemSource::Trackable(kind, items) => {
            for item in items {
                tally.add(trackable_contribution(kind, item));
            }
        }
        ItemSource::Routines(frequency, routines) => {
            for routine in routines {
                tally.add(routine_contribution(routine, frequency, window));
            }
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::{resolve, ItemSource, ScoreTally};
    use crate::model::item::{TrackableItem, TrackableKind};
    use crate::model::snapshot::ScoringWindow;
    use chrono::Utc;

    #[test]
    fn incomplete_projects_are_ignored_and_never_counted() {
        let window = ScoringWindow::days_before(Utc::now(), 5);
        let projects = vec![
            TrackableItem::new("garage").with_status(0),
            TrackableItem::new("website").with_status(30),
        ];

        let tally = resolve(
            ItemSource::Trackable(TrackableKind::Project, &projects),
            &window,
        );
        assert_eq!(
            tally,
            ScoreTally {
                items_counted: 0,
                score_sum: 30
            }
        );
    }

    #[test]
    fn challenges_count_even_at_zero() {
        let window = ScoringWindow::days_before(Utc::now(), 5);
        let challenges = vec![
            TrackableItem::new("cold showers").with_status(0),
            TrackableItem::new("no sugar").with_status(50),
        ];

        let tally = resolve(
            ItemSource::Trackable(TrackableKind::Challenge, &challenges),
            &window,
        );
        assert_eq!(tally.items_counted, 2);
        assert_eq!(tally.score(), 25);
    }
}
