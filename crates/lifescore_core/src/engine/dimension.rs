//! Dimension score aggregation.

use crate::engine::item_score::{resolve, ItemSource, ScoreTally};
use crate::model::dimension::DimensionData;
use crate::model::item::{Frequency, TrackableKind};
use crate::model::snapshot::{DimensionName, ScoringWindow, Snapshot};
use log::debug;
use std::collections::BTreeMap;

/// Combined tally of goals, projects, challenges and all routine buckets.
pub fn dimension_tally(data: &DimensionData, window: &ScoringWindow) -> ScoreTally {
    let sources = [
        ItemSource::Trackable(TrackableKind::Goal, &data.goals),
        ItemSource::Trackable(TrackableKind::Project, &data.projects),
        ItemSource::Trackable(TrackableKind::Challenge, &data.challenges),
        ItemSource::Routines(Frequency::Daily, &data.routines.daily),
        ItemSource::Routines(Frequency::Weekly, &data.routines.weekly),
        ItemSource::Routines(Frequency::Monthly, &data.routines.monthly),
    ];

    sources
        .into_iter()
        .map(|source| resolve(source, window))
        .fold(ScoreTally::default(), ScoreTally::merge)
}

/// Score of one dimension in `0..=100`. An empty dimension scores 0.
pub fn dimension_score(data: &DimensionData, window: &ScoringWindow) -> u8 {
    dimension_tally(data, window).score()
}

/// Scores every dimension bucket in the snapshot, keyed by name.
///
/// Returns an empty map when `dimensions` is missing.
pub fn dimension_scores(
    snapshot: &Snapshot,
    window: &ScoringWindow,
) -> BTreeMap<DimensionName, u8> {
    if snapshot.dimensions.is_none() {
        debug!("event=dimension_scores module=engine status=missing_data field=dimensions");
    }

    snapshot
        .dimension_entries()
        .map(|(name, data)| {
            let tally = dimension_tally(data, window);
            let score = tally.score();
            debug!(
                "event=dimension_scored module=engine counted={} sum={} score={}",
                tally.items_counted, tally.score_sum, score
            );
            (name.clone(), score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::dimension_score;
    use crate::model::dimension::DimensionData;
    use crate::model::history::CompletionHistory;
    use crate::model::item::{Frequency, RecurringItem, TrackableItem};
    use crate::model::snapshot::ScoringWindow;
    use chrono::{Duration, Utc};

    #[test]
    fn routines_use_bucket_frequency_for_adherence() {
        let now = Utc::now();
        let window = ScoringWindow::days_before(now, 14);
        // Declared daily but stored in the weekly bucket: 2 of 2 weeks.
        let routine = RecurringItem::new("long run", Frequency::Daily).with_history(
            CompletionHistory::from_days([
                (now - Duration::days(10)).date_naive(),
                (now - Duration::days(2)).date_naive(),
            ]),
        );
        let mut data = DimensionData::default();
        data.routines.weekly.push(routine);

        assert_eq!(dimension_score(&data, &window), 100);
    }

    #[test]
    fn goals_and_challenges_average_together() {
        let window = ScoringWindow::days_before(Utc::now(), 3);
        let mut data = DimensionData::default();
        data.goals.push(TrackableItem::new("save").with_status(70));
        data.challenges.push(TrackableItem::new("budget").with_status(20));

        assert_eq!(dimension_score(&data, &window), 45);
    }
}
