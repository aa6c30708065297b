use chrono::{Duration, TimeZone, Utc};
use lifescore_core::{
    dimension_score, dimension_tally, overall_score, CompletionHistory, DimensionConfig,
    DimensionData, Frequency, RecurringItem, ScoringWindow, TrackableItem,
};
use std::collections::BTreeMap;

fn window() -> ScoringWindow {
    ScoringWindow::days_before(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap(), 20)
}

#[test]
fn empty_dimension_scores_zero() {
    assert_eq!(dimension_score(&DimensionData::default(), &window()), 0);
}

#[test]
fn single_project_is_a_bonus_not_halved() {
    let mut data = DimensionData::default();
    data.projects.push(TrackableItem::new("shed").with_status(60));

    let tally = dimension_tally(&data, &window());
    assert_eq!(tally.items_counted, 0);
    assert_eq!(dimension_score(&data, &window()), 60);
}

#[test]
fn project_adds_to_goal_without_diluting_and_clamps() {
    let mut data = DimensionData::default();
    data.goals.push(TrackableItem::new("10k steps").with_status(40));
    data.projects.push(TrackableItem::new("home gym").with_status(100));

    assert_eq!(dimension_score(&data, &window()), 100);
}

#[test]
fn zero_status_project_never_lowers_score() {
    let mut data = DimensionData::default();
    data.goals.push(TrackableItem::new("read").with_status(80));
    let without = dimension_score(&data, &window());

    data.projects.push(TrackableItem::new("library").with_status(0));
    assert_eq!(dimension_score(&data, &window()), without);
}

#[test]
fn routines_and_goals_share_one_denominator() {
    let window = window();
    let today = window.today();
    // 20 days daily -> 10 entries = 50.
    let entries = (0..10).map(|offset| today - Duration::days(offset));
    let mut data = DimensionData::default();
    data.routines
        .daily
        .push(RecurringItem::new("meditate", Frequency::Daily).with_history(
            CompletionHistory::from_days(entries),
        ));
    data.goals.push(TrackableItem::new("sleep 8h").with_status(90));

    assert_eq!(dimension_score(&data, &window), 70);
}

#[test]
fn dimension_scores_stay_within_bounds() {
    let window = window();
    let statuses = [0, 1, 33, 50, 99, 100];
    for goal in statuses {
        for project in statuses {
            for challenge in statuses {
                let mut data = DimensionData::default();
                data.goals.push(TrackableItem::new("g").with_status(goal));
                data.projects.push(TrackableItem::new("p").with_status(project));
                data.projects.push(TrackableItem::new("p2").with_status(project));
                data.challenges.push(TrackableItem::new("c").with_status(challenge));

                let score = dimension_score(&data, &window);
                assert!(score <= 100, "score {score} out of range");
            }
        }
    }
}

#[test]
fn overall_score_is_invariant_to_uniform_weight_scaling() {
    let scores = BTreeMap::from([
        ("Health".to_string(), 73),
        ("Career".to_string(), 41),
        ("Family".to_string(), 88),
    ]);
    let base = [("Health", 25.0), ("Career", 40.0), ("Family", 15.0)];

    let reference = overall_score(
        &base
            .iter()
            .map(|(name, weight)| DimensionConfig::new(*name, *weight))
            .collect::<Vec<_>>(),
        &scores,
    );

    for factor in [0.5, 2.0, 3.0, 10.0] {
        let scaled = base
            .iter()
            .map(|(name, weight)| DimensionConfig::new(*name, weight * factor))
            .collect::<Vec<_>>();
        let overall = overall_score(&scaled, &scores);
        assert_eq!(overall.score, reference.score, "factor {factor}");
        assert_eq!(overall.total_weight, reference.total_weight * factor);
    }
}

#[test]
fn overall_score_counts_unscored_dimensions_as_zero() {
    let configs = vec![
        DimensionConfig::new("Health", 50.0),
        DimensionConfig::new("Finance", 50.0),
    ];
    let scores = BTreeMap::from([("Health".to_string(), 80)]);

    let overall = overall_score(&configs, &scores);
    assert_eq!(overall.score, 40);
    assert_eq!(overall.total_weight, 100.0);
}
