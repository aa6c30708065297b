use chrono::{NaiveDate, TimeZone, Utc};
use lifescore_core::{
    Frequency, Importance, ProgressService, RecordKey, Snapshot, SnapshotError,
};
use std::io::Write;

const SKILL_ID: &str = "11111111-2222-4333-8444-555555555555";

fn sample_json() -> String {
    format!(
        r##"{{
            "dimensions": {{
                "Health": {{
                    "goals": [
                        {{ "id": "00000000-0000-4000-8000-000000000001", "name": "Run 5k",
                           "status": 130, "importance": "high", "roleKey": "athlete",
                           "linkedSkillIds": ["{SKILL_ID}"], "dueDate": "2026-09-01" }}
                    ],
                    "projects": [
                        {{ "id": "00000000-0000-4000-8000-000000000002", "name": "Home gym",
                           "status": 20.4 }}
                    ],
                    "routines": {{
                        "weekly": [
                            {{ "id": "00000000-0000-4000-8000-000000000003", "name": "Yoga",
                               "frequency": "weekly", "status": 100,
                               "completionHistory": ["2026-05-05", "2026-05-12T07:30:00Z"] }}
                        ]
                    }}
                }},
                "Career": {{}}
            }},
            "appSettings": {{
                "dimensionConfig": [
                    {{ "name": "Health", "weight": 60, "max": 100, "color": "#22c55e" }},
                    {{ "name": "Career", "weight": 40 }}
                ],
                "accountCreationDate": "2026-05-01T00:00:00Z"
            }},
            "skills": [ {{ "id": "{SKILL_ID}", "name": "Endurance", "manualMode": false, "level": 0 }} ],
            "roles": [ {{ "key": "athlete", "name": "Athlete", "isCustom": true }} ]
        }}"##
    )
}

#[test]
fn decodes_camel_case_wire_shape_and_clamps_status() {
    let snapshot = Snapshot::from_json_str(&sample_json()).unwrap();

    let health = snapshot.resolve_dimension("Health").unwrap();
    assert_eq!(health.goals[0].status, 100);
    assert_eq!(health.goals[0].importance, Importance::High);
    assert_eq!(health.goals[0].role_key.as_deref(), Some("athlete"));
    assert_eq!(
        health.goals[0].due_date,
        Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
    );
    assert_eq!(health.projects[0].status, 20);
    assert_eq!(health.routines.weekly[0].frequency, Frequency::Weekly);
    assert_eq!(
        health.routines.weekly[0].completion_history.days()[1],
        NaiveDate::from_ymd_opt(2026, 5, 12).unwrap()
    );
    assert!(snapshot.resolve_dimension("Career").unwrap().is_empty());
    assert_eq!(snapshot.app_settings.dimension_config[1].max, 100);
    assert!(snapshot.roles[0].is_custom);
}

#[test]
fn completion_history_serializes_as_iso_days() {
    let snapshot = Snapshot::from_json_str(&sample_json()).unwrap();
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(
        value["dimensions"]["Health"]["routines"]["weekly"][0]["completionHistory"],
        serde_json::json!(["2026-05-05", "2026-05-12"])
    );
    assert_eq!(
        value["dimensions"]["Health"]["goals"][0]["linkedSkillIds"][0],
        SKILL_ID
    );
}

#[test]
fn missing_dimensions_stay_missing() {
    let snapshot = Snapshot::from_json_str(r#"{ "appSettings": {} }"#).unwrap();
    assert!(snapshot.dimensions.is_none());
    assert!(snapshot.skills.is_empty());
    assert!(snapshot.app_settings.account_creation_date.is_none());
}

#[test]
fn dangling_role_resolves_as_unassigned() {
    let snapshot = Snapshot::from_json_str(&sample_json()).unwrap();
    assert_eq!(
        snapshot.assigned_role(Some("athlete")).map(|role| role.name.as_str()),
        Some("Athlete")
    );
    assert!(snapshot.assigned_role(Some("deleted-role")).is_none());
    assert!(snapshot.assigned_role(None).is_none());
}

#[test]
fn report_covers_dimensions_roles_and_skills() {
    let snapshot = Snapshot::from_json_str(&sample_json()).unwrap();
    // 2026-05-01 -> 2026-05-15 is 14 days: 2 expected weeks, 2 entries.
    let now = Utc.with_ymd_and_hms(2026, 5, 15, 9, 0, 0).unwrap();

    let report = ProgressService::new(&snapshot).report(now);

    // Health: goal 100 + routine 100 + project bonus 20 -> 220 / 2 -> clamp.
    assert_eq!(report.dimensions["Health"], 100);
    assert_eq!(report.dimensions["Career"], 0);
    assert_eq!(report.overall.score, 60);
    assert_eq!(report.overall.total_weight, 100.0);
    assert_eq!(report.roles.len(), 1);
    assert_eq!(report.roles[0].xp, 100);
    assert_eq!(report.roles[0].level, 2);
    assert_eq!(report.skills[0].id, RecordKey::from(SKILL_ID));
    assert_eq!(report.skills[0].level, 100);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["overall"]["totalWeight"], 100.0);
    assert_eq!(json["overall"]["effectiveWeight"], 100.0);
    assert_eq!(json["skills"][0]["manualMode"], false);
}

#[test]
fn load_from_path_reads_file_and_reports_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(sample_json().as_bytes()).unwrap();

    let snapshot = Snapshot::load_from_path(file.path()).unwrap();
    assert_eq!(snapshot.skills.len(), 1);

    let missing = Snapshot::load_from_path(file.path().with_extension("missing")).unwrap_err();
    assert!(matches!(missing, SnapshotError::Io(_)));

    let broken = Snapshot::from_json_str("{ \"dimensions\": 3 }").unwrap_err();
    assert!(matches!(broken, SnapshotError::Json(_)));
}

// Older exports keyed records by millisecond timestamps and left fields null.
const LEGACY_JSON: &str = r#"{
    "dimensions": {
        "Health": {
            "goals": [
                { "id": 1714557600000, "name": null, "status": null,
                  "linkedSkillIds": [1714557600001] },
                { "id": "1714557600002", "name": "Stretch", "status": "abc" },
                { "id": "1714557600003", "name": "Sleep", "status": "80" }
            ],
            "routines": {
                "weekly": [
                    { "id": 1714557600004, "name": "Swim",
                      "completionHistory": ["2026-05-05", "2026-05-12"],
                      "linkedSkillIds": ["1714557600001"] }
                ]
            }
        }
    },
    "appSettings": {
        "dimensionConfig": [
            { "name": "Health", "weight": "50" },
            { "name": "Career", "weight": null }
        ],
        "accountCreationDate": "2026-05-01T00:00:00Z"
    },
    "skills": [ { "id": 1714557600001, "name": "Mobility", "manualMode": null } ]
}"#;

#[test]
fn timestamp_ids_decode_as_text_keys() {
    let snapshot = Snapshot::from_json_str(LEGACY_JSON).unwrap();
    let health = snapshot.resolve_dimension("Health").unwrap();

    assert_eq!(health.goals[0].id.as_str(), "1714557600000");
    assert_eq!(health.goals[1].id, RecordKey::from("1714557600002"));
    assert_eq!(health.routines.weekly[0].id.as_str(), "1714557600004");

    let skill = snapshot.resolve_skill(&RecordKey::from("1714557600001")).unwrap();
    assert_eq!(skill.name, "Mobility");
    assert!(!skill.manual_mode);
    assert!(health.goals[0].links_skill(&skill.id));
    assert!(health.routines.weekly[0].links_skill(&skill.id));

    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(value["skills"][0]["id"], "1714557600001");
}

#[test]
fn null_or_unparseable_status_means_no_progress() {
    let snapshot = Snapshot::from_json_str(LEGACY_JSON).unwrap();
    let health = snapshot.resolve_dimension("Health").unwrap();

    assert_eq!(health.goals[0].name, "");
    assert_eq!(health.goals[0].status, 0);
    assert_eq!(health.goals[1].status, 0);
    assert_eq!(health.goals[2].status, 80);
}

#[test]
fn routine_without_frequency_scores_by_its_bucket() {
    let snapshot = Snapshot::from_json_str(LEGACY_JSON).unwrap();
    let routine = &snapshot.resolve_dimension("Health").unwrap().routines.weekly[0];
    assert_eq!(routine.frequency, Frequency::Daily);

    // 14 days -> 2 expected weeks, 2 entries -> 100 adherence.
    let now = Utc.with_ymd_and_hms(2026, 5, 15, 9, 0, 0).unwrap();
    let report = ProgressService::new(&snapshot).report(now);

    // Goals 0 + 0 + 80, routine 100 -> 180 / 4.
    assert_eq!(report.dimensions["Health"], 45);
    assert_eq!(report.overall.total_weight, 50.0);
    assert_eq!(report.overall.score, 45);
    // Linked goal 0 + linked routine 100 -> 50.
    assert_eq!(report.skills[0].level, 50);
}
