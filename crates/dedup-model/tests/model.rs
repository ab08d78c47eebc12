//! Tests for dedup-model types.

use dedup_model::{ClassifiedRecord, MatchMethod, MatchResult, Record, Role, Schema};

fn duplicate(record: Record, result: MatchResult) -> ClassifiedRecord {
    ClassifiedRecord {
        row: 0,
        record,
        result,
        matched_customer_id: "C-7".to_string(),
        matched_full_name: "John Smith".to_string(),
        matched_address: String::new(),
    }
}

#[test]
fn output_record_leads_with_customer_field() {
    let small = Record::from_pairs([("Email Address", "a@x.com"), ("Name", "Jon Smith")]);
    let classified = duplicate(
        small,
        MatchResult::Matched {
            method: MatchMethod::Email,
            score: None,
            master_row: 0,
        },
    );

    let out = classified.to_output_record(Some("Customer #"));
    let names: Vec<&str> = out.field_names().collect();
    assert_eq!(
        names,
        vec![
            "Customer #",
            "Email Address",
            "Name",
            "_matchMethod",
            "_matchScore",
            "_matchedFullName",
            "_matchedAddress",
        ]
    );
    assert_eq!(out.get("Customer #"), "C-7");
    assert_eq!(out.get("_matchMethod"), "email");
    assert_eq!(out.get("_matchScore"), "");
    assert_eq!(out.get("_matchedFullName"), "John Smith");
}

#[test]
fn output_record_small_field_overrides_customer_value_in_place() {
    let small = Record::from_pairs([("Name", "Ann"), ("Customer #", "from-small")]);
    let classified = duplicate(
        small,
        MatchResult::Matched {
            method: MatchMethod::Name,
            score: Some(0.9),
            master_row: 3,
        },
    );

    let out = classified.to_output_record(Some("Customer #"));
    let names: Vec<&str> = out.field_names().collect();
    assert_eq!(names[0], "Customer #");
    assert_eq!(names[1], "Name");
    assert_eq!(out.get("Customer #"), "from-small");
    assert_eq!(out.get("_matchScore"), "0.90");
}

#[test]
fn output_record_without_customer_role() {
    let classified = duplicate(
        Record::from_pairs([("Name", "Ann")]),
        MatchResult::Matched {
            method: MatchMethod::Name,
            score: Some(1.0),
            master_row: 0,
        },
    );
    let out = classified.to_output_record(None);
    assert_eq!(out.field_names().next(), Some("Name"));
}

#[test]
fn trigger_field_follows_small_schema() {
    let small = Schema::small_default();
    assert_eq!(MatchMethod::Email.trigger_field(&small), Some("Email Address"));
    assert_eq!(MatchMethod::Name.trigger_field(&small), Some("Name"));
    assert_eq!(MatchMethod::Address.trigger_field(&small), Some("Address 1"));
    assert_eq!(small.field(Role::Zip), Some("Postal Code"));
}

#[test]
fn no_match_has_no_provenance() {
    let result = MatchResult::NoMatch;
    assert!(!result.is_match());
    assert_eq!(result.method(), None);
    assert_eq!(result.master_row(), None);
    assert_eq!(result.score_label(), "");
}
