use chrono::{TimeZone, Utc};

use cookmatch_core::{ListingRecord, NumericField, ProviderRecord, QueryDescriptor, TagField, LISTING_PROFILE, PROVIDER_PROFILE};
use cookmatch_filter::evaluate;

fn provider(id: &str, price: f64, rating: f64, cuisines: &[&str]) -> ProviderRecord {
    ProviderRecord {
        id: id.to_string(),
        name: format!("Cook {}", id),
        bio: None,
        location: None,
        cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
        price: Some(price),
        rating: Some(rating),
        review_count: None,
        coordinates: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn listing(id: &str, title: &str, allergens: &[&str]) -> ListingRecord {
    ListingRecord {
        id: id.to_string(),
        provider_id: "p1".to_string(),
        title: title.to_string(),
        description: None,
        location: None,
        cuisine: None,
        category: None,
        dietary: vec![],
        allergens: allergens.iter().map(|a| a.to_string()).collect(),
        price: Some(10.0),
        rating: None,
        review_count: None,
        coordinates: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn scenario() -> Vec<ProviderRecord> {
    vec![
        provider("A", 10.0, 4.5, &["Italian"]),
        provider("B", 25.0, 4.8, &["Japanese"]),
        provider("C", 15.0, 4.5, &["Italian", "Thai"]),
    ]
}

fn ids<C: cookmatch_core::Candidate>(hits: &[&C]) -> Vec<String> { hits.iter().map(|c| c.id().to_string()).collect() }

#[test]
fn categorical_filter_accepts_any_overlapping_tag() {
    let candidates = scenario();
    let q = QueryDescriptor::builder(&PROVIDER_PROFILE).accept(TagField::Cuisine, ["Italian"]).build();
    assert_eq!(ids(&evaluate(&q, &candidates)), ["A", "C"]);

    let q = QueryDescriptor::builder(&PROVIDER_PROFILE).accept(TagField::Cuisine, ["Thai", "Japanese"]).build();
    assert_eq!(ids(&evaluate(&q, &candidates)), ["B", "C"]);
}

#[test]
fn numeric_ranges_are_inclusive_on_present_bounds() {
    let candidates = scenario();
    let q = QueryDescriptor::builder(&PROVIDER_PROFILE).min(NumericField::Price, 12.0).build();
    assert_eq!(ids(&evaluate(&q, &candidates)), ["B", "C"]);

    let q = QueryDescriptor::builder(&PROVIDER_PROFILE)
        .min(NumericField::Price, 10.0)
        .max(NumericField::Price, 15.0)
        .build();
    assert_eq!(ids(&evaluate(&q, &candidates)), ["A", "C"]);
}

#[test]
fn missing_numeric_value_fails_the_range() {
    let mut candidates = scenario();
    candidates[0].rating = None;
    let q = QueryDescriptor::builder(&PROVIDER_PROFILE).min(NumericField::Rating, 0.0).build();
    assert_eq!(ids(&evaluate(&q, &candidates)), ["B", "C"]);
}

#[test]
fn missing_tags_fail_categorical_filter() {
    let candidates = vec![provider("X", 5.0, 4.0, &[])];
    let q = QueryDescriptor::builder(&PROVIDER_PROFILE).accept(TagField::Cuisine, ["Italian"]).build();
    assert!(evaluate(&q, &candidates).is_empty());
}

#[test]
fn text_term_matches_any_field_case_insensitively() {
    let mut candidates = scenario();
    candidates[1].bio = Some("Hand-pulled RAMEN every Friday".to_string());
    candidates[2].location = Some("Brooklyn".to_string());

    let by_bio = QueryDescriptor::builder(&PROVIDER_PROFILE).text("ramen").build();
    assert_eq!(ids(&evaluate(&by_bio, &candidates)), ["B"]);

    let by_location = QueryDescriptor::builder(&PROVIDER_PROFILE).text("brook").build();
    assert_eq!(ids(&evaluate(&by_location, &candidates)), ["C"]);

    let by_cuisine = QueryDescriptor::builder(&PROVIDER_PROFILE).text("THAI").build();
    assert_eq!(ids(&evaluate(&by_cuisine, &candidates)), ["C"]);

    let by_name = QueryDescriptor::builder(&PROVIDER_PROFILE).text("cook a").build();
    assert_eq!(ids(&evaluate(&by_name, &candidates)), ["A"]);
}

#[test]
fn exclusion_is_case_insensitive() {
    let candidates = vec![listing("1", "Satay", &["Peanut"]), listing("2", "Salad", &[])];

    let q = QueryDescriptor::builder(&LISTING_PROFILE).exclude(TagField::Allergens, ["peanut"]).build();
    assert_eq!(ids(&evaluate(&q, &candidates)), ["2"]);

    let q = QueryDescriptor::builder(&LISTING_PROFILE).exclude(TagField::Allergens, ["dairy"]).build();
    assert_eq!(ids(&evaluate(&q, &candidates)), ["1", "2"]);
}

#[test]
fn exclusion_ignores_padding_on_stored_tags() {
    let candidates = vec![listing("1", "Satay", &[" Peanut "]), listing("2", "Salad", &["Sesame"])];
    let q = QueryDescriptor::builder(&LISTING_PROFILE).exclude(TagField::Allergens, ["peanut"]).build();
    assert_eq!(ids(&evaluate(&q, &candidates)), ["2"]);
}

#[test]
fn adding_predicates_never_grows_the_result() {
    let candidates = scenario();
    let steps = [
        QueryDescriptor::builder(&PROVIDER_PROFILE).build(),
        QueryDescriptor::builder(&PROVIDER_PROFILE).text("cook").build(),
        QueryDescriptor::builder(&PROVIDER_PROFILE).text("cook").accept(TagField::Cuisine, ["Italian", "Japanese"]).build(),
        QueryDescriptor::builder(&PROVIDER_PROFILE)
            .text("cook")
            .accept(TagField::Cuisine, ["Italian", "Japanese"])
            .min(NumericField::Rating, 4.6)
            .build(),
    ];
    let sizes: Vec<usize> = steps.iter().map(|q| evaluate(q, &candidates).len()).collect();
    assert_eq!(sizes, [3, 3, 3, 1]);
    assert!(sizes.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn empty_candidate_set_yields_empty_result() {
    let q = QueryDescriptor::builder(&PROVIDER_PROFILE).text("anything").build();
    assert!(evaluate::<ProviderRecord>(&q, &[]).is_empty());
}
