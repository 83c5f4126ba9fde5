use carecard_core::{bound_field, truncate_to_limit, FieldLimits, ELLIPSIS};

const LONG_WATER: &str = "Water thoroughly once the top two inches of soil feel dry. \
In winter reduce watering to every two or three weeks! Never let the pot sit in standing \
water because the roots rot quickly? Use room temperature water and empty the saucer after \
thirty minutes so the soil drains.";

#[test]
fn short_text_is_returned_unchanged() {
    let limits = FieldLimits::default();
    assert_eq!(bound_field("light", "Bright indirect", &limits), "Bright indirect");
}

#[test]
fn unlisted_fields_pass_through() {
    let limits = FieldLimits::default();
    let long = "x".repeat(500);
    assert_eq!(bound_field("common_name", &long, &limits), long);
    assert_eq!(bound_field("card_path", &long, &limits), long);
}

#[test]
fn sentence_boundary_wins_without_ellipsis() {
    let text = "A short sentence. Another sentence that pushes past the limit entirely.";
    assert_eq!(truncate_to_limit(text, 24), "A short sentence.");
}

#[test]
fn early_sentence_breaks_fall_back_to_word_boundary() {
    let text = "Hi. This is a long line of care text";
    assert_eq!(truncate_to_limit(text, 20), "Hi. This is a...");
}

#[test]
fn word_boundary_appends_ellipsis() {
    let text = "Bright indirect light near an east window";
    let bounded = truncate_to_limit(text, 20);
    assert_eq!(bounded, "Bright indirect...");
    assert!(bounded.ends_with(ELLIPSIS));
}

#[test]
fn single_long_word_is_hard_cut() {
    assert_eq!(
        truncate_to_limit("Supercalifragilisticexpialidocious", 10),
        "Superca..."
    );
}

#[test]
fn bounded_output_never_exceeds_limit() {
    let samples = [
        LONG_WATER,
        "Keep moist! Never soggy. Drain well and feed monthly in spring.",
        "Tolerates 55°F–85°F; avoid drafts near doors and heating vents.",
        "nospacesatallinthisverylongstringofcharacters",
    ];
    for text in samples {
        for limit in 4..80 {
            let bounded = truncate_to_limit(text, limit);
            assert!(
                bounded.chars().count() <= limit,
                "limit {limit} exceeded by {bounded:?}"
            );
        }
    }
}

#[test]
fn default_water_limit_bounds_long_text() {
    let limits = FieldLimits::default();
    assert!(LONG_WATER.chars().count() > 180);

    let bounded = bound_field("water", LONG_WATER, &limits);
    assert!(bounded.chars().count() <= 180);
    assert!(LONG_WATER.starts_with(bounded.trim_end_matches(ELLIPSIS)));
}

#[test]
fn limits_are_configurable_per_template() {
    let limits = FieldLimits::empty().with_limit("light", 12);
    assert_eq!(
        bound_field("light", "Bright indirect light", &limits),
        "Bright..."
    );
    assert_eq!(
        bound_field("water", "Water weekly in summer", &limits),
        "Water weekly in summer"
    );
}
