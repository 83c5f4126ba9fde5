use carecard_core::{is_normalized, normalize_scientific_name, HYBRID_SIGN};

#[test]
fn genus_is_capitalized_and_epithets_lowered() {
    assert_eq!(
        normalize_scientific_name("MONSTERA DELICIOSA"),
        "Monstera deliciosa"
    );
    assert_eq!(normalize_scientific_name("hoya Carnosa"), "Hoya carnosa");
}

#[test]
fn cultivar_spans_are_title_cased_with_quotes_kept() {
    assert_eq!(
        normalize_scientific_name("ficus elastica 'ruby'"),
        "Ficus elastica 'Ruby'"
    );
    assert_eq!(
        normalize_scientific_name("MONSTERA DELICIOSA 'THAI CONSTELLATION'"),
        "Monstera deliciosa 'Thai Constellation'"
    );
}

#[test]
fn quoted_span_without_leading_space_gets_one() {
    assert_eq!(
        normalize_scientific_name("philodendron erubescens'pink princess'"),
        "Philodendron erubescens 'Pink Princess'"
    );
}

#[test]
fn rank_markers_stay_lowercase() {
    assert_eq!(
        normalize_scientific_name("Hoya carnosa VAR. Tricolor"),
        "Hoya carnosa var. tricolor"
    );
    assert_eq!(
        normalize_scientific_name("dracaena fragrans SUBSP. deremensis"),
        "Dracaena fragrans subsp. deremensis"
    );
}

#[test]
fn hybrid_markers_become_the_multiplication_sign() {
    let expected = format!("{HYBRID_SIGN} Fatshedera lizei");
    assert_eq!(normalize_scientific_name("x fatshedera LIZEI"), expected);
    assert_eq!(
        normalize_scientific_name("Epipremnum X aureum"),
        "Epipremnum × aureum"
    );
}

#[test]
fn whitespace_collapses_and_blank_input_is_empty() {
    assert_eq!(
        normalize_scientific_name("  calathea \t  orbifolia \n"),
        "Calathea orbifolia"
    );
    assert_eq!(normalize_scientific_name("   "), "");
    assert_eq!(normalize_scientific_name(""), "");
}

#[test]
fn normalization_is_idempotent() {
    let samples = [
        "MONSTERA DELICIOSA",
        "ficus elastica 'ruby'",
        "x fatshedera lizei",
        "Hoya carnosa VAR. tricolor 'krimson   queen'",
        "sansevieria'laurentii'",
        "aglaonema 'silver\nbay'",
        "odd 'quote",
        "  ",
    ];
    for raw in samples {
        let once = normalize_scientific_name(raw);
        assert_eq!(normalize_scientific_name(&once), once, "input: {raw:?}");
        assert!(is_normalized(&once));
    }
}
