use carecard_core::{
    open_db_in_memory, AverageCharMeasure, CardLayoutPlanner, CardTemplate, EngineConfig,
    FieldLimits, FontKey, LayoutLine, PageGeometry, Record, RecordField, RecordStore,
    SqliteRecordRepository,
};

fn char_measure(text: &str, _font: FontKey, _size: f64) -> f64 {
    text.chars().count() as f64
}

fn planner() -> CardLayoutPlanner<fn(&str, FontKey, f64) -> f64> {
    CardLayoutPlanner::new(
        PageGeometry::default(),
        CardTemplate::default(),
        char_measure as fn(&str, FontKey, f64) -> f64,
    )
}

fn line_with_text<'a>(lines: &'a [LayoutLine], text: &str) -> &'a LayoutLine {
    lines
        .iter()
        .find(|line| line.text == text)
        .unwrap_or_else(|| panic!("no line with text {text:?}"))
}

#[test]
fn bare_record_renders_every_care_field_as_fallback() {
    let lines = planner().plan_card(&Record::new("Hoya carnosa"));

    // title, scientific name, then label + value for six care fields
    assert_eq!(lines.len(), 14);
    let labels: Vec<&str> = lines
        .iter()
        .filter(|line| line.font == FontKey::Bold && line.x == 18.0)
        .map(|line| line.text.as_str())
        .collect();
    let expected: Vec<&str> = RecordField::CARE.iter().map(|field| field.label()).collect();
    assert_eq!(labels, expected);

    let fallbacks = lines.iter().filter(|line| line.text == "N/A").count();
    assert_eq!(fallbacks, 6);
    for line in lines.iter().filter(|line| line.text == "N/A") {
        assert_eq!(line.x, 98.0);
        assert_eq!(line.font, FontKey::Regular);
    }
}

#[test]
fn scientific_and_common_names_are_right_aligned() {
    let mut record = Record::new("Hoya carnosa");
    record.set_common_name("Wax Plant");
    let lines = planner().plan_card(&record);

    let scientific = line_with_text(&lines, "Hoya carnosa");
    assert_eq!(scientific.x, 432.0 - 18.0 - 12.0);
    assert_eq!(scientific.y, 240.0);
    assert_eq!(scientific.font, FontKey::Oblique);

    let common = line_with_text(&lines, "Wax Plant");
    assert_eq!(common.x, 432.0 - 18.0 - 9.0);
    assert_eq!(common.y, 220.0);
}

#[test]
fn missing_common_name_still_advances_the_cursor() {
    let bare = planner().plan_card(&Record::new("Hoya carnosa"));
    let mut named = Record::new("Hoya carnosa");
    named.set_common_name("Wax Plant");
    let with_common = planner().plan_card(&named);

    assert_eq!(
        line_with_text(&bare, "Light:").y,
        line_with_text(&with_common, "Light:").y
    );
}

#[test]
fn description_block_leaves_more_room_than_its_absence() {
    let bare = planner().plan_card(&Record::new("Hoya carnosa"));
    assert_eq!(line_with_text(&bare, "Light:").y, 190.0);

    let mut described = Record::new("Hoya carnosa");
    described.set_field(RecordField::Description, "Waxy star-shaped flowers.");
    let lines = planner().plan_card(&described);

    let description = line_with_text(&lines, "Waxy star-shaped flowers.");
    assert_eq!(description.x, 18.0);
    assert_eq!(description.y, 200.0);
    assert_eq!(description.font, FontKey::Oblique);
    // one line of 10 plus a 5 trailing gap, against a 10 gap when absent
    assert_eq!(line_with_text(&lines, "Light:").y, 185.0);
}

#[test]
fn wrapped_values_stack_and_shift_following_fields() {
    let value = "Bright ".repeat(60);
    let mut record = Record::new("Hoya carnosa");
    record.set_field(RecordField::Light, value.trim());
    let lines = planner().plan_card(&record);

    let light_lines: Vec<&LayoutLine> = lines
        .iter()
        .filter(|line| line.x == 98.0 && line.text.starts_with("Bright"))
        .collect();
    assert!(light_lines.len() > 1);
    for pair in light_lines.windows(2) {
        assert_eq!(pair[0].y - pair[1].y, 12.0);
    }

    let water = line_with_text(&lines, "Water:");
    let last_light = light_lines[light_lines.len() - 1];
    assert_eq!(last_light.y - water.y, 15.0);
}

#[test]
fn narrow_page_wraps_into_more_lines() {
    let mut record = Record::new("Monstera deliciosa");
    record.set_field(
        RecordField::Water,
        "Water when the top two inches of soil are dry and reduce watering in winter months",
    );

    let wide = CardLayoutPlanner::new(
        PageGeometry::default(),
        CardTemplate::default(),
        AverageCharMeasure::default(),
    );
    let narrow = CardLayoutPlanner::new(
        PageGeometry {
            width: 216.0,
            ..PageGeometry::default()
        },
        CardTemplate::default(),
        AverageCharMeasure::default(),
    );

    let count_water_lines = |lines: Vec<LayoutLine>| {
        lines
            .iter()
            .filter(|line| line.font == FontKey::Regular && line.text != "N/A")
            .count()
    };
    assert!(
        count_water_lines(narrow.plan_card(&record)) > count_water_lines(wide.plan_card(&record))
    );
}

#[test]
fn catalog_pages_match_single_cards() {
    let mut first = Record::new("Hoya carnosa");
    first.set_field(RecordField::Water, "Sparingly");
    let second = Record::new("Ficus elastica 'Ruby'");
    let planner = CardLayoutPlanner::from_config(&EngineConfig::default(), char_measure);

    let catalog = planner.plan_catalog(&[first.clone(), second.clone()]);
    let page_zero: Vec<LayoutLine> = catalog
        .iter()
        .filter(|(page, _)| *page == 0)
        .map(|(_, line)| line.clone())
        .collect();
    let page_one: Vec<LayoutLine> = catalog
        .iter()
        .filter(|(page, _)| *page == 1)
        .map(|(_, line)| line.clone())
        .collect();

    assert_eq!(page_zero, planner.plan_card(&first));
    assert_eq!(page_one, planner.plan_card(&second));
    assert!(planner.plan_catalog(&[]).is_empty());
}

#[test]
fn blank_stored_columns_plan_like_missing_ones() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO records (identity, common_name, description, light)
         VALUES ('Hoya carnosa', '', '', '');",
        [],
    )
    .unwrap();
    let repo = SqliteRecordRepository::new(&conn, FieldLimits::default());
    let record = repo.fetch("Hoya carnosa").unwrap().unwrap();
    assert_eq!(record.common_name, None);
    assert_eq!(record.description, None);
    assert_eq!(record.light, None);

    let lines = planner().plan_card(&record);
    assert_eq!(lines.len(), 14);
    assert_eq!(lines.iter().filter(|line| line.text == "N/A").count(), 6);
    assert!(lines.iter().all(|line| !line.text.is_empty()));
    assert_eq!(line_with_text(&lines, "Light:").y, 190.0);
}
