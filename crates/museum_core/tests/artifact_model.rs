use chrono::NaiveDate;
use museum_core::{Artifact, ArtifactFields};

fn artifact(quantity: i32, unit_weight: f64) -> Artifact {
    Artifact::new(
        "A1",
        ArtifactFields {
            name: "Wayang Kulit".to_string(),
            category: "Puppet ART".to_string(),
            origin: "Surakarta".to_string(),
            found_date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            condition: "fragile".to_string(),
            quantity,
            unit_weight,
        },
    )
}

#[test]
fn total_weight_multiplies_quantity_by_unit_weight() {
    assert_eq!(artifact(3, 2.5).total_weight(), 7.5);
    assert_eq!(artifact(0, 2.5).total_weight(), 0.0);
}

#[test]
fn formatted_date_is_day_first() {
    assert_eq!(artifact(1, 1.0).formatted_date(), "07/03/2024");
}

#[test]
fn name_and_category_change_case() {
    let item = artifact(1, 1.0);
    assert_eq!(item.formatted_name(), "WAYANG KULIT");
    assert_eq!(item.formatted_category(), "puppet art");
    assert_eq!(
        item.name_category_label(),
        "Name: WAYANG KULIT, Category: puppet art"
    );
}

#[test]
fn listing_line_combines_label_weight_and_date() {
    assert_eq!(
        artifact(3, 2.5).listing_line(),
        "Name: WAYANG KULIT, Category: puppet art, Total Weight: 7.5 kg, Found: 07/03/2024"
    );
}

#[test]
fn listing_line_keeps_decimal_point_for_whole_weights() {
    assert!(artifact(3, 2.0).listing_line().contains("Total Weight: 6.0 kg"));
}

#[test]
fn serialization_uses_snake_case_fields_and_iso_date() {
    let item = artifact(3, 2.5);

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], "A1");
    assert_eq!(json["found_date"], "2024-03-07");
    assert_eq!(json["unit_weight"], 2.5);

    let decoded: Artifact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}
