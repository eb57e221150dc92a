//! Tests for wire-format types

use super::*;

fn sample() -> Creature {
    Creature {
        id: 7,
        name: "Red Kangaroo".to_string(),
        scientific_name: "Macropus rufus".to_string(),
        description: "The largest of all kangaroos.".to_string(),
        gender_ratio: 0.5,
        kingdom: "Animalia".to_string(),
        classification: "Mammal".to_string(),
        family: "Macropodidae".to_string(),
        body_shape: "quadruped".to_string(),
        height: 1.5,
        weight: 85.0,
        image_path: "/uploads/abc-123.png".to_string(),
    }
}

#[test]
fn test_creature_deserializes_from_service_json() {
    let json = r#"{
        "id": 1,
        "name": "Koala",
        "scientific_name": "Phascolarctos cinereus",
        "description": "An arboreal herbivorous marsupial.",
        "gender_ratio": 0.5,
        "kingdom": "Animalia",
        "classification": "Mammal",
        "family": "Phascolarctidae",
        "body_shape": "quadruped",
        "height": 0.7,
        "weight": 12.0,
        "image_path": "uploads/koala.png"
    }"#;

    let creature: Creature = serde_json::from_str(json).unwrap();
    assert_eq!(creature.id, 1);
    assert_eq!(creature.name, "Koala");
    assert_eq!(creature.family, "Phascolarctidae");
}

#[test]
fn test_image_url_strips_unix_directories() {
    let creature = sample();
    assert_eq!(
        creature.image_url("http://localhost:8000/api/v1"),
        "http://localhost:8000/api/v1/static/uploads/abc-123.png"
    );
}

#[test]
fn test_image_url_strips_windows_directories() {
    let mut creature = sample();
    creature.image_path = r"C:\uploads\abc-123.png".to_string();
    assert_eq!(
        creature.image_url("http://localhost:8000/api/v1"),
        "http://localhost:8000/api/v1/static/uploads/abc-123.png"
    );
}

#[test]
fn test_image_url_tolerates_trailing_slash_on_base() {
    let creature = sample();
    assert_eq!(
        creature.image_url("http://localhost:8000/api/v1/"),
        "http://localhost:8000/api/v1/static/uploads/abc-123.png"
    );
}

#[test]
fn test_image_url_bare_filename_passes_through() {
    let mut creature = sample();
    creature.image_path = "photo.jpg".to_string();
    assert!(creature.image_url("http://x").ends_with("/static/uploads/photo.jpg"));
}

#[test]
fn test_display_number_pads_to_three_digits() {
    let mut creature = sample();
    assert_eq!(creature.display_number(), "#007");

    creature.id = 1234;
    assert_eq!(creature.display_number(), "#1234");
}

#[test]
fn test_placeholder_url() {
    assert_eq!(
        placeholder_url("http://localhost:8000/api/v1"),
        "http://localhost:8000/api/v1/static/uploads/placeholder.png"
    );
}

#[test]
fn test_error_body_deserializes() {
    let body: ErrorBody = serde_json::from_str(r#"{"detail": "File must be an image"}"#).unwrap();
    assert_eq!(body.detail, "File must be an image");
}

#[test]
fn test_query_params_preserve_insertion_order() {
    let mut params = QueryParams::new();
    params.push("height_min", "1.0".to_string());
    params.push("height_max", "2.5".to_string());
    params.push("kingdom", "Animalia".to_string());

    let names: Vec<_> = params.pairs().iter().map(|(n, _)| *n).collect();
    assert_eq!(names, vec!["height_min", "height_max", "kingdom"]);
    assert_eq!(params.get("height_max"), Some("2.5"));
    assert_eq!(params.get("weight_min"), None);
}

#[test]
fn test_query_params_empty() {
    let params = QueryParams::new();
    assert!(params.is_empty());
    assert_eq!(params.len(), 0);
}
