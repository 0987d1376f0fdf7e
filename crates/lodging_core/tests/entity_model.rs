use lodging_core::{
    Amenity, Entity, Place, Record, Review, User, ValidationError, ValidationErrorKind,
};
use serde_json::{json, Value};
use uuid::Uuid;

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn valid_user_yields_normalized_email() {
    let user = User::new("John", "Doe", "John.Doe@Example.com");
    assert_eq!(user.is_valid().as_deref(), Some("John.Doe@example.com"));
}

#[test]
fn names_at_limit_are_accepted_and_longer_rejected() {
    let user = User::new("a".repeat(50), "b".repeat(50), "john@example.com");
    assert!(user.is_valid().is_some());

    let user = User::new("a".repeat(51), "Doe", "john@example.com");
    assert_eq!(user.is_valid(), None);
    assert_eq!(user.validate().unwrap_err().kind(), ValidationErrorKind::Value);

    let user = User::new("John", "b".repeat(51), "john@example.com");
    assert!(matches!(
        user.validate().unwrap_err(),
        ValidationError::TooLong {
            field: "last_name",
            max: 50,
            actual: 51,
        }
    ));
}

#[test]
fn malformed_email_collapses_to_none() {
    let user = User::new("John", "Doe", "john.example.com");
    assert_eq!(user.is_valid(), None);
    assert_eq!(user.validate().unwrap_err().kind(), ValidationErrorKind::Email);
}

#[test]
fn non_string_fields_are_type_errors() {
    let err = User::from_record(&record(json!({
        "first_name": 42,
        "last_name": "Doe",
        "email": "john@example.com",
    })))
    .unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::Type);

    let err = User::from_record(&record(json!({
        "first_name": "John",
        "last_name": "Doe",
    })))
    .unwrap_err();
    assert_eq!(err.kind(), ValidationErrorKind::Type);
}

#[test]
fn from_record_fills_defaults() {
    let user = User::from_record(&record(json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": "john@example.com",
    })))
    .unwrap();
    assert!(!user.id.is_nil());
    assert!(!user.is_admin);
    assert!(user.places.is_empty());
    assert!(user.created_at > 0);
}

#[test]
fn user_to_dict_lists_place_ids_not_objects() {
    let mut user = User::new("John", "Doe", "john@example.com");
    let place_id = Uuid::new_v4();
    user.add_place(place_id);

    let dict = user.to_dict();
    assert_eq!(dict["id"], json!(user.id.to_string()));
    assert_eq!(dict["first_name"], json!("John"));
    assert_eq!(dict["is_admin"], json!(false));
    assert_eq!(dict["places"], json!([place_id.to_string()]));
    assert!(dict.contains_key("created_at"));
    assert!(dict.contains_key("updated_at"));
}

#[test]
fn place_rejects_out_of_range_values() {
    let owner_id = Uuid::new_v4();
    let base = json!({
        "title": "Cozy Cottage",
        "price": 150.0,
        "latitude": 34.0522,
        "longitude": -118.2437,
        "owner_id": owner_id.to_string(),
    });
    let place = Place::from_record(&record(base.clone())).unwrap();
    assert!(place.is_valid());
    assert_eq!(place.description, "");
    assert!(place.amenities.is_empty());

    for (field, value) in [
        ("price", json!(-1.0)),
        ("latitude", json!(90.5)),
        ("longitude", json!(-180.5)),
        ("title", json!("  ")),
    ] {
        let mut input = record(base.clone());
        input.insert(field.to_string(), value);
        let place = Place::from_record(&input).unwrap();
        assert!(!place.is_valid(), "{field} should be rejected");
    }
}

#[test]
fn amenity_and_review_validation() {
    let amenity = Amenity::from_record(&record(json!({ "name": "WiFi" }))).unwrap();
    assert!(amenity.is_valid());
    let amenity = Amenity::from_record(&record(json!({ "name": "" }))).unwrap();
    assert_eq!(amenity.validate().unwrap_err(), ValidationError::Required("name"));

    let review_input = json!({
        "text": "Great place!",
        "rating": 5,
        "place_id": Uuid::new_v4().to_string(),
        "user_id": Uuid::new_v4().to_string(),
    });
    let review = Review::from_record(&record(review_input.clone())).unwrap();
    assert!(review.is_valid());

    let mut bad = record(review_input);
    bad.insert("rating".to_string(), json!(6));
    assert!(!Review::from_record(&bad).unwrap().is_valid());
}

#[test]
fn every_entity_serializes_to_a_full_dict() {
    let place_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let user = User::new("John", "Doe", "john@example.com");
    let place = Place::from_record(&record(json!({
        "title": "Cozy Cottage",
        "price": 150.0,
        "latitude": 34.0522,
        "longitude": -118.2437,
        "owner_id": user_id.to_string(),
    })))
    .unwrap();
    let amenity = Amenity::from_record(&record(json!({ "name": "WiFi" }))).unwrap();
    let review = Review::from_record(&record(json!({
        "text": "Great place!",
        "rating": 5,
        "place_id": place_id.to_string(),
        "user_id": user_id.to_string(),
    })))
    .unwrap();

    let dicts = [
        (user.to_dict(), 8),
        (place.to_dict(), 12),
        (amenity.to_dict(), 4),
        (review.to_dict(), 7),
    ];
    for (dict, fields) in dicts {
        assert_eq!(dict.len(), fields, "{dict:?}");
        assert!(dict["id"].is_string());
        assert!(dict["created_at"].is_i64());
    }
}

#[test]
fn internationalized_email_is_accepted() {
    let user = User::new("José", "Pérez", "josé@Exämple.com");
    assert_eq!(user.is_valid().as_deref(), Some("josé@exämple.com"));
}
