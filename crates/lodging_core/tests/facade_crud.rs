use lodging_core::db::open_db_in_memory;
use lodging_core::{
    AmenityFacade, FacadeError, PlaceFacade, Record, Repository, ReviewFacade,
    SqliteAmenityRepository, SqlitePlaceRepository, SqliteReviewRepository,
    SqliteUserRepository, UserFacade, ValidationErrorKind,
};
use serde_json::{json, Value};
use uuid::Uuid;

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn id_of(record: &Record) -> Uuid {
    Uuid::parse_str(record["id"].as_str().unwrap()).unwrap()
}

fn john() -> Record {
    record(json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": "john@Example.COM",
    }))
}

#[test]
fn create_and_get_user_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let facade = UserFacade::new(SqliteUserRepository::try_new(&conn).unwrap());

    let created = facade.create_user(john()).unwrap();
    assert_eq!(created["email"], json!("john@example.com"));
    assert_eq!(created["places"], json!([]));

    let loaded = facade.get_user(id_of(&created)).unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn get_missing_user_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let facade = UserFacade::new(SqliteUserRepository::try_new(&conn).unwrap());

    assert!(facade.get_user(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn invalid_user_is_not_persisted() {
    let conn = open_db_in_memory().unwrap();
    let facade = UserFacade::new(SqliteUserRepository::try_new(&conn).unwrap());

    let mut input = john();
    input.insert("email".to_string(), json!("not-an-email"));
    let err = facade.create_user(input).unwrap_err();
    assert!(matches!(
        err,
        FacadeError::Validation { entity: "user", ref source } if source.kind() == ValidationErrorKind::Email
    ));

    let mut input = john();
    input.insert("last_name".to_string(), json!(["Doe"]));
    let err = facade.create_user(input).unwrap_err();
    assert!(matches!(
        err,
        FacadeError::Validation { ref source, .. } if source.kind() == ValidationErrorKind::Type
    ));

    assert!(facade.get_all_users().unwrap().is_empty());
}

#[test]
fn duplicate_email_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let facade = UserFacade::new(SqliteUserRepository::try_new(&conn).unwrap());

    facade.create_user(john()).unwrap();
    let mut again = john();
    again.insert("email".to_string(), json!("john@example.com"));
    let err = facade.create_user(again).unwrap_err();
    assert!(matches!(err, FacadeError::EmailTaken(_)));

    let found = facade.get_user_by_email("john@EXAMPLE.com").unwrap().unwrap();
    assert_eq!(found["first_name"], json!("John"));
    assert!(facade.get_user_by_email("nobody@example.com").unwrap().is_none());
}

#[test]
fn update_user_merges_fields_and_protects_identity() {
    let conn = open_db_in_memory().unwrap();
    let facade = UserFacade::new(SqliteUserRepository::try_new(&conn).unwrap());
    let created = facade.create_user(john()).unwrap();
    let user_id = id_of(&created);

    let updated = facade
        .update_user(
            user_id,
            record(json!({
                "first_name": "Johnny",
                "id": Uuid::new_v4().to_string(),
                "created_at": 1,
            })),
        )
        .unwrap();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["first_name"], json!("Johnny"));
    assert_eq!(updated["last_name"], json!("Doe"));
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(updated["updated_at"].as_i64() >= created["updated_at"].as_i64());
}

#[test]
fn create_user_assigns_identity_and_starts_without_places() {
    let conn = open_db_in_memory().unwrap();
    let facade = UserFacade::new(SqliteUserRepository::try_new(&conn).unwrap());
    let supplied_id = Uuid::new_v4();

    let mut input = john();
    input.insert("id".to_string(), json!(supplied_id.to_string()));
    input.insert("places".to_string(), json!([Uuid::new_v4().to_string()]));
    input.insert("created_at".to_string(), json!(1));
    input.insert("updated_at".to_string(), json!(1));
    let created = facade.create_user(input).unwrap();

    assert_ne!(id_of(&created), supplied_id);
    assert_eq!(created["places"], json!([]));
    assert!(created["created_at"].as_i64().unwrap() > 1);
    assert_eq!(created["updated_at"], created["created_at"]);
    assert!(facade.get_user(supplied_id).unwrap().is_none());
}

#[test]
fn update_user_keeps_stored_places() {
    let conn = open_db_in_memory().unwrap();
    let facade = UserFacade::new(SqliteUserRepository::try_new(&conn).unwrap());
    let user_id = id_of(&facade.create_user(john()).unwrap());
    let owned_place = Uuid::new_v4();
    let mut user = facade.repo().get(user_id).unwrap().unwrap();
    user.add_place(owned_place);
    facade.repo().update(user_id, &user).unwrap();

    let updated = facade
        .update_user(
            user_id,
            record(json!({
                "last_name": "Smith",
                "places": [Uuid::new_v4().to_string()],
            })),
        )
        .unwrap();
    assert_eq!(updated["last_name"], json!("Smith"));
    assert_eq!(updated["places"], json!([owned_place.to_string()]));

    let cleared = facade
        .update_user(user_id, record(json!({ "places": [] })))
        .unwrap();
    assert_eq!(cleared["places"], json!([owned_place.to_string()]));
}

#[test]
fn update_user_rejects_invalid_fields_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let facade = UserFacade::new(SqliteUserRepository::try_new(&conn).unwrap());
    let created = facade.create_user(john()).unwrap();
    let user_id = id_of(&created);

    let err = facade
        .update_user(user_id, record(json!({ "first_name": "x".repeat(51) })))
        .unwrap_err();
    assert!(matches!(err, FacadeError::Validation { .. }));
    assert_eq!(facade.get_user(user_id).unwrap().unwrap(), created);
}

#[test]
fn update_and_delete_missing_entities_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let facade = PlaceFacade::new(SqlitePlaceRepository::try_new(&conn).unwrap());
    let missing = Uuid::new_v4();

    let err = facade
        .update_place(missing, record(json!({ "title": "x" })))
        .unwrap_err();
    assert!(matches!(err, FacadeError::NotFound { entity: "place", id } if id == missing));

    let err = facade.delete_place(missing).unwrap_err();
    assert!(matches!(err, FacadeError::NotFound { entity: "place", id } if id == missing));
}

#[test]
fn place_crud_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let facade = PlaceFacade::new(SqlitePlaceRepository::try_new(&conn).unwrap());

    let created = facade
        .create_place(record(json!({
            "title": "Cozy Cottage",
            "description": "A lovely cottage.",
            "price": 150,
            "latitude": 34.0522,
            "longitude": -118.2437,
            "owner_id": Uuid::new_v4().to_string(),
        })))
        .unwrap();
    let place_id = id_of(&created);
    assert_eq!(created["price"], json!(150.0));
    assert_eq!(created["amenities"], json!([]));

    let updated = facade
        .update_place(place_id, record(json!({ "price": 99.5 })))
        .unwrap();
    assert_eq!(updated["price"], json!(99.5));
    assert_eq!(updated["title"], json!("Cozy Cottage"));

    assert_eq!(facade.get_all_places().unwrap().len(), 1);
    facade.delete_place(place_id).unwrap();
    assert!(facade.get_place(place_id).unwrap().is_none());
}

#[test]
fn amenities_list_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let facade = AmenityFacade::new(SqliteAmenityRepository::try_new(&conn).unwrap());

    for name in ["WiFi", "Pool", "Parking"] {
        facade.create_amenity(record(json!({ "name": name }))).unwrap();
    }
    let names: Vec<_> = facade
        .get_all_amenities()
        .unwrap()
        .into_iter()
        .map(|amenity| amenity["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"Pool".to_string()));

    let err = facade.create_amenity(record(json!({ "name": 3 }))).unwrap_err();
    assert!(matches!(err, FacadeError::Validation { entity: "amenity", .. }));
}

#[test]
fn create_place_starts_with_empty_relation_lists() {
    let conn = open_db_in_memory().unwrap();
    let facade = PlaceFacade::new(SqlitePlaceRepository::try_new(&conn).unwrap());
    let owner_id = Uuid::new_v4();
    let supplied_id = Uuid::new_v4();

    let created = facade
        .create_place(record(json!({
            "id": supplied_id.to_string(),
            "title": "Cozy Cottage",
            "price": 150.0,
            "latitude": 34.0522,
            "longitude": -118.2437,
            "owner_id": owner_id.to_string(),
            "amenities": ["Sauna"],
            "reviews": [Uuid::new_v4().to_string()],
            "created_at": 1,
        })))
        .unwrap();

    assert_ne!(id_of(&created), supplied_id);
    assert_eq!(created["owner_id"], json!(owner_id.to_string()));
    assert_eq!(created["amenities"], json!([]));
    assert_eq!(created["reviews"], json!([]));
    assert!(created["created_at"].as_i64().unwrap() > 1);
}

#[test]
fn update_place_keeps_owner_and_relation_lists() {
    let conn = open_db_in_memory().unwrap();
    let facade = PlaceFacade::new(SqlitePlaceRepository::try_new(&conn).unwrap());
    let owner_id = Uuid::new_v4();
    let created = facade
        .create_place(record(json!({
            "title": "Cozy Cottage",
            "price": 150.0,
            "latitude": 34.0522,
            "longitude": -118.2437,
            "owner_id": owner_id.to_string(),
            "owner_first_name": "John",
        })))
        .unwrap();
    let place_id = id_of(&created);
    let review_id = Uuid::new_v4();
    let mut place = facade.repo().get(place_id).unwrap().unwrap();
    place.add_amenity("WiFi");
    place.add_review(review_id);
    facade.repo().update(place_id, &place).unwrap();

    let updated = facade
        .update_place(
            place_id,
            record(json!({
                "title": "Renovated Cottage",
                "owner_id": Uuid::new_v4().to_string(),
                "owner_first_name": "Mallory",
                "amenities": [],
                "reviews": [Uuid::new_v4().to_string()],
            })),
        )
        .unwrap();

    assert_eq!(updated["title"], json!("Renovated Cottage"));
    assert_eq!(updated["owner_id"], json!(owner_id.to_string()));
    assert_eq!(updated["owner_first_name"], json!("John"));
    assert_eq!(updated["amenities"], json!(["WiFi"]));
    assert_eq!(updated["reviews"], json!([review_id.to_string()]));
}

#[test]
fn update_review_keeps_references() {
    let conn = open_db_in_memory().unwrap();
    let facade = ReviewFacade::new(SqliteReviewRepository::try_new(&conn).unwrap());
    let (place_id, user_id) = (Uuid::new_v4(), Uuid::new_v4());
    let created = facade
        .create_review(record(json!({
            "text": "Great place!",
            "rating": 5,
            "place_id": place_id.to_string(),
            "user_id": user_id.to_string(),
        })))
        .unwrap();

    let updated = facade
        .update_review(
            id_of(&created),
            record(json!({
                "rating": 4,
                "place_id": Uuid::new_v4().to_string(),
                "user_id": Uuid::new_v4().to_string(),
            })),
        )
        .unwrap();

    assert_eq!(updated["rating"], json!(4));
    assert_eq!(updated["place_id"], json!(place_id.to_string()));
    assert_eq!(updated["user_id"], json!(user_id.to_string()));
}
