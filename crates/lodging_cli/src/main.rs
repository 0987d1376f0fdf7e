//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire `lodging_core` facades and the relation manager against SQLite.
//! - Run one owner/place/amenity flow and print the resulting records.
//!
//! Usage: `lodging_cli [DB_PATH]`. Without a path an in-memory database is
//! used. `LODGING_LOG_DIR` (absolute) enables file logging at
//! `LODGING_LOG_LEVEL`, which defaults to the build's default level.

use lodging_core::db::{open_db, open_db_in_memory};
use lodging_core::{
    default_log_level, init_logging, AmenityFacade, FacadeRelationManager, PlaceFacade, Record,
    ReviewFacade, SqliteAmenityRepository, SqlitePlaceRepository, SqliteReviewRepository,
    SqliteUserRepository, UserFacade,
};
use serde_json::{json, Value};
use std::error::Error;
use std::process::ExitCode;
use uuid::Uuid;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("LODGING_LOG_DIR") {
        let level =
            std::env::var("LODGING_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("lodging_cli logging disabled: {err}");
        }
    }

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lodging_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<String>) -> Result<(), Box<dyn Error>> {
    println!("lodging_core ping={}", lodging_core::ping());
    println!("lodging_core version={}", lodging_core::core_version());

    let conn = match db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let manager = FacadeRelationManager::new(
        UserFacade::new(SqliteUserRepository::try_new(&conn)?),
        PlaceFacade::new(SqlitePlaceRepository::try_new(&conn)?),
        AmenityFacade::new(SqliteAmenityRepository::try_new(&conn)?),
        ReviewFacade::new(SqliteReviewRepository::try_new(&conn)?),
    );

    let owner_email = format!("host-{}@example.com", Uuid::new_v4().simple());
    let owner = manager.user_facade().create_user(as_record(json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": owner_email,
    })))?;
    let owner_id = record_uuid(&owner)?;

    let place = manager.create_place_for_user(
        owner_id,
        as_record(json!({
            "title": "Cozy Cottage",
            "description": "A lovely cottage.",
            "price": 150.0,
            "latitude": 34.0522,
            "longitude": -118.2437,
        })),
    )?;
    let place_id = record_uuid(&place)?;

    manager.add_amenity_to_a_place(place_id, as_record(json!({ "name": "WiFi" })))?;

    for place in manager.get_all_places_dict_from_user_place_id_list(owner_id)? {
        println!("{}", Value::Object(place));
    }
    Ok(())
}

fn as_record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

fn record_uuid(record: &Record) -> Result<Uuid, Box<dyn Error>> {
    let text = record
        .get("id")
        .and_then(Value::as_str)
        .ok_or("record has no id")?;
    Ok(Uuid::parse_str(text)?)
}
