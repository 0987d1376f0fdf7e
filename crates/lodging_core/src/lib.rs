//! Core domain logic for the lodging listing backend.
//! This crate is the single source of truth for entity and relation invariants.

pub mod db;
pub mod facade;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use facade::amenity_facade::AmenityFacade;
pub use facade::place_facade::PlaceFacade;
pub use facade::review_facade::ReviewFacade;
pub use facade::user_facade::UserFacade;
pub use facade::{FacadeError, FacadeResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::amenity::{Amenity, AmenityId};
pub use model::place::{Place, PlaceId};
pub use model::review::{Review, ReviewId};
pub use model::user::{normalize_email, User, UserId};
pub use model::validation::{ValidationError, ValidationErrorKind};
pub use model::{Entity, Record};
pub use repo::amenity_repo::SqliteAmenityRepository;
pub use repo::place_repo::SqlitePlaceRepository;
pub use repo::review_repo::SqliteReviewRepository;
pub use repo::sqlite_repo::{SqliteRecord, SqliteRepository};
pub use repo::user_repo::SqliteUserRepository;
pub use repo::{RepoError, RepoResult, Repository};
pub use service::relation_manager::{FacadeRelationManager, RelationError, RelationResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
