//! Use-case services composed over facades.
//!
//! # Responsibility
//! - Host operations that span more than one entity type.
//! - Keep callers decoupled from storage details.

pub mod relation_manager;
