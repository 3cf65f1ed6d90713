//! Infrastructure storage layer.
//!
//! All SeaORM-specific code lives here:
//! - `entity/` - table definitions
//! - `table.rs` - how a domain resource maps onto its table
//! - `mapper.rs` - row <-> record conversions for each table
//! - `sea_orm_repo.rs` - the generic repository
//! - `migrations/` - schema bootstrap

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;
pub mod table;
