//! Municipal infrastructure registries: bridges and water-quality samples.
//!
//! Both registries share one generic access pattern. A registry is described
//! by implementing [`domain::resource::Resource`] (validation and record
//! shapes), `infra::storage::table::ResourceTable` (its SeaORM table) and
//! `api::rest::dto::RestResource` (its wire shapes); listing, lookup,
//! creation, partial update and deletion then come for free.

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod module;

pub use config::DatabaseConfig;
pub use module::InfraRegistry;
