pub mod bridge;
pub mod error;
pub mod patch;
pub mod repo;
pub mod resource;
pub mod service;
pub mod validation;
pub mod water_quality;
