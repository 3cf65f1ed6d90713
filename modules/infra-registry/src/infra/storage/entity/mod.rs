pub mod bridge;
pub mod water_quality_sample;
