use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "water_quality_samples")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub site_name: String,
    pub location: String,
    pub sample_date: NaiveDate,
    pub ph: Option<f64>,
    pub turbidity_ntu: Option<f64>,
    pub dissolved_oxygen_mg_l: Option<f64>,
    pub nitrates_mg_l: Option<f64>,
    pub e_coli_count: Option<i32>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
