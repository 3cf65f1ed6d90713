//! Conversions between stored rows and domain records.

use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};

use crate::domain::bridge::{Bridge, BridgeCondition, BridgePatch, NewBridge};
use crate::domain::error::DomainError;
use crate::domain::resource::{Categorical, RecordId};
use crate::domain::water_quality::{
    NewSample, Readings, SamplePatch, WaterQualitySample, WaterQualityStatus,
};
use crate::infra::storage::entity::{bridge, water_quality_sample};
use crate::infra::storage::table::{ColumnOf, ResourceTable, assign, assign_nullable};

fn stored_category<C: Categorical>(raw: &str, kind: &str, id: RecordId) -> Result<C, DomainError> {
    C::parse(raw).ok_or_else(|| {
        DomainError::database(format!("{kind} {id} has unrecognised stored value '{raw}'"))
    })
}

impl ResourceTable for Bridge {
    type Entity = bridge::Entity;
    type Model = bridge::Model;
    type ActiveModel = bridge::ActiveModel;

    fn id_column() -> ColumnOf<Self> {
        bridge::Column::Id
    }

    fn category_column() -> ColumnOf<Self> {
        bridge::Column::Condition
    }

    fn search_columns() -> [ColumnOf<Self>; 2] {
        [bridge::Column::Name, bridge::Column::Location]
    }

    fn new_row(new: NewBridge, now: DateTime<Utc>) -> bridge::ActiveModel {
        bridge::ActiveModel {
            name: Set(new.name),
            location: Set(new.location),
            length_meters: Set(new.length_meters),
            width_meters: Set(new.width_meters),
            max_load_rating_tons: Set(new.max_load_rating_tons),
            condition: Set(new.condition.as_str().to_owned()),
            last_inspection_date: Set(new.last_inspection_date),
            next_inspection_date: Set(new.next_inspection_date),
            year_built: Set(new.year_built),
            material: Set(new.material),
            notes: Set(new.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn patched_row(
        model: bridge::Model,
        patch: BridgePatch,
        now: DateTime<Utc>,
    ) -> bridge::ActiveModel {
        let mut am = model.into_active_model();
        assign(&mut am.name, patch.name);
        assign(&mut am.location, patch.location);
        assign(&mut am.length_meters, patch.length_meters);
        assign(&mut am.width_meters, patch.width_meters);
        assign(&mut am.max_load_rating_tons, patch.max_load_rating_tons);
        assign(
            &mut am.condition,
            patch.condition.map(|c| c.as_str().to_owned()),
        );
        assign_nullable(&mut am.last_inspection_date, patch.last_inspection_date);
        assign_nullable(&mut am.next_inspection_date, patch.next_inspection_date);
        assign_nullable(&mut am.year_built, patch.year_built);
        assign_nullable(&mut am.material, patch.material);
        assign_nullable(&mut am.notes, patch.notes);
        am.updated_at = Set(now);
        am
    }

    fn to_record(m: bridge::Model) -> Result<Bridge, DomainError> {
        let condition: BridgeCondition = stored_category(&m.condition, "bridge", m.id)?;
        Ok(Bridge {
            id: m.id,
            name: m.name,
            location: m.location,
            length_meters: m.length_meters,
            width_meters: m.width_meters,
            max_load_rating_tons: m.max_load_rating_tons,
            condition,
            last_inspection_date: m.last_inspection_date,
            next_inspection_date: m.next_inspection_date,
            year_built: m.year_built,
            material: m.material,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

impl ResourceTable for WaterQualitySample {
    type Entity = water_quality_sample::Entity;
    type Model = water_quality_sample::Model;
    type ActiveModel = water_quality_sample::ActiveModel;

    fn id_column() -> ColumnOf<Self> {
        water_quality_sample::Column::Id
    }

    fn category_column() -> ColumnOf<Self> {
        water_quality_sample::Column::Status
    }

    fn search_columns() -> [ColumnOf<Self>; 2] {
        [
            water_quality_sample::Column::SiteName,
            water_quality_sample::Column::Location,
        ]
    }

    fn date_column() -> Option<ColumnOf<Self>> {
        Some(water_quality_sample::Column::SampleDate)
    }

    fn new_row(new: NewSample, now: DateTime<Utc>) -> water_quality_sample::ActiveModel {
        water_quality_sample::ActiveModel {
            site_name: Set(new.site_name),
            location: Set(new.location),
            sample_date: Set(new.sample_date),
            ph: Set(new.readings.ph),
            turbidity_ntu: Set(new.readings.turbidity_ntu),
            dissolved_oxygen_mg_l: Set(new.readings.dissolved_oxygen_mg_l),
            nitrates_mg_l: Set(new.readings.nitrates_mg_l),
            e_coli_count: Set(new.readings.e_coli_count),
            status: Set(new.status.as_str().to_owned()),
            notes: Set(new.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    fn patched_row(
        model: water_quality_sample::Model,
        patch: SamplePatch,
        now: DateTime<Utc>,
    ) -> water_quality_sample::ActiveModel {
        let mut am = model.into_active_model();
        assign(&mut am.site_name, patch.site_name);
        assign(&mut am.location, patch.location);
        assign(&mut am.sample_date, patch.sample_date);
        assign_nullable(&mut am.ph, patch.readings.ph);
        assign_nullable(&mut am.turbidity_ntu, patch.readings.turbidity_ntu);
        assign_nullable(
            &mut am.dissolved_oxygen_mg_l,
            patch.readings.dissolved_oxygen_mg_l,
        );
        assign_nullable(&mut am.nitrates_mg_l, patch.readings.nitrates_mg_l);
        assign_nullable(&mut am.e_coli_count, patch.readings.e_coli_count);
        assign(&mut am.status, patch.status.map(|s| s.as_str().to_owned()));
        assign_nullable(&mut am.notes, patch.notes);
        am.updated_at = Set(now);
        am
    }

    fn to_record(m: water_quality_sample::Model) -> Result<WaterQualitySample, DomainError> {
        let status: WaterQualityStatus = stored_category(&m.status, "sample", m.id)?;
        Ok(WaterQualitySample {
            id: m.id,
            site_name: m.site_name,
            location: m.location,
            sample_date: m.sample_date,
            readings: Readings {
                ph: m.ph,
                turbidity_ntu: m.turbidity_ntu,
                dissolved_oxygen_mg_l: m.dissolved_oxygen_mg_l,
                nitrates_mg_l: m.nitrates_mg_l,
                e_coli_count: m.e_coli_count,
            },
            status,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}
