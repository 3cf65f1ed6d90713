//! Bridge records: structural inventory with inspection tracking.

use chrono::{DateTime, NaiveDate, Utc};

use super::patch::FieldPatch;
use super::resource::{Categorical, RecordId, Resource};
use super::validation::{ValidationErrors, Validator};

pub struct BridgeFields;

impl BridgeFields {
    pub const NAME: &'static str = "name";
    pub const LOCATION: &'static str = "location";
    pub const LENGTH_METERS: &'static str = "length_meters";
    pub const WIDTH_METERS: &'static str = "width_meters";
    pub const MAX_LOAD_RATING_TONS: &'static str = "max_load_rating_tons";
    pub const CONDITION: &'static str = "condition";
    pub const LAST_INSPECTION_DATE: &'static str = "last_inspection_date";
    pub const NEXT_INSPECTION_DATE: &'static str = "next_inspection_date";
    pub const YEAR_BUILT: &'static str = "year_built";
    pub const MATERIAL: &'static str = "material";
    pub const NOTES: &'static str = "notes";
}

const NAME_MAX: usize = 200;
const LOCATION_MAX: usize = 300;
const YEAR_BUILT_MAX: usize = 4;
const MATERIAL_MAX: usize = 100;
const NOTES_MAX: usize = 1000;

/// Condition rating from the latest inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeCondition {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl Categorical for BridgeCondition {
    const ALL: &'static [Self] = &[
        Self::Excellent,
        Self::Good,
        Self::Fair,
        Self::Poor,
        Self::Critical,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bridge {
    pub id: RecordId,
    pub name: String,
    pub location: String,
    pub length_meters: f64,
    pub width_meters: f64,
    pub max_load_rating_tons: f64,
    pub condition: BridgeCondition,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub year_built: Option<String>,
    pub material: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw creation input; required fields may still be missing.
#[derive(Debug, Clone, Default)]
pub struct BridgeDraft {
    pub name: Option<String>,
    pub location: Option<String>,
    pub length_meters: Option<f64>,
    pub width_meters: Option<f64>,
    pub max_load_rating_tons: Option<f64>,
    pub condition: Option<String>,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub year_built: Option<String>,
    pub material: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBridge {
    pub name: String,
    pub location: String,
    pub length_meters: f64,
    pub width_meters: f64,
    pub max_load_rating_tons: f64,
    pub condition: BridgeCondition,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub year_built: Option<String>,
    pub material: Option<String>,
    pub notes: Option<String>,
}

/// Raw partial-update input.
#[derive(Debug, Clone, Default)]
pub struct BridgeChanges {
    pub name: FieldPatch<String>,
    pub location: FieldPatch<String>,
    pub length_meters: FieldPatch<f64>,
    pub width_meters: FieldPatch<f64>,
    pub max_load_rating_tons: FieldPatch<f64>,
    pub condition: FieldPatch<String>,
    pub last_inspection_date: FieldPatch<NaiveDate>,
    pub next_inspection_date: FieldPatch<NaiveDate>,
    pub year_built: FieldPatch<String>,
    pub material: FieldPatch<String>,
    pub notes: FieldPatch<String>,
}

/// Validated partial update. Non-nullable fields are `None` when untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgePatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub length_meters: Option<f64>,
    pub width_meters: Option<f64>,
    pub max_load_rating_tons: Option<f64>,
    pub condition: Option<BridgeCondition>,
    pub last_inspection_date: FieldPatch<NaiveDate>,
    pub next_inspection_date: FieldPatch<NaiveDate>,
    pub year_built: FieldPatch<String>,
    pub material: FieldPatch<String>,
    pub notes: FieldPatch<String>,
}

impl Resource for Bridge {
    const KIND: &'static str = "Bridge";

    type Record = Bridge;
    type Draft = BridgeDraft;
    type New = NewBridge;
    type Changes = BridgeChanges;
    type Patch = BridgePatch;
    type Category = BridgeCondition;

    fn id(record: &Bridge) -> RecordId {
        record.id
    }

    fn validate_new(draft: BridgeDraft) -> Result<NewBridge, ValidationErrors> {
        let mut v = Validator::new();

        let name = v.required_text(BridgeFields::NAME, draft.name, NAME_MAX);
        let location = v.required_text(BridgeFields::LOCATION, draft.location, LOCATION_MAX);
        let length_meters = v.required_positive(BridgeFields::LENGTH_METERS, draft.length_meters);
        let width_meters = v.required_positive(BridgeFields::WIDTH_METERS, draft.width_meters);
        let max_load_rating_tons = v.required_positive(
            BridgeFields::MAX_LOAD_RATING_TONS,
            draft.max_load_rating_tons,
        );
        let condition = v.required_category(BridgeFields::CONDITION, draft.condition);
        v.optional_text(BridgeFields::YEAR_BUILT, draft.year_built.as_deref(), YEAR_BUILT_MAX);
        v.optional_text(BridgeFields::MATERIAL, draft.material.as_deref(), MATERIAL_MAX);
        v.optional_text(BridgeFields::NOTES, draft.notes.as_deref(), NOTES_MAX);

        match (
            name,
            location,
            length_meters,
            width_meters,
            max_load_rating_tons,
            condition,
        ) {
            (
                Some(name),
                Some(location),
                Some(length_meters),
                Some(width_meters),
                Some(max_load_rating_tons),
                Some(condition),
            ) if v.is_clean() => Ok(NewBridge {
                name,
                location,
                length_meters,
                width_meters,
                max_load_rating_tons,
                condition,
                last_inspection_date: draft.last_inspection_date,
                next_inspection_date: draft.next_inspection_date,
                year_built: draft.year_built,
                material: draft.material,
                notes: draft.notes,
            }),
            _ => Err(v.into_errors()),
        }
    }

    fn validate_changes(changes: BridgeChanges) -> Result<BridgePatch, ValidationErrors> {
        let mut v = Validator::new();

        let name = v.patch_text(BridgeFields::NAME, changes.name, NAME_MAX);
        let location = v.patch_text(BridgeFields::LOCATION, changes.location, LOCATION_MAX);
        let length_meters = v.patch_positive(BridgeFields::LENGTH_METERS, changes.length_meters);
        let width_meters = v.patch_positive(BridgeFields::WIDTH_METERS, changes.width_meters);
        let max_load_rating_tons = v.patch_positive(
            BridgeFields::MAX_LOAD_RATING_TONS,
            changes.max_load_rating_tons,
        );
        let condition = v.patch_category(BridgeFields::CONDITION, changes.condition);
        v.patch_optional_text(BridgeFields::YEAR_BUILT, &changes.year_built, YEAR_BUILT_MAX);
        v.patch_optional_text(BridgeFields::MATERIAL, &changes.material, MATERIAL_MAX);
        v.patch_optional_text(BridgeFields::NOTES, &changes.notes, NOTES_MAX);
        v.finish()?;

        Ok(BridgePatch {
            name,
            location,
            length_meters,
            width_meters,
            max_load_rating_tons,
            condition,
            last_inspection_date: changes.last_inspection_date,
            next_inspection_date: changes.next_inspection_date,
            year_built: changes.year_built,
            material: changes.material,
            notes: changes.notes,
        })
    }
}
