//! Water-quality samples taken at monitoring sites.
//!
//! Sensor readings are stored as reported; no plausibility ranges are applied.

use chrono::{DateTime, NaiveDate, Utc};

use super::patch::FieldPatch;
use super::resource::{Categorical, RecordId, Resource};
use super::validation::{ValidationErrors, Validator};

pub struct SampleFields;

impl SampleFields {
    pub const SITE_NAME: &'static str = "site_name";
    pub const LOCATION: &'static str = "location";
    pub const SAMPLE_DATE: &'static str = "sample_date";
    pub const STATUS: &'static str = "status";
    pub const NOTES: &'static str = "notes";
}

const SITE_NAME_MAX: usize = 200;
const LOCATION_MAX: usize = 300;
const NOTES_MAX: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaterQualityStatus {
    Good,
    Fair,
    Poor,
    Unsafe,
}

impl Categorical for WaterQualityStatus {
    const ALL: &'static [Self] = &[Self::Good, Self::Fair, Self::Poor, Self::Unsafe];

    fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Unsafe => "unsafe",
        }
    }
}

/// Optional sensor readings of one sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    pub ph: Option<f64>,
    pub turbidity_ntu: Option<f64>,
    pub dissolved_oxygen_mg_l: Option<f64>,
    pub nitrates_mg_l: Option<f64>,
    /// Colony-forming units.
    pub e_coli_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterQualitySample {
    pub id: RecordId,
    pub site_name: String,
    pub location: String,
    pub sample_date: NaiveDate,
    pub readings: Readings,
    pub status: WaterQualityStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct SampleDraft {
    pub site_name: Option<String>,
    pub location: Option<String>,
    pub sample_date: Option<NaiveDate>,
    pub readings: Readings,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSample {
    pub site_name: String,
    pub location: String,
    pub sample_date: NaiveDate,
    pub readings: Readings,
    pub status: WaterQualityStatus,
    pub notes: Option<String>,
}

/// Three-state changes to the sensor readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingsPatch {
    pub ph: FieldPatch<f64>,
    pub turbidity_ntu: FieldPatch<f64>,
    pub dissolved_oxygen_mg_l: FieldPatch<f64>,
    pub nitrates_mg_l: FieldPatch<f64>,
    pub e_coli_count: FieldPatch<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct SampleChanges {
    pub site_name: FieldPatch<String>,
    pub location: FieldPatch<String>,
    pub sample_date: FieldPatch<NaiveDate>,
    pub readings: ReadingsPatch,
    pub status: FieldPatch<String>,
    pub notes: FieldPatch<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplePatch {
    pub site_name: Option<String>,
    pub location: Option<String>,
    pub sample_date: Option<NaiveDate>,
    pub readings: ReadingsPatch,
    pub status: Option<WaterQualityStatus>,
    pub notes: FieldPatch<String>,
}

impl Resource for WaterQualitySample {
    const KIND: &'static str = "Sample";

    type Record = WaterQualitySample;
    type Draft = SampleDraft;
    type New = NewSample;
    type Changes = SampleChanges;
    type Patch = SamplePatch;
    type Category = WaterQualityStatus;

    fn id(record: &WaterQualitySample) -> RecordId {
        record.id
    }

    fn validate_new(draft: SampleDraft) -> Result<NewSample, ValidationErrors> {
        let mut v = Validator::new();

        let site_name = v.required_text(SampleFields::SITE_NAME, draft.site_name, SITE_NAME_MAX);
        let location = v.required_text(SampleFields::LOCATION, draft.location, LOCATION_MAX);
        let sample_date = v.required(SampleFields::SAMPLE_DATE, draft.sample_date);
        let status = v.required_category(SampleFields::STATUS, draft.status);
        v.optional_text(SampleFields::NOTES, draft.notes.as_deref(), NOTES_MAX);

        match (site_name, location, sample_date, status) {
            (Some(site_name), Some(location), Some(sample_date), Some(status)) if v.is_clean() => {
                Ok(NewSample {
                    site_name,
                    location,
                    sample_date,
                    readings: draft.readings,
                    status,
                    notes: draft.notes,
                })
            }
            _ => Err(v.into_errors()),
        }
    }

    fn validate_changes(changes: SampleChanges) -> Result<SamplePatch, ValidationErrors> {
        let mut v = Validator::new();

        let site_name = v.patch_text(SampleFields::SITE_NAME, changes.site_name, SITE_NAME_MAX);
        let location = v.patch_text(SampleFields::LOCATION, changes.location, LOCATION_MAX);
        let sample_date = v.patch_required(SampleFields::SAMPLE_DATE, changes.sample_date);
        let status = v.patch_category(SampleFields::STATUS, changes.status);
        v.patch_optional_text(SampleFields::NOTES, &changes.notes, NOTES_MAX);
        v.finish()?;

        Ok(SamplePatch {
            site_name,
            location,
            sample_date,
            readings: changes.readings,
            status,
            notes: changes.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ViolationCode;

    fn draft() -> SampleDraft {
        SampleDraft {
            site_name: Some("River Site A".to_owned()),
            location: Some("North Bank".to_owned()),
            sample_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            readings: Readings {
                ph: Some(7.2),
                e_coli_count: Some(12),
                ..Readings::default()
            },
            status: Some("good".to_owned()),
            notes: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        let new = WaterQualitySample::validate_new(draft()).unwrap();
        assert_eq!(new.status, WaterQualityStatus::Good);
        assert_eq!(new.readings.ph, Some(7.2));
        assert_eq!(new.readings.turbidity_ntu, None);
    }

    #[test]
    fn readings_are_not_range_checked() {
        let new = WaterQualitySample::validate_new(SampleDraft {
            readings: Readings {
                ph: Some(42.0),
                nitrates_mg_l: Some(-3.0),
                e_coli_count: Some(-1),
                ..Readings::default()
            },
            ..draft()
        })
        .unwrap();
        assert_eq!(new.readings.ph, Some(42.0));
    }

    #[test]
    fn missing_date_and_unknown_status_are_both_reported() {
        let errors = WaterQualitySample::validate_new(SampleDraft {
            sample_date: None,
            status: Some("excellent".to_owned()),
            ..draft()
        })
        .unwrap_err();
        assert!(errors.has(SampleFields::SAMPLE_DATE, ViolationCode::Required));
        assert!(errors.has(SampleFields::STATUS, ViolationCode::InvalidChoice));
        assert_eq!(errors.violations().len(), 2);
    }

    #[test]
    fn notes_longer_than_limit_are_rejected() {
        let errors = WaterQualitySample::validate_new(SampleDraft {
            notes: Some("x".repeat(1001)),
            ..draft()
        })
        .unwrap_err();
        assert!(errors.has(SampleFields::NOTES, ViolationCode::TooLong));

        assert!(
            WaterQualitySample::validate_new(SampleDraft {
                notes: Some("x".repeat(1000)),
                ..draft()
            })
            .is_ok()
        );
    }

    #[test]
    fn readings_can_be_cleared_but_sample_date_cannot() {
        let patch = WaterQualitySample::validate_changes(SampleChanges {
            readings: ReadingsPatch {
                ph: FieldPatch::Clear,
                ..ReadingsPatch::default()
            },
            ..SampleChanges::default()
        })
        .unwrap();
        assert_eq!(patch.readings.ph, FieldPatch::Clear);

        let errors = WaterQualitySample::validate_changes(SampleChanges {
            sample_date: FieldPatch::Clear,
            site_name: FieldPatch::Set(String::new()),
            ..SampleChanges::default()
        })
        .unwrap_err();
        assert!(errors.has(SampleFields::SAMPLE_DATE, ViolationCode::NotNullable));
        assert!(errors.has(SampleFields::SITE_NAME, ViolationCode::TooShort));
    }
}
