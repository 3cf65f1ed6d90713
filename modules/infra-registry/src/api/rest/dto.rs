use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::bridge::{Bridge, BridgeChanges, BridgeCondition, BridgeDraft, BridgeFields};
use crate::domain::resource::{Categorical, DateRange, ListQuery, Page, PageRequest, Resource};
use crate::domain::validation::{ValidationErrors, Validator};
use crate::domain::water_quality::{
    Readings, ReadingsPatch, SampleChanges, SampleDraft, SampleFields, WaterQualitySample,
    WaterQualityStatus,
};

/// Wire shapes of one registry.
pub trait RestResource: Resource {
    /// Collection path, e.g. `/api/bridges`.
    const PATH: &'static str;

    type Dto: Serialize + From<Self::Record> + Send + 'static;
    type CreateReq: DeserializeOwned + Into<Self::Draft> + Send + 'static;
    type UpdateReq: DeserializeOwned + Into<Self::Changes> + Send + 'static;
    type ListParams: DeserializeOwned + ListParams<Self::Category> + Send + 'static;
    type ListDto: Serialize + From<Page<Self::Dto>> + Send + 'static;
}

/// Query string of a list request.
pub trait ListParams<C> {
    /// # Errors
    /// Returns every out-of-range or unknown query value.
    fn into_list_query(self) -> Result<ListQuery<C>, ValidationErrors>;
}

/// Keeps `null` apart from a missing field: missing stays `None` through
/// `#[serde(default)]`, `null` becomes `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---- bridges ------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BridgeDto {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub length_meters: f64,
    pub width_meters: f64,
    pub max_load_rating_tons: f64,
    pub condition: &'static str,
    pub last_inspection_date: Option<NaiveDate>,
    pub next_inspection_date: Option<NaiveDate>,
    pub year_built: Option<String>,
    pub material: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBridgeReq {
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

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBridgeReq {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub length_meters: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub width_meters: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub max_load_rating_tons: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub condition: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_inspection_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub next_inspection_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub year_built: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub material: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub condition: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BridgeListDto {
    pub total: u64,
    pub bridges: Vec<BridgeDto>,
}

impl From<Bridge> for BridgeDto {
    fn from(b: Bridge) -> Self {
        Self {
            id: b.id,
            name: b.name,
            location: b.location,
            length_meters: b.length_meters,
            width_meters: b.width_meters,
            max_load_rating_tons: b.max_load_rating_tons,
            condition: b.condition.as_str(),
            last_inspection_date: b.last_inspection_date,
            next_inspection_date: b.next_inspection_date,
            year_built: b.year_built,
            material: b.material,
            notes: b.notes,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

impl From<CreateBridgeReq> for BridgeDraft {
    fn from(req: CreateBridgeReq) -> Self {
        Self {
            name: req.name,
            location: req.location,
            length_meters: req.length_meters,
            width_meters: req.width_meters,
            max_load_rating_tons: req.max_load_rating_tons,
            condition: req.condition,
            last_inspection_date: req.last_inspection_date,
            next_inspection_date: req.next_inspection_date,
            year_built: req.year_built,
            material: req.material,
            notes: req.notes,
        }
    }
}

impl From<UpdateBridgeReq> for BridgeChanges {
    fn from(req: UpdateBridgeReq) -> Self {
        Self {
            name: req.name.into(),
            location: req.location.into(),
            length_meters: req.length_meters.into(),
            width_meters: req.width_meters.into(),
            max_load_rating_tons: req.max_load_rating_tons.into(),
            condition: req.condition.into(),
            last_inspection_date: req.last_inspection_date.into(),
            next_inspection_date: req.next_inspection_date.into(),
            year_built: req.year_built.into(),
            material: req.material.into(),
            notes: req.notes.into(),
        }
    }
}

impl From<Page<BridgeDto>> for BridgeListDto {
    fn from(page: Page<BridgeDto>) -> Self {
        Self {
            total: page.total,
            bridges: page.items,
        }
    }
}

impl ListParams<BridgeCondition> for BridgeListParams {
    fn into_list_query(self) -> Result<ListQuery<BridgeCondition>, ValidationErrors> {
        let mut v = Validator::new();
        let page = PageRequest::checked(&mut v, self.skip, self.limit);
        let category = v.optional_category(BridgeFields::CONDITION, self.condition.as_deref());
        v.finish()?;

        Ok(ListQuery {
            category,
            dates: DateRange::default(),
            search: self.search,
            page: page.unwrap_or_default(),
        })
    }
}

impl RestResource for Bridge {
    const PATH: &'static str = "/api/bridges";

    type Dto = BridgeDto;
    type CreateReq = CreateBridgeReq;
    type UpdateReq = UpdateBridgeReq;
    type ListParams = BridgeListParams;
    type ListDto = BridgeListDto;
}

// ---- water quality --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SampleDto {
    pub id: i32,
    pub site_name: String,
    pub location: String,
    pub sample_date: NaiveDate,
    pub ph: Option<f64>,
    pub turbidity_ntu: Option<f64>,
    pub dissolved_oxygen_mg_l: Option<f64>,
    pub nitrates_mg_l: Option<f64>,
    pub e_coli_count: Option<i32>,
    pub status: &'static str,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSampleReq {
    pub site_name: Option<String>,
    pub location: Option<String>,
    pub sample_date: Option<NaiveDate>,
    pub ph: Option<f64>,
    pub turbidity_ntu: Option<f64>,
    pub dissolved_oxygen_mg_l: Option<f64>,
    pub nitrates_mg_l: Option<f64>,
    pub e_coli_count: Option<i32>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSampleReq {
    #[serde(default, deserialize_with = "nullable")]
    pub site_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub sample_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub ph: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub turbidity_ntu: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub dissolved_oxygen_mg_l: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub nitrates_mg_l: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub e_coli_count: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleListDto {
    pub total: u64,
    pub samples: Vec<SampleDto>,
}

impl From<WaterQualitySample> for SampleDto {
    fn from(s: WaterQualitySample) -> Self {
        Self {
            id: s.id,
            site_name: s.site_name,
            location: s.location,
            sample_date: s.sample_date,
            ph: s.readings.ph,
            turbidity_ntu: s.readings.turbidity_ntu,
            dissolved_oxygen_mg_l: s.readings.dissolved_oxygen_mg_l,
            nitrates_mg_l: s.readings.nitrates_mg_l,
            e_coli_count: s.readings.e_coli_count,
            status: s.status.as_str(),
            notes: s.notes,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<CreateSampleReq> for SampleDraft {
    fn from(req: CreateSampleReq) -> Self {
        Self {
            site_name: req.site_name,
            location: req.location,
            sample_date: req.sample_date,
            readings: Readings {
                ph: req.ph,
                turbidity_ntu: req.turbidity_ntu,
                dissolved_oxygen_mg_l: req.dissolved_oxygen_mg_l,
                nitrates_mg_l: req.nitrates_mg_l,
                e_coli_count: req.e_coli_count,
            },
            status: req.status,
            notes: req.notes,
        }
    }
}

impl From<UpdateSampleReq> for SampleChanges {
    fn from(req: UpdateSampleReq) -> Self {
        Self {
            site_name: req.site_name.into(),
            location: req.location.into(),
            sample_date: req.sample_date.into(),
            readings: ReadingsPatch {
                ph: req.ph.into(),
                turbidity_ntu: req.turbidity_ntu.into(),
                dissolved_oxygen_mg_l: req.dissolved_oxygen_mg_l.into(),
                nitrates_mg_l: req.nitrates_mg_l.into(),
                e_coli_count: req.e_coli_count.into(),
            },
            status: req.status.into(),
            notes: req.notes.into(),
        }
    }
}

impl From<Page<SampleDto>> for SampleListDto {
    fn from(page: Page<SampleDto>) -> Self {
        Self {
            total: page.total,
            samples: page.items,
        }
    }
}

impl ListParams<WaterQualityStatus> for SampleListParams {
    fn into_list_query(self) -> Result<ListQuery<WaterQualityStatus>, ValidationErrors> {
        let mut v = Validator::new();
        let page = PageRequest::checked(&mut v, self.skip, self.limit);
        let category = v.optional_category(SampleFields::STATUS, self.status.as_deref());
        v.finish()?;

        Ok(ListQuery {
            category,
            dates: DateRange {
                from: self.start_date,
                to: self.end_date,
            },
            search: self.search,
            page: page.unwrap_or_default(),
        })
    }
}

impl RestResource for WaterQualitySample {
    const PATH: &'static str = "/api/water-quality";

    type Dto = SampleDto;
    type CreateReq = CreateSampleReq;
    type UpdateReq = UpdateSampleReq;
    type ListParams = SampleListParams;
    type ListDto = SampleListDto;
}
