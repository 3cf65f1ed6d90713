#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::api::rest::dto::ListParams;
    use crate::domain::bridge::{BridgeChanges, BridgeCondition};
    use crate::domain::patch::FieldPatch;
    use crate::domain::resource::Categorical;
    use crate::domain::validation::ViolationCode;
    use crate::domain::water_quality::{SampleChanges, SampleDraft};
    use chrono::NaiveDate;

    #[test]
    fn test_update_request_distinguishes_missing_from_null() {
        let req: dto::UpdateBridgeReq =
            serde_json::from_str(r#"{"condition": "fair", "notes": null}"#).unwrap();

        let changes: BridgeChanges = req.into();

        assert_eq!(changes.condition, FieldPatch::Set("fair".to_owned()));
        assert_eq!(changes.notes, FieldPatch::Clear);
        assert_eq!(changes.name, FieldPatch::Unchanged);
        assert_eq!(changes.material, FieldPatch::Unchanged);
    }

    #[test]
    fn test_empty_update_request_changes_nothing() {
        let req: dto::UpdateSampleReq = serde_json::from_str("{}").unwrap();

        let changes: SampleChanges = req.into();

        assert!(changes.site_name.is_unchanged());
        assert!(changes.readings.ph.is_unchanged());
        assert!(changes.notes.is_unchanged());
    }

    #[test]
    fn test_create_sample_request_to_draft() {
        let req: dto::CreateSampleReq = serde_json::from_str(
            r#"{"site_name": "River A", "location": "Mill Road", "sample_date": "2024-05-01",
                "ph": 7.1, "e_coli_count": 40, "status": "fair"}"#,
        )
        .unwrap();

        let draft: SampleDraft = req.into();

        assert_eq!(draft.sample_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(draft.readings.ph, Some(7.1));
        assert_eq!(draft.readings.e_coli_count, Some(40));
        assert_eq!(draft.readings.nitrates_mg_l, None);
        assert_eq!(draft.status.as_deref(), Some("fair"));
    }

    #[test]
    fn test_wrong_json_type_fails_to_deserialize() {
        let result: Result<dto::CreateBridgeReq, _> =
            serde_json::from_str(r#"{"length_meters": "long"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_bridge_list_params_defaults() {
        let query = dto::BridgeListParams::default().into_list_query().unwrap();

        assert_eq!(query.page.skip, 0);
        assert_eq!(query.page.limit, 100);
        assert_eq!(query.category, None);
        assert!(query.dates.is_open());
    }

    #[test]
    fn test_bridge_list_params_parse_condition() {
        let params = dto::BridgeListParams {
            condition: Some("critical".to_owned()),
            search: Some("main".to_owned()),
            ..Default::default()
        };

        let query = params.into_list_query().unwrap();

        assert_eq!(query.category, Some(BridgeCondition::Critical));
        assert_eq!(query.search_term(), Some("main"));
    }

    #[test]
    fn test_list_params_reject_out_of_range_and_unknown_values() {
        let params = dto::SampleListParams {
            skip: Some(-1),
            limit: Some(501),
            status: Some("murky".to_owned()),
            ..Default::default()
        };

        let errors = params.into_list_query().unwrap_err();

        assert!(errors.has("skip", ViolationCode::OutOfRange));
        assert!(errors.has("limit", ViolationCode::OutOfRange));
        assert!(errors.has("status", ViolationCode::InvalidChoice));
    }

    #[test]
    fn test_sample_list_params_carry_date_range() {
        let params = dto::SampleListParams {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };

        let query = params.into_list_query().unwrap();

        assert_eq!(query.dates.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(query.dates.to, NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn test_record_dto_serializes_category_as_text() {
        let now = chrono::Utc::now();
        let dto = dto::BridgeDto {
            id: 1,
            name: "Old Mill".to_owned(),
            location: "Riverside".to_owned(),
            length_meters: 30.0,
            width_meters: 6.0,
            max_load_rating_tons: 12.0,
            condition: BridgeCondition::Excellent.as_str(),
            last_inspection_date: None,
            next_inspection_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            year_built: None,
            material: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["condition"], "excellent");
        assert_eq!(json["next_inspection_date"], "2025-03-01");
        assert!(json["notes"].is_null());
    }
}
