use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bridges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bridges::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bridges::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Bridges::Location).string_len(300).not_null())
                    .col(ColumnDef::new(Bridges::LengthMeters).double().not_null())
                    .col(ColumnDef::new(Bridges::WidthMeters).double().not_null())
                    .col(ColumnDef::new(Bridges::MaxLoadRatingTons).double().not_null())
                    .col(ColumnDef::new(Bridges::Condition).string_len(16).not_null())
                    .col(ColumnDef::new(Bridges::LastInspectionDate).date())
                    .col(ColumnDef::new(Bridges::NextInspectionDate).date())
                    .col(ColumnDef::new(Bridges::YearBuilt).string_len(4))
                    .col(ColumnDef::new(Bridges::Material).string_len(100))
                    .col(ColumnDef::new(Bridges::Notes).text())
                    .col(
                        ColumnDef::new(Bridges::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bridges::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bridges_name")
                    .table(Bridges::Table)
                    .col(Bridges::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WaterQualitySamples::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaterQualitySamples::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WaterQualitySamples::SiteName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterQualitySamples::Location)
                            .string_len(300)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaterQualitySamples::SampleDate).date().not_null())
                    .col(ColumnDef::new(WaterQualitySamples::Ph).double())
                    .col(ColumnDef::new(WaterQualitySamples::TurbidityNtu).double())
                    .col(ColumnDef::new(WaterQualitySamples::DissolvedOxygenMgL).double())
                    .col(ColumnDef::new(WaterQualitySamples::NitratesMgL).double())
                    .col(ColumnDef::new(WaterQualitySamples::EColiCount).integer())
                    .col(
                        ColumnDef::new(WaterQualitySamples::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaterQualitySamples::Notes).text())
                    .col(
                        ColumnDef::new(WaterQualitySamples::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WaterQualitySamples::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_water_quality_samples_site_name")
                    .table(WaterQualitySamples::Table)
                    .col(WaterQualitySamples::SiteName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WaterQualitySamples::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bridges::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bridges {
    Table,
    Id,
    Name,
    Location,
    LengthMeters,
    WidthMeters,
    MaxLoadRatingTons,
    Condition,
    LastInspectionDate,
    NextInspectionDate,
    YearBuilt,
    Material,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WaterQualitySamples {
    Table,
    Id,
    SiteName,
    Location,
    SampleDate,
    Ph,
    TurbidityNtu,
    #[sea_orm(iden = "dissolved_oxygen_mg_l")]
    DissolvedOxygenMgL,
    #[sea_orm(iden = "nitrates_mg_l")]
    NitratesMgL,
    #[sea_orm(iden = "e_coli_count")]
    EColiCount,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
