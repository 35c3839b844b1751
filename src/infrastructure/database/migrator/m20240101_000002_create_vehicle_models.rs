//! Create vehicle_models table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleModels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleModels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VehicleModels::Make).string().not_null())
                    .col(ColumnDef::new(VehicleModels::ModelName).string().not_null())
                    .col(ColumnDef::new(VehicleModels::Year).integer().not_null())
                    .col(ColumnDef::new(VehicleModels::Capacity).integer().not_null())
                    .col(ColumnDef::new(VehicleModels::Colour).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleModels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum VehicleModels {
    Table,
    Id,
    Make,
    ModelName,
    Year,
    Capacity,
    Colour,
}
