//! Create vehicles table
//!
//! Cars start locked; position columns stay NULL until the first report.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_vehicle_models::VehicleModels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Name).string().not_null())
                    .col(ColumnDef::new(Vehicles::ModelId).integer().not_null())
                    .col(
                        ColumnDef::new(Vehicles::Locked)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Vehicles::CostPerHour).double())
                    .col(ColumnDef::new(Vehicles::Latitude).double())
                    .col(ColumnDef::new(Vehicles::Longitude).double())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_model")
                            .from(Vehicles::Table, Vehicles::ModelId)
                            .to(VehicleModels::Table, VehicleModels::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    Name,
    ModelId,
    Locked,
    CostPerHour,
    Latitude,
    Longitude,
}
