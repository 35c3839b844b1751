//! Vehicle entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub model_id: i32,
    pub locked: bool,
    #[sea_orm(nullable)]
    pub cost_per_hour: Option<f64>,
    #[sea_orm(nullable)]
    pub latitude: Option<f64>,
    #[sea_orm(nullable)]
    pub longitude: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle_model::Entity",
        from = "Column::ModelId",
        to = "super::vehicle_model::Column::Id"
    )]
    VehicleModel,
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::vehicle_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VehicleModel.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
