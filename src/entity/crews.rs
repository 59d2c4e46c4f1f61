use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::crew_flights::Entity")]
    CrewFlights,
}

impl Related<super::crew_flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CrewFlights.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
