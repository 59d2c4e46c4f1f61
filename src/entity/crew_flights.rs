use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crew_flights")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub crew_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub flight_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::crews::Entity",
        from = "Column::CrewId",
        to = "super::crews::Column::Id"
    )]
    Crews,
    #[sea_orm(
        belongs_to = "super::flights::Entity",
        from = "Column::FlightId",
        to = "super::flights::Column::Id"
    )]
    Flights,
}

impl Related<super::crews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crews.def()
    }
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
