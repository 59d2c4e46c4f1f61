use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "flights")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub route_id: Uuid,
    pub airplane_id: Uuid,
    pub departure_time: DateTimeWithTimeZone,
    pub arrival_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::routes::Entity",
        from = "Column::RouteId",
        to = "super::routes::Column::Id"
    )]
    Routes,
    #[sea_orm(
        belongs_to = "super::airplanes::Entity",
        from = "Column::AirplaneId",
        to = "super::airplanes::Column::Id"
    )]
    Airplanes,
    #[sea_orm(has_many = "super::tickets::Entity")]
    Tickets,
    #[sea_orm(has_many = "super::crew_flights::Entity")]
    CrewFlights,
}

impl Related<super::routes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Routes.def()
    }
}

impl Related<super::airplanes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Airplanes.def()
    }
}

impl Related<super::tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
