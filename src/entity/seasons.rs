use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "seasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub series_id: Uuid,
    pub season_number: i32,
    pub title: Option<String>,
    pub episode_count: i32,
    pub release_date: Option<Date>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tv_series::Entity",
        from = "Column::SeriesId",
        to = "super::tv_series::Column::Id"
    )]
    TvSeries,
    #[sea_orm(has_many = "super::episodes::Entity")]
    Episodes,
}

impl Related<super::tv_series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TvSeries.def()
    }
}

impl Related<super::episodes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
