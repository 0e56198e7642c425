use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tv_series")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    pub total_seasons: i32,
    pub total_episodes: i32,
    pub first_air_date: Option<Date>,
    pub last_air_date: Option<Date>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seasons::Entity")]
    Seasons,
    #[sea_orm(has_many = "super::tv_series_genres::Entity")]
    TvSeriesGenres,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::tv_series_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TvSeriesGenres.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
