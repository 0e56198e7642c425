use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_genres::Entity")]
    MovieGenres,
    #[sea_orm(has_many = "super::tv_series_genres::Entity")]
    TvSeriesGenres,
    #[sea_orm(has_many = "super::song_genres::Entity")]
    SongGenres,
}

impl Related<super::movie_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieGenres.def()
    }
}

impl Related<super::tv_series_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TvSeriesGenres.def()
    }
}

impl Related<super::song_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SongGenres.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
