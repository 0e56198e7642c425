use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub duration: Option<i32>,
    pub release_date: Option<Date>,
    pub lyrics: Option<String>,
    pub cover_art_url: Option<String>,
    pub audio_url: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::song_genres::Entity")]
    SongGenres,
}

impl Related<super::song_genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SongGenres.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
