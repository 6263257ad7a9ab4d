use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Row id of the seeded default topic. News created without an explicit
/// topic land here, and canonical URLs omit the topic segment for it.
pub const DEFAULT_TOPIC_ID: i64 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i64,
    #[sea_orm(unique, index)]
    pub public_id: Uuid,

    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::news::Entity")]
    News,
    #[sea_orm(has_many = "super::widget_config::Entity")]
    WidgetConfig,
}

impl Related<super::news::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::News.def()
    }
}

impl Related<super::widget_config::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WidgetConfig.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
