use chrono::Datelike;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i64,
    #[sea_orm(unique, index)]
    pub public_id: Uuid,

    pub topic_id: i64,

    pub title: String,
    // Unique per calendar day of pub_date, not globally (service-enforced)
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub is_published: bool,
    pub pub_date: DateTimeUtc,

    pub created: DateTimeUtc,
    pub updated: DateTimeUtc,

    pub author: String,
    pub source: String,
    pub source_url: String,
}

impl Model {
    /// Publish-window predicate, evaluated against a caller-supplied instant
    /// so future-dated items become visible without any write.
    pub fn is_visible_at(&self, now: DateTimeUtc) -> bool {
        self.is_published && self.pub_date <= now
    }

    /// Canonical detail path. Items on the default topic use the short,
    /// topic-less route; everything else is addressed through its topic.
    pub fn canonical_path(&self, topic_slug: Option<&str>) -> String {
        let d = self.pub_date;
        match topic_slug {
            Some(topic) => format!(
                "/news/by_topic/{}/{:04}/{:02}/{:02}/{}",
                topic,
                d.year(),
                d.month(),
                d.day(),
                self.slug
            ),
            None => format!(
                "/news/{:04}/{:02}/{:02}/{}",
                d.year(),
                d.month(),
                d.day(),
                self.slug
            ),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::topic::Entity",
        from = "Column::TopicId",
        to = "super::topic::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Topic,
    #[sea_orm(has_many = "super::news_image::Entity")]
    NewsImage,
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl Related<super::news_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewsImage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(is_published: bool, pub_date: DateTimeUtc) -> Model {
        Model {
            id: 1,
            public_id: Uuid::nil(),
            topic_id: 1,
            title: "Item".to_string(),
            slug: "item".to_string(),
            excerpt: String::new(),
            content: String::new(),
            is_published,
            pub_date,
            created: pub_date,
            updated: pub_date,
            author: String::new(),
            source: String::new(),
            source_url: String::new(),
        }
    }

    #[test]
    fn visibility_is_inclusive_at_the_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        assert!(item(true, now).is_visible_at(now));
    }

    #[test]
    fn future_dated_items_are_hidden() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 1).unwrap();
        assert!(!item(true, later).is_visible_at(now));
    }

    #[test]
    fn unpublished_items_are_hidden_regardless_of_date() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert!(!item(false, past).is_visible_at(now));
    }

    #[test]
    fn canonical_path_includes_topic_only_when_given() {
        let pub_date = Utc.with_ymd_and_hms(2024, 1, 5, 8, 30, 0).unwrap();
        let mut n = item(true, pub_date);
        n.slug = "b-slug".to_string();

        assert_eq!(n.canonical_path(None), "/news/2024/01/05/b-slug");
        assert_eq!(
            n.canonical_path(Some("sports")),
            "/news/by_topic/sports/2024/01/05/b-slug"
        );
    }
}
