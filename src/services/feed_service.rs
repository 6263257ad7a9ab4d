use chrono::{DateTime, Utc};
use rss::{Channel, ChannelBuilder, ItemBuilder};
use sea_orm::*;

use crate::entities::{news, topic, topic::DEFAULT_TOPIC_ID};
use crate::services::news_service::NewsService;
use crate::services::{db_err, ServiceError};

pub struct FeedService;

impl FeedService {
    /// Syndication projection of the topic-unfiltered published set,
    /// newest first, one archive page worth of entries.
    pub async fn channel(
        db: &DatabaseConnection,
        base_url: &str,
        item_count: u64,
        now: DateTime<Utc>,
    ) -> Result<Channel, ServiceError> {
        let entries = NewsService::published(now)
            .order_by_desc(news::Column::PubDate)
            .limit(item_count)
            .find_also_related(topic::Entity)
            .all(db)
            .await
            .map_err(db_err)?;

        Ok(Self::build_channel(base_url, entries))
    }

    pub fn build_channel(
        base_url: &str,
        entries: Vec<(news::Model, Option<topic::Model>)>,
    ) -> Channel {
        let items = entries
            .into_iter()
            .map(|(item, topic)| {
                let path = match &topic {
                    Some(t) if t.id != DEFAULT_TOPIC_ID => item.canonical_path(Some(&t.slug)),
                    _ => item.canonical_path(None),
                };
                let description = if item.excerpt.is_empty() {
                    item.content.clone()
                } else {
                    item.excerpt.clone()
                };

                ItemBuilder::default()
                    .title(Some(item.title.clone()))
                    .link(Some(format!("{}{}", base_url, path)))
                    .description(Some(description))
                    .pub_date(Some(item.pub_date.to_rfc2822()))
                    .build()
            })
            .collect::<Vec<_>>();

        ChannelBuilder::default()
            .title("News".to_string())
            .link(format!("{}/news", base_url))
            .description("Latest news".to_string())
            .items(items)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn sample_topic(id: i64, slug: &str) -> topic::Model {
        topic::Model {
            id,
            public_id: Uuid::nil(),
            title: slug.to_string(),
            slug: slug.to_string(),
        }
    }

    fn sample_news(slug: &str, topic_id: i64, excerpt: &str) -> news::Model {
        let pub_date = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        news::Model {
            id: 1,
            public_id: Uuid::nil(),
            topic_id,
            title: format!("title of {}", slug),
            slug: slug.to_string(),
            excerpt: excerpt.to_string(),
            content: "full content".to_string(),
            is_published: true,
            pub_date,
            created: pub_date,
            updated: pub_date,
            author: String::new(),
            source: String::new(),
            source_url: String::new(),
        }
    }

    #[test]
    fn default_topic_entries_use_the_short_path() {
        let entries = vec![(sample_news("b-slug", 1, "teaser"), Some(sample_topic(1, "general")))];
        let channel = FeedService::build_channel("http://example.org", entries);

        assert_eq!(channel.items().len(), 1);
        let item = &channel.items()[0];
        assert_eq!(
            item.link(),
            Some("http://example.org/news/2024/01/05/b-slug")
        );
        assert_eq!(item.description(), Some("teaser"));
    }

    #[test]
    fn other_topics_are_addressed_through_their_topic() {
        let entries = vec![(sample_news("b-slug", 2, ""), Some(sample_topic(2, "sports")))];
        let channel = FeedService::build_channel("http://example.org", entries);

        let item = &channel.items()[0];
        assert_eq!(
            item.link(),
            Some("http://example.org/news/by_topic/sports/2024/01/05/b-slug")
        );
        // content stands in when there is no excerpt
        assert_eq!(item.description(), Some("full content"));
    }
}
