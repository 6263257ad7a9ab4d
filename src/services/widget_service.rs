use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::entities::{news, topic, widget_config};
use crate::models::widget_model::*;
use crate::services::news_service::NewsService;
use crate::services::topic_service::TopicService;
use crate::services::{db_err, ServiceError};

pub struct WidgetService;

impl WidgetService {
    pub async fn create_config(
        db: &DatabaseConnection,
        payload: CreateWidgetConfigRequest,
    ) -> Result<WidgetConfigResponse, ServiceError> {
        let topic = match payload.topic {
            Some(public_id) => Some(
                topic::Entity::find()
                    .filter(topic::Column::PublicId.eq(public_id))
                    .one(db)
                    .await
                    .map_err(db_err)?
                    .ok_or((
                        StatusCode::BAD_REQUEST,
                        "TOPIC_NOT_FOUND",
                        format!("Topic {} not found", public_id),
                    ))?,
            ),
            None => None,
        };

        let config = widget_config::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            limit: Set(payload.limit),
            topic_id: Set(topic.as_ref().map(|t| t.id)),
            default_image: Set(payload.default_image),
        };

        let saved = config.insert(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to create widget config: {}", e),
            )
        })?;

        Ok(Self::map_config(saved, topic.as_ref()))
    }

    /// Renders one widget placement: published items, optionally restricted
    /// to the configured topic, newest first, truncated to the configured
    /// limit. Pure read; rendering twice with an unchanged store yields the
    /// same output.
    pub async fn render(
        db: &DatabaseConnection,
        public_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<WidgetRenderResponse, ServiceError> {
        let config = widget_config::Entity::find()
            .filter(widget_config::Column::PublicId.eq(public_id))
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or((
                StatusCode::NOT_FOUND,
                "WIDGET_NOT_FOUND",
                "Widget config not found".to_string(),
            ))?;

        let topic = match config.topic_id {
            Some(topic_id) => topic::Entity::find_by_id(topic_id)
                .one(db)
                .await
                .map_err(db_err)?,
            None => None,
        };

        let mut query = NewsService::published(now);
        if let Some(t) = &topic {
            query = query.filter(news::Column::TopicId.eq(t.id));
        }

        let rows = query
            .order_by_desc(news::Column::PubDate)
            .limit(config.limit.max(0) as u64)
            .all(db)
            .await
            .map_err(db_err)?;
        let latest = NewsService::map_listing(db, rows).await?;

        Ok(WidgetRenderResponse {
            config: Self::map_config(config, topic.as_ref()),
            latest,
        })
    }

    fn map_config(
        model: widget_config::Model,
        topic: Option<&topic::Model>,
    ) -> WidgetConfigResponse {
        WidgetConfigResponse {
            id: model.public_id,
            limit: model.limit,
            topic: topic.map(TopicService::map_to_response),
            default_image: model.default_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
    }

    fn sample_config(limit: i32, topic_id: Option<i64>) -> widget_config::Model {
        widget_config::Model {
            id: 1,
            public_id: Uuid::nil(),
            limit,
            topic_id,
            default_image: None,
        }
    }

    fn sample_topic(id: i64, slug: &str) -> topic::Model {
        topic::Model {
            id,
            public_id: Uuid::nil(),
            title: slug.to_string(),
            slug: slug.to_string(),
        }
    }

    fn sample_news(id: i64, topic_id: i64, pub_date: DateTime<Utc>) -> news::Model {
        news::Model {
            id,
            public_id: Uuid::nil(),
            topic_id,
            title: format!("news {}", id),
            slug: format!("news-{}", id),
            excerpt: String::new(),
            content: String::new(),
            is_published: true,
            pub_date,
            created: pub_date,
            updated: pub_date,
            author: String::new(),
            source: String::new(),
            source_url: String::new(),
        }
    }

    #[tokio::test]
    async fn render_fails_with_not_found_for_unknown_config() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<widget_config::Model>::new()])
            .into_connection();

        let err = WidgetService::render(&db, Uuid::nil(), now())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "WIDGET_NOT_FOUND");
    }

    #[tokio::test]
    async fn render_maps_rows_for_an_untopiced_config() {
        let date = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_config(5, None)]])
            .append_query_results([vec![sample_news(1, 1, date)]])
            .append_query_results([vec![sample_topic(1, "general")]])
            .append_query_results([Vec::<crate::entities::news_image::Model>::new()])
            .into_connection();

        let res = WidgetService::render(&db, Uuid::nil(), now()).await.unwrap();
        assert_eq!(res.config.limit, 5);
        assert!(res.config.topic.is_none());
        assert_eq!(res.latest.len(), 1);
        assert_eq!(res.latest[0].slug, "news-1");
    }

    #[tokio::test]
    async fn render_restricts_rows_to_the_configured_topic_and_limit() {
        let newer = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let older = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_config(2, Some(2))]])
            .append_query_results([vec![sample_topic(2, "sports")]])
            .append_query_results([vec![
                sample_news(1, 2, newer),
                sample_news(2, 2, older),
            ]])
            .append_query_results([vec![sample_topic(2, "sports")]])
            .append_query_results([Vec::<crate::entities::news_image::Model>::new()])
            .into_connection();

        let res = WidgetService::render(&db, Uuid::nil(), now()).await.unwrap();

        assert_eq!(
            res.config.topic.as_ref().map(|t| t.slug.as_str()),
            Some("sports")
        );
        assert!(res.latest.len() <= res.config.limit as usize);
        assert!(res.latest.iter().all(|n| n.topic.slug == "sports"));
        assert_eq!(res.latest[0].slug, "news-1");

        // the topic restriction and the cap land in the query itself
        let log = db.into_transaction_log();
        let news_query = format!("{:?}", log[2]);
        assert!(news_query.contains("topic_id"));
        assert!(news_query.contains("LIMIT"));
    }
}
