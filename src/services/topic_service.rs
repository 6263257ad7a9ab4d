use axum::http::StatusCode;
use sea_orm::*;
use slug::slugify;
use uuid::Uuid;

use crate::entities::topic;
use crate::models::topic_model::{CreateTopicRequest, TopicResponse};
use crate::services::{db_err, ServiceError};

pub struct TopicService;

impl TopicService {
    pub async fn create_topic(
        db: &DatabaseConnection,
        payload: CreateTopicRequest,
    ) -> Result<TopicResponse, ServiceError> {
        let slug_value = match payload.slug {
            Some(s) => s,
            None => slugify(&payload.title),
        };

        let clash = topic::Entity::find()
            .filter(topic::Column::Slug.eq(&slug_value))
            .one(db)
            .await
            .map_err(db_err)?;
        if clash.is_some() {
            return Err((
                StatusCode::CONFLICT,
                "SLUG_TAKEN",
                format!("A topic with slug '{}' already exists", slug_value),
            ));
        }

        let new_topic = topic::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            title: Set(payload.title),
            slug: Set(slug_value),
        };

        let saved = new_topic.insert(db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to create topic: {}", e),
            )
        })?;

        Ok(Self::map_to_response(&saved))
    }

    pub async fn list_topics(db: &DatabaseConnection) -> Result<Vec<TopicResponse>, ServiceError> {
        let topics = topic::Entity::find().all(db).await.map_err(db_err)?;
        Ok(topics.iter().map(Self::map_to_response).collect())
    }

    pub fn map_to_response(model: &topic::Model) -> TopicResponse {
        TopicResponse {
            id: model.public_id,
            title: model.title.clone(),
            slug: model.slug.clone(),
        }
    }
}
