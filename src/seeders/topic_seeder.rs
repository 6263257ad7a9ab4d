use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::entities::topic;
use crate::entities::topic::DEFAULT_TOPIC_ID;

pub async fn seed_default_topic(db: &DatabaseConnection) -> Result<(), String> {
    let exists = topic::Entity::find_by_id(DEFAULT_TOPIC_ID)
        .one(db)
        .await
        .map_err(|e| e.to_string())?;

    if exists.is_none() {
        let default_topic = topic::ActiveModel {
            id: Set(DEFAULT_TOPIC_ID),
            public_id: Set(Uuid::now_v7()),
            title: Set("General".to_string()),
            slug: Set("general".to_string()),
        };
        default_topic.insert(db).await.map_err(|e| e.to_string())?;
        tracing::info!("Seeded default topic");
    }

    Ok(())
}
