use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entities::topic;
use crate::models::topic_model::MenuNode;
use crate::services::{db_err, ServiceError};

pub struct MenuService;

impl MenuService {
    /// Navigation projection: one node per topic, re-derived on every call.
    pub async fn nodes(db: &DatabaseConnection) -> Result<Vec<MenuNode>, ServiceError> {
        let topics = topic::Entity::find().all(db).await.map_err(db_err)?;
        Ok(Self::nodes_for(&topics))
    }

    pub fn nodes_for(topics: &[topic::Model]) -> Vec<MenuNode> {
        topics
            .iter()
            .map(|t| MenuNode {
                label: t.title.clone(),
                target: format!("/news/by_topic/{}", t.slug),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn one_node_per_topic_in_stored_order() {
        let topics = vec![
            topic::Model {
                id: 1,
                public_id: Uuid::nil(),
                title: "General".to_string(),
                slug: "general".to_string(),
            },
            topic::Model {
                id: 2,
                public_id: Uuid::nil(),
                title: "Sports".to_string(),
                slug: "sports".to_string(),
            },
        ];

        let nodes = MenuService::nodes_for(&topics);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].label, "General");
        assert_eq!(nodes[0].target, "/news/by_topic/general");
        assert_eq!(nodes[1].target, "/news/by_topic/sports");
    }

    #[test]
    fn no_topics_means_an_empty_menu() {
        assert!(MenuService::nodes_for(&[]).is_empty());
    }
}
