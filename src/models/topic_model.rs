use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Derived from the title when absent. Globally unique.
    pub slug: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TopicResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

/// One navigation entry of the news menu projection.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MenuNode {
    pub label: String,
    pub target: String,
}
