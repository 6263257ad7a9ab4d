use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::news_model::NewsResponse;
use crate::models::topic_model::TopicResponse;

#[derive(Deserialize, Validate)]
pub struct CreateWidgetConfigRequest {
    #[validate(range(min = 1, message = "Limit must be a positive integer"))]
    pub limit: i32,
    /// Topic public id; no topic restriction when absent.
    pub topic: Option<Uuid>,
    pub default_image: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct WidgetConfigResponse {
    pub id: Uuid,
    pub limit: i32,
    pub topic: Option<TopicResponse>,
    pub default_image: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct WidgetRenderResponse {
    pub config: WidgetConfigResponse,
    pub latest: Vec<NewsResponse>,
}
