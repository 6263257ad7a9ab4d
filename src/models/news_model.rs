use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::topic_model::TopicResponse;

#[derive(Deserialize, Validate)]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Derived from the title when absent. Must be unique within the
    /// calendar day of pub_date either way.
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,

    /// Topic public id; the default topic is used when absent.
    pub topic: Option<Uuid>,

    pub is_published: Option<bool>,
    pub pub_date: Option<chrono::DateTime<chrono::Utc>>,

    pub author: Option<String>,
    pub source: Option<String>,
    #[validate(url(message = "Source URL must be a valid URL"))]
    pub source_url: Option<String>,

    pub images: Option<Vec<String>>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub topic: Option<Uuid>,
    pub is_published: Option<bool>,
    pub pub_date: Option<chrono::DateTime<chrono::Utc>>,
    pub author: Option<String>,
    pub source: Option<String>,
    #[validate(url(message = "Source URL must be a valid URL"))]
    pub source_url: Option<String>,
    /// Replaces the full image set when present.
    pub images: Option<Vec<String>>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NewsResponse {
    pub id: Uuid,
    pub topic: TopicResponse,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub is_published: bool,
    pub pub_date: chrono::DateTime<chrono::Utc>,
    pub created: chrono::DateTime<chrono::Utc>,
    pub updated: chrono::DateTime<chrono::Utc>,
    pub author: String,
    pub source: String,
    pub source_url: String,
    pub images: Vec<String>,
    /// Canonical detail path (topic-less for the default topic).
    pub url: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub num_pages: u64,
}

/// Archive index context: the current page plus the distinct years present
/// in the whole published set, for the jump menu.
#[derive(Serialize, Debug)]
pub struct ArchiveResponse {
    pub latest: Vec<NewsResponse>,
    pub date_list: Vec<i32>,
    pub meta: PaginationMeta,
}

#[derive(Serialize, Debug)]
pub struct TopicArchiveResponse {
    pub topic: TopicResponse,
    pub latest: Vec<NewsResponse>,
    pub meta: PaginationMeta,
}

#[derive(Serialize, Debug)]
pub struct DateArchiveResponse {
    pub latest: Vec<NewsResponse>,
    pub meta: PaginationMeta,
}

/// Detail context: the resolved item plus the flat sidebar listing,
/// independent of the route's filtered subset.
#[derive(Serialize, Debug)]
pub struct DetailResponse {
    pub news: NewsResponse,
    pub all_news: Vec<NewsResponse>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}
