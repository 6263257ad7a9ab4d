use std::collections::HashMap;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use slug::slugify;
use uuid::Uuid;

use crate::entities::{
    news,
    news::Entity as News,
    news_image, topic,
    topic::DEFAULT_TOPIC_ID,
};
use crate::models::news_model::*;
use crate::services::topic_service::TopicService;
use crate::services::{db_err, ServiceError};
use crate::utils::date_window;

pub struct NewsService;

impl NewsService {
    /// The published-selection filter: `is_published AND pub_date <= now`.
    /// Composable; every read surface narrows from this. Ordering is applied
    /// by the callers, not here.
    pub fn published(now: DateTime<Utc>) -> Select<News> {
        News::find()
            .filter(news::Column::IsPublished.eq(true))
            .filter(news::Column::PubDate.lte(now))
    }

    pub async fn archive_index(
        db: &DatabaseConnection,
        page_size: u64,
        page: u64,
        now: DateTime<Utc>,
    ) -> Result<ArchiveResponse, ServiceError> {
        let (rows, meta) = Self::fetch_page(db, Self::published(now), page, page_size).await?;
        let latest = Self::map_listing(db, rows).await?;

        // Distinct years across the whole published set, newest first,
        // for the archive jump menu. Deduplicated by the database rather
        // than by scanning every published row here.
        let date_list: Vec<i32> = Self::published(now)
            .select_only()
            .expr_as(
                Expr::cust(r#"DISTINCT EXTRACT(YEAR FROM "pub_date")::INTEGER"#),
                "year",
            )
            .order_by_desc(Expr::cust(r#""year""#))
            .into_tuple()
            .all(db)
            .await
            .map_err(db_err)?;

        Ok(ArchiveResponse {
            latest,
            date_list,
            meta,
        })
    }

    pub async fn topic_index(
        db: &DatabaseConnection,
        page_size: u64,
        topic_slug: &str,
        page: u64,
        now: DateTime<Utc>,
    ) -> Result<TopicArchiveResponse, ServiceError> {
        let topic = Self::resolve_topic(db, topic_slug).await?;

        let query = Self::published(now).filter(news::Column::TopicId.eq(topic.id));
        let (rows, meta) = Self::fetch_page(db, query, page, page_size).await?;
        let latest = Self::map_listing(db, rows).await?;

        Ok(TopicArchiveResponse {
            topic: TopicService::map_to_response(&topic),
            latest,
            meta,
        })
    }

    pub async fn date_archive(
        db: &DatabaseConnection,
        page_size: u64,
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
        page: u64,
        now: DateTime<Utc>,
    ) -> Result<DateArchiveResponse, ServiceError> {
        let (start, end) = match (month, day) {
            (None, None) => date_window::year_window(year),
            (Some(m), None) => date_window::month_window(year, m),
            (Some(m), Some(d)) => date_window::day_window(year, m, d),
            (None, Some(_)) => None,
        }
        .ok_or((
            StatusCode::NOT_FOUND,
            "ARCHIVE_NOT_FOUND",
            "No such calendar window".to_string(),
        ))?;

        let query = Self::published(now)
            .filter(news::Column::PubDate.gte(start))
            .filter(news::Column::PubDate.lt(end));
        let (rows, meta) = Self::fetch_page(db, query, page, page_size).await?;
        let latest = Self::map_listing(db, rows).await?;

        Ok(DateArchiveResponse { latest, meta })
    }

    pub async fn detail(
        db: &DatabaseConnection,
        sidebar_limit: u64,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
        topic_slug: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<DetailResponse, ServiceError> {
        let topic = match topic_slug {
            Some(s) => Some(Self::resolve_topic(db, s).await?),
            None => None,
        };

        let (start, end) = date_window::day_window(year, month, day).ok_or((
            StatusCode::NOT_FOUND,
            "NEWS_NOT_FOUND",
            "News item not found".to_string(),
        ))?;

        let mut query = Self::published(now)
            .filter(news::Column::PubDate.gte(start))
            .filter(news::Column::PubDate.lt(end))
            .filter(news::Column::Slug.eq(slug));
        if let Some(t) = &topic {
            query = query.filter(news::Column::TopicId.eq(t.id));
        }

        let matches = query.all(db).await.map_err(db_err)?;
        if matches.len() > 1 {
            // Per-day slug uniqueness is violated; this is a data fault,
            // not a resolvable route.
            tracing::error!(slug, year, month, day, "per-day slug uniqueness violated");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_CORRUPT",
                "Multiple news items share this slug and day".to_string(),
            ));
        }
        let item = matches.into_iter().next().ok_or((
            StatusCode::NOT_FOUND,
            "NEWS_NOT_FOUND",
            "News item not found".to_string(),
        ))?;

        let news = Self::map_listing(db, vec![item])
            .await?
            .into_iter()
            .next()
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_CORRUPT",
                "News item has no topic".to_string(),
            ))?;

        // Flat recency-ordered sidebar listing, unrelated to the
        // route's filtered subset.
        let sidebar_rows = News::find()
            .order_by_desc(news::Column::PubDate)
            .limit(sidebar_limit)
            .all(db)
            .await
            .map_err(db_err)?;
        let all_news = Self::map_listing(db, sidebar_rows).await?;

        Ok(DetailResponse { news, all_news })
    }

    pub async fn create_news(
        db: &DatabaseConnection,
        payload: CreateNewsRequest,
    ) -> Result<NewsResponse, ServiceError> {
        let topic = match payload.topic {
            Some(public_id) => topic::Entity::find()
                .filter(topic::Column::PublicId.eq(public_id))
                .one(db)
                .await
                .map_err(db_err)?
                .ok_or((
                    StatusCode::BAD_REQUEST,
                    "TOPIC_NOT_FOUND",
                    format!("Topic {} not found", public_id),
                ))?,
            None => topic::Entity::find_by_id(DEFAULT_TOPIC_ID)
                .one(db)
                .await
                .map_err(db_err)?
                .ok_or((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DEFAULT_TOPIC_MISSING",
                    "Default topic has not been seeded".to_string(),
                ))?,
        };

        let pub_date = payload.pub_date.unwrap_or_else(Utc::now);
        let slug_value = match payload.slug {
            Some(s) => s,
            None => slugify(&payload.title),
        };

        let txn = db.begin().await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TXN_ERR",
                "Transaction start failed".to_string(),
            )
        })?;

        Self::ensure_unique_slug_for_day(&txn, &slug_value, pub_date, None).await?;

        let stamp = Utc::now();
        let item = news::ActiveModel {
            id: NotSet,
            public_id: Set(Uuid::now_v7()),
            topic_id: Set(topic.id),
            title: Set(payload.title),
            slug: Set(slug_value),
            excerpt: Set(payload.excerpt.unwrap_or_default()),
            content: Set(payload.content.unwrap_or_default()),
            is_published: Set(payload.is_published.unwrap_or(true)),
            pub_date: Set(pub_date),
            created: Set(stamp),
            updated: Set(stamp),
            author: Set(payload.author.unwrap_or_default()),
            source: Set(payload.source.unwrap_or_default()),
            source_url: Set(payload.source_url.unwrap_or_default()),
        };

        let saved = item.insert(&txn).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to create news item: {}", e),
            )
        })?;

        let mut images = Vec::new();
        if let Some(list) = payload.images {
            for image in list {
                let row = news_image::ActiveModel {
                    id: NotSet,
                    news_id: Set(saved.id),
                    image: Set(image.clone()),
                };
                row.insert(&txn).await.map_err(|e| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_WRITE_ERR",
                        format!("Failed to attach image: {}", e),
                    )
                })?;
                images.push(image);
            }
        }

        txn.commit().await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TXN_COMMIT_ERR",
                "Transaction commit failed".to_string(),
            )
        })?;

        Ok(Self::map_to_response(saved, &topic, images))
    }

    pub async fn update_news(
        db: &DatabaseConnection,
        public_id: Uuid,
        payload: UpdateNewsRequest,
    ) -> Result<NewsResponse, ServiceError> {
        let existing = News::find()
            .filter(news::Column::PublicId.eq(public_id))
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or((
                StatusCode::NOT_FOUND,
                "NEWS_NOT_FOUND",
                "News item not found".to_string(),
            ))?;

        let topic = match payload.topic {
            Some(topic_public_id) => topic::Entity::find()
                .filter(topic::Column::PublicId.eq(topic_public_id))
                .one(db)
                .await
                .map_err(db_err)?
                .ok_or((
                    StatusCode::BAD_REQUEST,
                    "TOPIC_NOT_FOUND",
                    format!("Topic {} not found", topic_public_id),
                ))?,
            None => topic::Entity::find_by_id(existing.topic_id)
                .one(db)
                .await
                .map_err(db_err)?
                .ok_or((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATA_CORRUPT",
                    "News item has no topic".to_string(),
                ))?,
        };

        let next_slug = payload.slug.clone().unwrap_or_else(|| existing.slug.clone());
        let next_pub_date = payload.pub_date.unwrap_or(existing.pub_date);

        let txn = db.begin().await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TXN_ERR",
                "Transaction start failed".to_string(),
            )
        })?;

        // The per-day scope moves with slug and pub_date; re-check whenever
        // either changes.
        if next_slug != existing.slug || next_pub_date != existing.pub_date {
            Self::ensure_unique_slug_for_day(&txn, &next_slug, next_pub_date, Some(existing.id))
                .await?;
        }

        let news_id = existing.id;
        let mut active: news::ActiveModel = existing.into();

        if let Some(t) = payload.title {
            active.title = Set(t);
        }
        active.slug = Set(next_slug);
        active.pub_date = Set(next_pub_date);
        active.topic_id = Set(topic.id);
        if let Some(e) = payload.excerpt {
            active.excerpt = Set(e);
        }
        if let Some(c) = payload.content {
            active.content = Set(c);
        }
        if let Some(p) = payload.is_published {
            active.is_published = Set(p);
        }
        if let Some(a) = payload.author {
            active.author = Set(a);
        }
        if let Some(s) = payload.source {
            active.source = Set(s);
        }
        if let Some(u) = payload.source_url {
            active.source_url = Set(u);
        }
        active.updated = Set(Utc::now());

        let updated = active.update(&txn).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                format!("Failed to update news item: {}", e),
            )
        })?;

        if let Some(list) = &payload.images {
            news_image::Entity::delete_many()
                .filter(news_image::Column::NewsId.eq(news_id))
                .exec(&txn)
                .await
                .map_err(|_| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_WRITE_ERR",
                        "Failed to clear images".to_string(),
                    )
                })?;

            for image in list {
                let row = news_image::ActiveModel {
                    id: NotSet,
                    news_id: Set(news_id),
                    image: Set(image.clone()),
                };
                row.insert(&txn).await.map_err(|e| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DB_WRITE_ERR",
                        format!("Failed to attach image: {}", e),
                    )
                })?;
            }
        }

        txn.commit().await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TXN_COMMIT_ERR",
                "Transaction commit failed".to_string(),
            )
        })?;

        let images: Vec<String> = news_image::Entity::find()
            .filter(news_image::Column::NewsId.eq(news_id))
            .all(db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|i| i.image)
            .collect();

        Ok(Self::map_to_response(updated, &topic, images))
    }

    pub async fn delete_news(
        db: &DatabaseConnection,
        public_id: Uuid,
    ) -> Result<(), ServiceError> {
        let existing = News::find()
            .filter(news::Column::PublicId.eq(public_id))
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or((
                StatusCode::NOT_FOUND,
                "NEWS_NOT_FOUND",
                "News item not found".to_string(),
            ))?;

        // Images go with the owner via the cascade FK.
        News::delete_by_id(existing.id).exec(db).await.map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DB_WRITE_ERR",
                "Failed to delete news item".to_string(),
            )
        })?;

        Ok(())
    }

    async fn resolve_topic(
        db: &DatabaseConnection,
        slug: &str,
    ) -> Result<topic::Model, ServiceError> {
        topic::Entity::find()
            .filter(topic::Column::Slug.eq(slug))
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or((
                StatusCode::NOT_FOUND,
                "TOPIC_NOT_FOUND",
                format!("No topic with slug '{}'", slug),
            ))
    }

    /// Orders by pub_date DESC, counts, and fetches one page. Pages are
    /// 1-based; anything outside [1, num_pages] is NotFound rather than a
    /// silent empty page.
    async fn fetch_page(
        db: &DatabaseConnection,
        query: Select<News>,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<news::Model>, PaginationMeta), ServiceError> {
        let paginator = query
            .order_by_desc(news::Column::PubDate)
            .paginate(db, page_size);

        let total = paginator.num_items().await.map_err(db_err)?;
        let num_pages = Self::num_pages(total, page_size);
        if page < 1 || page > num_pages {
            return Err((
                StatusCode::NOT_FOUND,
                "PAGE_NOT_FOUND",
                format!("Page {} is out of range", page),
            ));
        }

        let rows = paginator.fetch_page(page - 1).await.map_err(db_err)?;
        Ok((
            rows,
            PaginationMeta {
                total,
                page,
                page_size,
                num_pages,
            },
        ))
    }

    // An empty set still has one (empty) first page.
    fn num_pages(total: u64, page_size: u64) -> u64 {
        if total == 0 {
            1
        } else {
            total.div_ceil(page_size)
        }
    }

    async fn ensure_unique_slug_for_day<C>(
        db: &C,
        slug: &str,
        pub_date: DateTime<Utc>,
        exclude_id: Option<i64>,
    ) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        let (start, end) = date_window::day_window_of(pub_date);
        let mut query = News::find()
            .filter(news::Column::Slug.eq(slug))
            .filter(news::Column::PubDate.gte(start))
            .filter(news::Column::PubDate.lt(end));
        if let Some(id) = exclude_id {
            query = query.filter(news::Column::Id.ne(id));
        }

        let clash = query.one(db).await.map_err(db_err)?;
        if clash.is_some() {
            return Err((
                StatusCode::CONFLICT,
                "SLUG_TAKEN",
                format!("Slug '{}' is already used on that day", slug),
            ));
        }
        Ok(())
    }

    /// Bulk-resolves topics and images for a page of rows, then maps.
    pub(crate) async fn map_listing(
        db: &DatabaseConnection,
        rows: Vec<news::Model>,
    ) -> Result<Vec<NewsResponse>, ServiceError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut topic_ids: Vec<i64> = rows.iter().map(|r| r.topic_id).collect();
        topic_ids.sort_unstable();
        topic_ids.dedup();
        let topics: HashMap<i64, topic::Model> = topic::Entity::find()
            .filter(topic::Column::Id.is_in(topic_ids))
            .all(db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let news_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut images: HashMap<i64, Vec<String>> = HashMap::new();
        for row in news_image::Entity::find()
            .filter(news_image::Column::NewsId.is_in(news_ids))
            .all(db)
            .await
            .map_err(db_err)?
        {
            images.entry(row.news_id).or_default().push(row.image);
        }

        rows.into_iter()
            .map(|item| {
                let topic = topics.get(&item.topic_id).ok_or_else(|| {
                    tracing::error!(news_id = item.id, "news row references a missing topic");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DATA_CORRUPT",
                        "News item has no topic".to_string(),
                    )
                })?;
                let item_images = images.remove(&item.id).unwrap_or_default();
                Ok(Self::map_to_response(item, topic, item_images))
            })
            .collect()
    }

    fn map_to_response(
        model: news::Model,
        topic: &topic::Model,
        images: Vec<String>,
    ) -> NewsResponse {
        let url = if topic.id == DEFAULT_TOPIC_ID {
            model.canonical_path(None)
        } else {
            model.canonical_path(Some(&topic.slug))
        };

        NewsResponse {
            id: model.public_id,
            topic: TopicService::map_to_response(topic),
            title: model.title,
            slug: model.slug,
            excerpt: model.excerpt,
            content: model.content,
            is_published: model.is_published,
            pub_date: model.pub_date,
            created: model.created,
            updated: model.updated,
            author: model.author,
            source: model.source,
            source_url: model.source_url,
            images,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
    }

    fn sample_topic(id: i64, slug: &str) -> topic::Model {
        topic::Model {
            id,
            public_id: Uuid::nil(),
            title: slug.to_string(),
            slug: slug.to_string(),
        }
    }

    fn sample_news(id: i64, topic_id: i64, slug: &str, pub_date: DateTime<Utc>) -> news::Model {
        news::Model {
            id,
            public_id: Uuid::nil(),
            topic_id,
            title: format!("news {}", id),
            slug: slug.to_string(),
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

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        let mut row = BTreeMap::new();
        row.insert("num_items", Value::from(n));
        row
    }

    fn year_row(year: i32) -> BTreeMap<&'static str, Value> {
        let mut row = BTreeMap::new();
        row.insert("year", Value::from(year));
        row
    }

    #[test]
    fn num_pages_rounds_up_and_keeps_one_empty_page() {
        assert_eq!(NewsService::num_pages(0, 10), 1);
        assert_eq!(NewsService::num_pages(10, 10), 1);
        assert_eq!(NewsService::num_pages(25, 10), 3);
    }

    #[tokio::test]
    async fn topic_index_fails_with_not_found_for_unknown_slug() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<topic::Model>::new()])
            .into_connection();

        let err = NewsService::topic_index(&db, 10, "missing", 1, now())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "TOPIC_NOT_FOUND");
    }

    #[tokio::test]
    async fn archive_index_rejects_out_of_range_pages() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(25)]])
            .into_connection();

        let err = NewsService::archive_index(&db, 10, 4, now())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "PAGE_NOT_FOUND");
    }

    #[tokio::test]
    async fn archive_index_maps_rows_and_collects_years() {
        let day = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let older = Utc.with_ymd_and_hms(2023, 12, 5, 0, 0, 0).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(2)]])
            .append_query_results([vec![
                sample_news(1, 1, "a", day),
                sample_news(2, 1, "b", older),
            ]])
            .append_query_results([vec![sample_topic(1, "general")]])
            .append_query_results([Vec::<news_image::Model>::new()])
            .append_query_results([vec![year_row(2024), year_row(2023)]])
            .into_connection();

        let res = NewsService::archive_index(&db, 10, 1, now()).await.unwrap();

        assert_eq!(res.latest.len(), 2);
        assert_eq!(res.latest[0].slug, "a");
        assert_eq!(res.latest[0].url, "/news/2024/01/10/a");
        assert_eq!(res.date_list, vec![2024, 2023]);
        assert_eq!(res.meta.total, 2);
        assert_eq!(res.meta.num_pages, 1);

        // the year list is deduplicated by the database, not in memory
        let log = db.into_transaction_log();
        let years_query = format!("{:?}", log.last().unwrap());
        assert!(years_query.contains("DISTINCT"));
    }

    #[tokio::test]
    async fn detail_fails_with_not_found_when_nothing_matches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<news::Model>::new()])
            .into_connection();

        let err = NewsService::detail(&db, 10, 2024, 1, 5, "b-slug", None, now())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1, "NEWS_NOT_FOUND");
    }

    #[tokio::test]
    async fn detail_treats_duplicate_day_slugs_as_data_fault() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                sample_news(1, 1, "b-slug", date),
                sample_news(2, 1, "b-slug", date),
            ]])
            .into_connection();

        let err = NewsService::detail(&db, 10, 2024, 1, 5, "b-slug", None, now())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.1, "DATA_CORRUPT");
    }

    #[tokio::test]
    async fn detail_rejects_impossible_dates_without_querying() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = NewsService::detail(&db, 10, 2024, 2, 30, "slug", None, now())
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn slug_clash_on_the_same_day_is_a_conflict() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_news(7, 1, "taken", date)]])
            .into_connection();

        let err = NewsService::ensure_unique_slug_for_day(&db, "taken", date, None)
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::CONFLICT);
        assert_eq!(err.1, "SLUG_TAKEN");
    }

    #[tokio::test]
    async fn free_slug_passes_the_day_check() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<news::Model>::new()])
            .into_connection();

        assert!(NewsService::ensure_unique_slug_for_day(&db, "free", date, None)
            .await
            .is_ok());
    }
}
