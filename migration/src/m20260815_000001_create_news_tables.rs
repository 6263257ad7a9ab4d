use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Topics
        manager.create_table(
            Table::create()
                .table(Topics::Table)
                .if_not_exists()
                .col(ColumnDef::new(Topics::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Topics::PublicId).uuid().not_null().unique_key()) // External ID
                .col(ColumnDef::new(Topics::Title).string().not_null())
                .col(ColumnDef::new(Topics::Slug).string().not_null().unique_key())
                .to_owned(),
        ).await?;

        // 2. News
        manager.create_table(
            Table::create()
                .table(News::Table)
                .if_not_exists()
                .col(ColumnDef::new(News::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(News::PublicId).uuid().not_null().unique_key()) // External ID
                .col(ColumnDef::new(News::TopicId).big_integer().not_null())
                .col(ColumnDef::new(News::Title).string().not_null())
                // Per-day uniqueness of (slug, pub_date::date) is checked by the
                // service layer before every write; no plain unique key here.
                .col(ColumnDef::new(News::Slug).string().not_null())
                .col(ColumnDef::new(News::Excerpt).text().not_null().default(""))
                .col(ColumnDef::new(News::Content).text().not_null().default(""))
                .col(ColumnDef::new(News::IsPublished).boolean().not_null().default(true))
                .col(ColumnDef::new(News::PubDate).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(News::Created).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(News::Updated).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .col(ColumnDef::new(News::Author).string().not_null().default(""))
                .col(ColumnDef::new(News::Source).string().not_null().default(""))
                .col(ColumnDef::new(News::SourceUrl).string().not_null().default(""))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_news_topic_id")
                        .from(News::Table, News::TopicId)
                        .to(Topics::Table, Topics::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                )
                .to_owned(),
        ).await?;

        // Indexes for the archive listings (pub_date DESC everywhere)
        manager.create_index(Index::create().name("idx_news_pub_date").table(News::Table).col(News::PubDate).to_owned()).await?;
        manager.create_index(Index::create().name("idx_news_is_published").table(News::Table).col(News::IsPublished).to_owned()).await?;
        manager.create_index(Index::create().name("idx_news_slug").table(News::Table).col(News::Slug).to_owned()).await?;

        // 3. News Images (strictly owned, cascade on owner delete)
        manager.create_table(
            Table::create()
                .table(NewsImages::Table)
                .if_not_exists()
                .col(ColumnDef::new(NewsImages::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(NewsImages::NewsId).big_integer().not_null())
                .col(ColumnDef::new(NewsImages::Image).string().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_news_images_news_id")
                        .from(NewsImages::Table, NewsImages::NewsId)
                        .to(News::Table, News::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned(),
        ).await?;

        manager.create_index(Index::create().name("idx_news_images_news_id").table(NewsImages::Table).col(NewsImages::NewsId).to_owned()).await?;

        // 4. Widget Configs (settings for the embeddable latest-news widget)
        manager.create_table(
            Table::create()
                .table(WidgetConfigs::Table)
                .if_not_exists()
                .col(ColumnDef::new(WidgetConfigs::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(WidgetConfigs::PublicId).uuid().not_null().unique_key()) // External ID
                .col(ColumnDef::new(WidgetConfigs::Limit).integer().not_null())
                .col(ColumnDef::new(WidgetConfigs::TopicId).big_integer().null())
                .col(ColumnDef::new(WidgetConfigs::DefaultImage).string().null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_widget_configs_topic_id")
                        .from(WidgetConfigs::Table, WidgetConfigs::TopicId)
                        .to(Topics::Table, Topics::Id)
                        .on_delete(ForeignKeyAction::SetNull)
                )
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WidgetConfigs::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(NewsImages::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(News::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Topics::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Topics {
    Table,
    Id,
    PublicId,
    Title,
    Slug,
}

#[derive(Iden)]
enum News {
    Table,
    Id,
    PublicId,
    TopicId,
    Title,
    Slug,
    Excerpt,
    Content,
    IsPublished,
    PubDate,
    Created,
    Updated,
    Author,
    Source,
    SourceUrl,
}

#[derive(Iden)]
enum NewsImages {
    Table,
    Id,
    NewsId,
    Image,
}

#[derive(Iden)]
enum WidgetConfigs {
    Table,
    Id,
    PublicId,
    Limit,
    TopicId,
    DefaultImage,
}
