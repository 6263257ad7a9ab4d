pub mod topic_seeder;

use sea_orm::DatabaseConnection;

pub async fn run_seeders(db: &DatabaseConnection) -> Result<(), String> {
    // The default topic must exist before any news can be created.
    topic_seeder::seed_default_topic(db).await?;
    Ok(())
}
