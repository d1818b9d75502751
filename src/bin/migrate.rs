use restaurant_pos_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let database_url = config
        .database_url
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;

    let orm = create_orm_conn(create_pool(&database_url).await?);
    run_migrations(&orm).await?;
    println!("Migrations applied");
    Ok(())
}
