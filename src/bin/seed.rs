use restaurant_pos_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    models::StaffRole,
    services::auth_service::hash_password,
    workflow::FoodCategory,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let database_url = config
        .database_url
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;

    let pool = create_pool(&database_url).await?;
    run_migrations(&create_orm_conn(pool.clone())).await?;

    let staff = [
        ("admin@example.com", "Admin", "admin123", StaffRole::Admin),
        ("cashier@example.com", "Cashier", "cashier123", StaffRole::Cashier),
        ("waiter@example.com", "Waiter", "waiter123", StaffRole::Waiter),
        ("kitchen@example.com", "Kitchen", "kitchen123", StaffRole::Kitchen),
        ("courier@example.com", "Courier", "courier123", StaffRole::Courier),
    ];
    for (email, name, password, role) in staff {
        ensure_staff(&pool, email, name, password, role).await?;
    }
    seed_menu(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_staff(
    pool: &sqlx::PgPool,
    email: &str,
    name: &str,
    password: &str,
    role: StaffRole,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO staff (id, email, name, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    println!("Ensured staff {email} (role={role})");
    Ok(id)
}

async fn seed_menu(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let menu = [
        ("Margherita Pizza", "Tomato, mozzarella, basil", FoodCategory::Pizza, 185_00),
        ("Classic Burger", "Beef patty, cheddar, pickles", FoodCategory::Burger, 165_00),
        ("Adana Kebab", "Spiced minced lamb on the grill", FoodCategory::Meat, 240_00),
        ("Crispy Chicken Wings", "Six wings, house sauce", FoodCategory::Chicken, 150_00),
        ("Shepherd Salad", "Tomato, cucumber, onion, parsley", FoodCategory::Salad, 70_00),
        ("Lentil Soup", "Red lentils, lemon on the side", FoodCategory::Other, 60_00),
        ("Baklava", "Pistachio, four pieces", FoodCategory::Dessert, 90_00),
        ("Ayran", "Salted yogurt drink", FoodCategory::Drink, 25_00),
    ];

    for (name, description, category, price) in menu {
        sqlx::query(
            r#"
            INSERT INTO food_items (id, name, description, category, price)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (SELECT 1 FROM food_items WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(category.as_str())
        .bind(price as i64)
        .execute(pool)
        .await?;
    }

    println!("Seeded menu");
    Ok(())
}
