use restaurant_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Ensure migrations are applied.
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;

    let admin_id = ensure_user(&pool, "Admin", "admin@example.com", "ADMIN").await?;
    let staff_id = ensure_user(&pool, "Front Desk", "staff@example.com", "STAFF").await?;
    seed_menu(&pool).await?;
    seed_tables(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, Staff ID: {staff_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, updated_at = NOW()
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn ensure_category(pool: &sqlx::PgPool, name: &str, description: &str) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO categories (id, name, description)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_menu(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let mains = ensure_category(pool, "Mains", "Rice, noodles and grills").await?;
    let drinks = ensure_category(pool, "Drinks", "Hot and cold drinks").await?;
    let desserts = ensure_category(pool, "Desserts", "Something sweet").await?;

    let items = vec![
        (mains, "Fried Rice", "Wok fried rice with egg", 3_500_i64),
        (mains, "Chicken Satay", "Ten skewers with peanut sauce", 4_200),
        (mains, "Beef Noodles", "Hand pulled noodles in broth", 4_800),
        (drinks, "Iced Tea", "Sweet jasmine tea", 800),
        (drinks, "Espresso", "Double shot", 1_500),
        (desserts, "Coconut Pudding", "Served chilled", 1_800),
    ];

    for (category_id, name, description, price) in items {
        // menu_items.name is not unique, so skip names that already exist.
        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, price, category_id, description)
            SELECT $1, $2, $3, $4, $5
            WHERE NOT EXISTS (SELECT 1 FROM menu_items WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(price)
        .bind(category_id)
        .bind(description)
        .execute(pool)
        .await?;
    }

    println!("Seeded menu");
    Ok(())
}

async fn seed_tables(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let tables = [("T1", 2), ("T2", 2), ("T3", 4), ("T4", 4), ("T5", 6), ("Terrace", 8)];

    for (name, capacity) in tables {
        sqlx::query(
            r#"
            INSERT INTO dining_tables (id, name, capacity)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(capacity)
        .execute(pool)
        .await?;
    }

    println!("Seeded tables");
    Ok(())
}
