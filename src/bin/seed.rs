use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_airport_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use chrono::{Duration, Utc};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user(&pool, "user@example.com", "user123", "user").await?;
    seed_schedule(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(user_id)
}

async fn seed_schedule(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let (flights,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flights")
        .fetch_one(pool)
        .await?;
    if flights > 0 {
        println!("Schedule already seeded, skipping");
        return Ok(());
    }

    let country_id = Uuid::new_v4();
    sqlx::query("INSERT INTO countries (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
        .bind(country_id)
        .bind("Ukraine")
        .execute(pool)
        .await?;
    let (country_id,): (Uuid,) = sqlx::query_as("SELECT id FROM countries WHERE name = $1")
        .bind("Ukraine")
        .fetch_one(pool)
        .await?;

    let kyiv = Uuid::new_v4();
    let lviv = Uuid::new_v4();
    for (id, name) in [(kyiv, "Kyiv"), (lviv, "Lviv")] {
        sqlx::query("INSERT INTO cities (id, name, country_id) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(country_id)
            .execute(pool)
            .await?;
    }

    let boryspil = Uuid::new_v4();
    let danylo = Uuid::new_v4();
    for (id, name, city) in [
        (boryspil, "Boryspil International", kyiv),
        (danylo, "Danylo Halytskyi International", lviv),
    ] {
        sqlx::query("INSERT INTO airports (id, name, closest_big_city_id) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(city)
            .execute(pool)
            .await?;
    }

    let route_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO routes (id, source_id, destination_id, distance) VALUES ($1, $2, $3, $4)",
    )
    .bind(route_id)
    .bind(boryspil)
    .bind(danylo)
    .bind(470)
    .execute(pool)
    .await?;

    let type_id = Uuid::new_v4();
    sqlx::query("INSERT INTO airplane_types (id, name) VALUES ($1, $2)")
        .bind(type_id)
        .bind("Narrow-body")
        .execute(pool)
        .await?;

    let airplane_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO airplanes (id, name, rows, seats_in_row, airplane_type_id) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(airplane_id)
    .bind("UR-PSA")
    .bind(10)
    .bind(8)
    .bind(type_id)
    .execute(pool)
    .await?;

    let departure = Utc::now() + Duration::days(2);
    sqlx::query(
        "INSERT INTO flights (id, route_id, airplane_id, departure_time, arrival_time) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind(route_id)
    .bind(airplane_id)
    .bind(departure)
    .bind(departure + Duration::hours(1))
    .execute(pool)
    .await?;

    println!("Schedule seeded");
    Ok(())
}
