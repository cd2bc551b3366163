use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Ensures the screening tables exist. Idempotent; run once at startup.
///
/// Each statement commits on its own connection-scoped transaction, so a
/// partially initialized schema is repaired on the next startup.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS candidates (
            candidate_id TEXT PRIMARY KEY,
            full_name    TEXT NOT NULL,
            email        TEXT NOT NULL,
            phone        TEXT NOT NULL,
            role         TEXT NOT NULL,
            created_at   TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            session_id     TEXT PRIMARY KEY,
            candidate_id   TEXT NOT NULL
                REFERENCES candidates(candidate_id) ON DELETE CASCADE,
            status         TEXT NOT NULL, -- IN_PROGRESS / COMPLETED
            final_score    DOUBLE PRECISION,
            final_decision TEXT,          -- HIRE / HOLD / REJECT
            created_at     TIMESTAMPTZ NOT NULL,
            completed_at   TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS round_results (
            result_id     TEXT PRIMARY KEY,
            session_id    TEXT NOT NULL
                REFERENCES sessions(session_id) ON DELETE CASCADE,
            round_no      INTEGER NOT NULL, -- 1,2,3
            owner         TEXT NOT NULL,
            question_id   TEXT,
            question      TEXT NOT NULL,
            answer        TEXT NOT NULL,
            raw_score     DOUBLE PRECISION NOT NULL,
            score         DOUBLE PRECISION NOT NULL,
            passed        BOOLEAN NOT NULL,
            threshold     DOUBLE PRECISION NOT NULL,
            violations    JSONB NOT NULL,
            metrics       JSONB NOT NULL,
            features      JSONB NOT NULL,
            entropy_value DOUBLE PRECISION,
            created_at    TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_sessions_candidate ON sessions(candidate_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_round_results_session_round \
         ON round_results(session_id, round_no)",
    )
    .execute(pool)
    .await?;

    info!("Screening schema initialized");
    Ok(())
}
