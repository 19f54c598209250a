use color_eyre::eyre::{eyre, Result};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::{
    Volunteer, VolunteerId, VolunteerName, VolunteerStats, VolunteerStore,
    VolunteerStoreError,
};
use crate::utils::constants::STORE_TIMEOUT;

pub struct PostgresVolunteerStore {
    pool: PgPool,
}

impl PostgresVolunteerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn volunteer_from_row(row: &PgRow) -> Result<Volunteer> {
    Ok(Volunteer {
        id: VolunteerId::parse(row.try_get("id")?)?,
        name: VolunteerName::parse(row.try_get("name")?)?,
        stats: VolunteerStats {
            reliability_score: row.try_get("reliability_score")?,
            total_hours: row.try_get("total_hours")?,
            streak: row.try_get("streak")?,
        },
        version: row.try_get("version")?,
    })
}

#[async_trait::async_trait]
impl VolunteerStore for PostgresVolunteerStore {
    #[tracing::instrument(name = "Adding volunteer to PostgreSQL", skip_all)]
    async fn add_volunteer(
        &mut self,
        name: VolunteerName,
    ) -> Result<Volunteer, VolunteerStoreError> {
        let query = sqlx::query(
            r#"
            INSERT INTO volunteers (name) VALUES ($1)
            RETURNING id, name, reliability_score, total_hours, streak, version
            "#,
        )
        .bind(name.as_ref())
        .fetch_one(&self.pool);

        let row = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| VolunteerStoreError::UnexpectedError(eyre!(e)))?
            .map_err(|e| VolunteerStoreError::UnexpectedError(eyre!(e)))?;

        volunteer_from_row(&row).map_err(VolunteerStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Getting volunteer from PostgreSQL", skip_all)]
    async fn get_volunteer(
        &self,
        id: &VolunteerId,
    ) -> Result<Volunteer, VolunteerStoreError> {
        let query = sqlx::query(
            r#"
                SELECT id, name, reliability_score, total_hours, streak, version
                FROM volunteers
                WHERE id = $1
            "#,
        )
        .bind(id.value_of())
        .fetch_one(&self.pool);

        let row = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| VolunteerStoreError::UnexpectedError(eyre!(e)))?
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => VolunteerStoreError::VolunteerNotFound,
                e => VolunteerStoreError::UnexpectedError(eyre!(e)),
            })?;

        volunteer_from_row(&row).map_err(VolunteerStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Listing volunteer IDs from PostgreSQL", skip_all)]
    async fn get_volunteer_ids(&self) -> Result<Vec<VolunteerId>, VolunteerStoreError> {
        let query = sqlx::query_scalar::<_, i64>(
            r#"
                SELECT id FROM volunteers ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool);

        let ids = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| VolunteerStoreError::UnexpectedError(eyre!(e)))?
            .map_err(|e| VolunteerStoreError::UnexpectedError(eyre!(e)))?;

        ids.into_iter()
            .map(|id| {
                VolunteerId::parse(id)
                    .map_err(|e| VolunteerStoreError::UnexpectedError(eyre!(e)))
            })
            .collect()
    }

    #[tracing::instrument(name = "Updating volunteer stats in PostgreSQL", skip_all)]
    async fn update_stats(
        &mut self,
        id: &VolunteerId,
        stats: VolunteerStats,
    ) -> Result<(), VolunteerStoreError> {
        let query = sqlx::query(
            r#"
            UPDATE volunteers
            SET reliability_score = $1, total_hours = $2, streak = $3,
                updated_at = NOW(), version = version + 1
            WHERE id = $4
            "#,
        )
        .bind(stats.reliability_score)
        .bind(stats.total_hours)
        .bind(stats.streak)
        .bind(id.value_of())
        .execute(&self.pool);

        let result = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| VolunteerStoreError::UnexpectedError(eyre!(e)))?
            .map_err(|e| VolunteerStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(VolunteerStoreError::VolunteerNotFound);
        }
        Ok(())
    }
}
