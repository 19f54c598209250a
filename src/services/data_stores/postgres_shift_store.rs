use std::str::FromStr;

use chrono::NaiveDate;
use color_eyre::eyre::{eyre, Result};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::{
    NewShift, Shift, ShiftDate, ShiftId, ShiftStatus, ShiftStore, ShiftStoreError,
    VolunteerId,
};
use crate::utils::constants::STORE_TIMEOUT;

pub struct PostgresShiftStore {
    pool: PgPool,
}

impl PostgresShiftStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn shift_exists(&self, id: &ShiftId) -> Result<bool, ShiftStoreError> {
        let query = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (SELECT 1 FROM shifts WHERE id = $1)
            "#,
        )
        .bind(id.value_of())
        .fetch_one(&self.pool);

        tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| ShiftStoreError::UnexpectedError(eyre!(e)))?
            .map_err(|e| ShiftStoreError::UnexpectedError(eyre!(e)))
    }
}

fn shift_from_row(row: &PgRow) -> Result<Shift> {
    let status: String = row.try_get("status")?;
    let date: NaiveDate = row.try_get("date")?;
    Ok(Shift {
        id: ShiftId::parse(row.try_get("id")?)?,
        volunteer_id: VolunteerId::parse(row.try_get("volunteer_id")?)?,
        date: ShiftDate::new(date),
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        role: row.try_get("role")?,
        status: ShiftStatus::from_str(&status)?,
        notes: row.try_get("notes")?,
        version: row.try_get("version")?,
    })
}

fn map_row_error(e: sqlx::Error) -> ShiftStoreError {
    match e {
        sqlx::Error::RowNotFound => ShiftStoreError::ShiftNotFound,
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            ShiftStoreError::VolunteerNotFound
        }
        e => ShiftStoreError::UnexpectedError(eyre!(e)),
    }
}

#[async_trait::async_trait]
impl ShiftStore for PostgresShiftStore {
    #[tracing::instrument(name = "Adding shift to PostgreSQL", skip_all)]
    async fn add_shift(&mut self, shift: NewShift) -> Result<Shift, ShiftStoreError> {
        let query = sqlx::query(
            r#"
            INSERT INTO shifts (volunteer_id, date, start_time, end_time, role, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, volunteer_id, date, start_time, end_time, role, status, notes, version
            "#,
        )
        .bind(shift.volunteer_id.value_of())
        .bind(*shift.date.as_ref())
        .bind(&shift.start_time)
        .bind(&shift.end_time)
        .bind(&shift.role)
        .bind(ShiftStatus::Scheduled.as_str())
        .bind(&shift.notes)
        .fetch_one(&self.pool);

        let row = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| ShiftStoreError::UnexpectedError(eyre!(e)))?
            .map_err(map_row_error)?;

        shift_from_row(&row).map_err(ShiftStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Getting shift from PostgreSQL", skip_all)]
    async fn get_shift(&self, id: &ShiftId) -> Result<Shift, ShiftStoreError> {
        let query = sqlx::query(
            r#"
                SELECT id, volunteer_id, date, start_time, end_time, role, status, notes, version
                FROM shifts
                WHERE id = $1
            "#,
        )
        .bind(id.value_of())
        .fetch_one(&self.pool);

        let row = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| ShiftStoreError::UnexpectedError(eyre!(e)))?
            .map_err(map_row_error)?;

        shift_from_row(&row).map_err(ShiftStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Updating shift in PostgreSQL", skip_all)]
    async fn update_shift(&mut self, shift: &Shift) -> Result<Shift, ShiftStoreError> {
        let query = sqlx::query(
            r#"
            UPDATE shifts
            SET date = $1, start_time = $2, end_time = $3, role = $4, status = $5, notes = $6,
                updated_at = NOW(), version = version + 1
            WHERE id = $7 AND version = $8
            RETURNING id, volunteer_id, date, start_time, end_time, role, status, notes, version
            "#,
        )
        .bind(*shift.date.as_ref())
        .bind(&shift.start_time)
        .bind(&shift.end_time)
        .bind(&shift.role)
        .bind(shift.status.as_str())
        .bind(&shift.notes)
        .bind(shift.id.value_of())
        .bind(shift.version)
        .fetch_optional(&self.pool);

        let row = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| ShiftStoreError::UnexpectedError(eyre!(e)))?
            .map_err(map_row_error)?;

        // No row matched id and version together: either the shift is gone
        // or someone else got there first.
        let Some(row) = row else {
            return match self.shift_exists(&shift.id).await? {
                true => Err(ShiftStoreError::EditConflict),
                false => Err(ShiftStoreError::ShiftNotFound),
            };
        };

        shift_from_row(&row).map_err(ShiftStoreError::UnexpectedError)
    }

    #[tracing::instrument(name = "Deleting shift from PostgreSQL", skip_all)]
    async fn delete_shift(&mut self, id: &ShiftId) -> Result<Shift, ShiftStoreError> {
        let query = sqlx::query(
            r#"
                DELETE FROM shifts
                WHERE id = $1
                RETURNING id, volunteer_id, date, start_time, end_time, role, status, notes, version
            "#,
        )
        .bind(id.value_of())
        .fetch_one(&self.pool);

        let row = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| ShiftStoreError::UnexpectedError(eyre!(e)))?
            .map_err(map_row_error)?;

        shift_from_row(&row).map_err(ShiftStoreError::UnexpectedError)
    }

    #[tracing::instrument(
        name = "Getting shifts for volunteer from PostgreSQL",
        skip_all
    )]
    async fn get_shifts_for_volunteer(
        &self,
        volunteer_id: &VolunteerId,
    ) -> Result<Vec<Shift>, ShiftStoreError> {
        let query = sqlx::query(
            r#"
                SELECT id, volunteer_id, date, start_time, end_time, role, status, notes, version
                FROM shifts
                WHERE volunteer_id = $1
            "#,
        )
        .bind(volunteer_id.value_of())
        .fetch_all(&self.pool);

        let rows = tokio::time::timeout(*STORE_TIMEOUT, query)
            .await
            .map_err(|e| ShiftStoreError::UnexpectedError(eyre!(e)))?
            .map_err(|e| ShiftStoreError::UnexpectedError(eyre!(e)))?;

        // start_time is free text, so order by the parsed clock time here.
        let mut shifts = rows
            .iter()
            .map(|row| shift_from_row(row).map_err(ShiftStoreError::UnexpectedError))
            .collect::<Result<Vec<_>, _>>()?;
        shifts.sort_by_key(Shift::listing_key);
        Ok(shifts)
    }
}
