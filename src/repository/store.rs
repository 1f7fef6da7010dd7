//! Generic PostgreSQL store backing every entity repository

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::{
    entity::{Entity, Value},
    filter::Filter,
    Repository,
};
use crate::error::{AppError, AppResult};

/// `Repository<T>` over the table named by `T::TABLE`.
///
/// Every mutation runs in its own transaction and is committed before the
/// call returns.
pub struct PgStore<T> {
    pool: Pool<Postgres>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for PgStore<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> PgStore<T> {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    fn column_values(entity: &T) -> AppResult<Vec<Value>> {
        T::COLUMNS
            .iter()
            .map(|column| {
                entity.field(column).ok_or_else(|| {
                    AppError::Internal(format!("{} has no value for column {}", T::TABLE, column))
                })
            })
            .collect()
    }

    /// `INSERT ... RETURNING *` over every writable column
    fn insert_query(entity: &T) -> AppResult<QueryBuilder<'static, Postgres>> {
        let values = Self::column_values(entity)?;

        let mut builder = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            T::TABLE,
            T::COLUMNS.join(", ")
        ));
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            value.push_bind(&mut builder);
        }
        builder.push(") RETURNING *");
        Ok(builder)
    }

    /// `UPDATE ... WHERE id = ...` over every writable column
    fn update_query(entity: &T) -> AppResult<QueryBuilder<'static, Postgres>> {
        let values = Self::column_values(entity)?;

        let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", T::TABLE));
        for (i, (column, value)) in T::COLUMNS.iter().zip(values).enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(*column).push(" = ");
            value.push_bind(&mut builder);
        }
        builder.push(" WHERE id = ").push_bind(entity.id());
        Ok(builder)
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for PgStore<T> {
    async fn add(&self, entity: &T) -> AppResult<T> {
        let mut builder = Self::insert_query(entity)?;

        let mut tx = self.pool.begin().await?;
        let created = builder.build_query_as::<T>().fetch_one(&mut *tx).await?;
        tx.commit().await?;

        tracing::debug!("Inserted {} id={}", T::TABLE, created.id());
        Ok(created)
    }

    async fn update(&self, entity: &T) -> AppResult<u64> {
        let mut builder = Self::update_query(entity)?;

        let mut tx = self.pool.begin().await?;
        let rows = builder.build().execute(&mut *tx).await?.rows_affected();
        tx.commit().await?;

        Ok(rows)
    }

    async fn remove(&self, entity: &T) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", T::TABLE))
            .bind(entity.id())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;

        Ok(rows)
    }

    async fn get_all(&self) -> AppResult<Vec<T>> {
        let rows = sqlx::query_as::<_, T>(&format!(
            "SELECT * FROM {} ORDER BY {}",
            T::TABLE,
            T::ORDER_BY
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<T>> {
        let row = sqlx::query_as::<_, T>(&format!("SELECT * FROM {} WHERE id = $1", T::TABLE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn search(&self, filter: &Filter) -> AppResult<Vec<T>> {
        let mut builder = QueryBuilder::new(format!("SELECT * FROM {}", T::TABLE));
        filter.push_where::<T>(&mut builder)?;
        builder.push(" ORDER BY ").push(T::ORDER_BY);

        let rows = builder.build_query_as::<T>().fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
