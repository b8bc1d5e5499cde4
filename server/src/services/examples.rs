use list_query::ListQuery;
use sentences::{Example, ExampleUpdate, NewExample};
use uuid::Uuid;

use super::ServiceError;

/// Storage of example sentences. Payloads are validated before they get here.
pub trait Examples: Clone + Send + Sync + 'static {
    fn create(
        &self,
        example: NewExample,
    ) -> impl Future<Output = Result<Example, ServiceError>> + Send;

    fn list(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Vec<Example>, ServiceError>> + Send;

    /// Fails with [`ServiceError::NotFound`] for an unknown id.
    fn get(&self, id: Uuid) -> impl Future<Output = Result<Example, ServiceError>> + Send;

    fn update(
        &self,
        id: Uuid,
        update: ExampleUpdate,
    ) -> impl Future<Output = Result<Example, ServiceError>> + Send;
}

/// Wire name of a sortable field to its column.
pub fn sort_column(field: &str) -> Option<super::SortColumn> {
    use super::SortColumn;

    match field {
        "id" => Some(SortColumn::Id),
        "igbo" => Some(SortColumn::Text("igbo")),
        "english" => Some(SortColumn::Text("english")),
        "updatedOn" => Some(SortColumn::Plain("updated_on")),
        _ => None,
    }
}

pub mod pg {
    use chrono::{DateTime, Utc};
    use list_query::ListQuery;
    use sentences::{Example, ExampleUpdate, NewExample};
    use sqlx::{Postgres, QueryBuilder};
    use uuid::Uuid;

    use crate::services::{ServiceError, like_pattern, push_window};

    #[derive(Clone)]
    pub struct Examples(pub sqlx::PgPool);

    #[derive(sqlx::FromRow)]
    struct ExampleRow {
        id: Uuid,
        igbo: String,
        english: String,
        associated_words: Vec<Uuid>,
        updated_on: DateTime<Utc>,
    }

    impl From<ExampleRow> for Example {
        fn from(row: ExampleRow) -> Self {
            Example {
                id: row.id,
                igbo: row.igbo,
                english: row.english,
                associated_words: row.associated_words,
                updated_on: row.updated_on,
            }
        }
    }

    pub(crate) fn list_statement(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(
            "select id, igbo, english, associated_words, updated_on from examples",
        );
        if let Some(keyword) = &query.keyword {
            builder
                .push(" where igbo ilike ")
                .push_bind(like_pattern(keyword));
        }
        push_window(
            &mut builder,
            query.sort.as_ref(),
            super::sort_column,
            query.offset,
            query.limit,
        );
        builder
    }

    impl super::Examples for Examples {
        async fn create(&self, example: NewExample) -> Result<Example, ServiceError> {
            let example = Example::new(Uuid::now_v7(), example, Utc::now());
            let row = sqlx::query_as::<_, ExampleRow>(
                "insert into examples (id, igbo, english, associated_words, updated_on) \
                 values ($1, $2, $3, $4, $5) \
                 returning id, igbo, english, associated_words, updated_on",
            )
            .bind(example.id)
            .bind(example.igbo)
            .bind(example.english)
            .bind(example.associated_words)
            .bind(example.updated_on)
            .fetch_one(&self.0)
            .await?;

            tracing::debug!(id = %row.id, "created example");
            Ok(row.into())
        }

        async fn list(&self, query: &ListQuery) -> Result<Vec<Example>, ServiceError> {
            let mut builder = list_statement(query);
            let rows = builder
                .build_query_as::<ExampleRow>()
                .fetch_all(&self.0)
                .await?;
            Ok(rows.into_iter().map(Example::from).collect())
        }

        async fn get(&self, id: Uuid) -> Result<Example, ServiceError> {
            sqlx::query_as::<_, ExampleRow>(
                "select id, igbo, english, associated_words, updated_on \
                 from examples where id = $1",
            )
            .bind(id)
            .fetch_optional(&self.0)
            .await?
            .map(Example::from)
            .ok_or(ServiceError::NotFound {
                kind: "example",
                id,
            })
        }

        async fn update(&self, id: Uuid, update: ExampleUpdate) -> Result<Example, ServiceError> {
            let mut tx = self.0.begin().await?;
            let mut example: Example = sqlx::query_as::<_, ExampleRow>(
                "select id, igbo, english, associated_words, updated_on \
                 from examples where id = $1 for update",
            )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .map(Example::from)
            .ok_or(ServiceError::NotFound {
                kind: "example",
                id,
            })?;

            update.apply_to(&mut example, Utc::now());
            let Example {
                igbo,
                english,
                associated_words,
                updated_on,
                ..
            } = example;

            let row = sqlx::query_as::<_, ExampleRow>(
                "update examples set igbo = $2, english = $3, associated_words = $4, updated_on = $5 \
                 where id = $1 \
                 returning id, igbo, english, associated_words, updated_on",
            )
            .bind(id)
            .bind(igbo)
            .bind(english)
            .bind(associated_words)
            .bind(updated_on)
            .fetch_one(&mut *tx)
            .await?;
            tx.commit().await?;

            tracing::debug!(%id, "updated example");
            Ok(row.into())
        }
    }

}
