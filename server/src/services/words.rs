use ::words::{NewWord, Word, WordUpdate};
use list_query::ListQuery;
use uuid::Uuid;

use super::{ServiceError, SortColumn};

pub trait Words: Clone + Send + Sync + 'static {
    fn create(&self, word: NewWord) -> impl Future<Output = Result<Word, ServiceError>> + Send;

    fn list(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<Vec<Word>, ServiceError>> + Send;

    fn get(&self, id: Uuid) -> impl Future<Output = Result<Word, ServiceError>> + Send;

    fn update(
        &self,
        id: Uuid,
        update: WordUpdate,
    ) -> impl Future<Output = Result<Word, ServiceError>> + Send;
}

pub fn sort_column(field: &str) -> Option<SortColumn> {
    match field {
        "id" => Some(SortColumn::Id),
        "word" => Some(SortColumn::Text("word")),
        "wordClass" => Some(SortColumn::Text("word_class")),
        "normalized" => Some(SortColumn::Text("normalized")),
        "frequency" => Some(SortColumn::Plain("frequency")),
        _ => None,
    }
}

pub mod pg {
    use ::words::{NewWord, Word, WordUpdate};
    use list_query::ListQuery;
    use sqlx::{Postgres, QueryBuilder};
    use uuid::Uuid;

    use crate::services::{ServiceError, like_pattern, push_window};

    const COLUMNS: &str =
        "id, word, word_class, definitions, variations, normalized, frequency, stems";

    #[derive(Clone)]
    pub struct Words(pub sqlx::PgPool);

    #[derive(sqlx::FromRow)]
    struct WordRow {
        id: Uuid,
        word: String,
        word_class: String,
        definitions: Vec<String>,
        variations: Vec<String>,
        normalized: String,
        frequency: Option<f64>,
        stems: Vec<String>,
    }

    impl From<WordRow> for Word {
        fn from(row: WordRow) -> Self {
            Word {
                id: row.id,
                word: row.word,
                word_class: row.word_class,
                definitions: row.definitions,
                variations: row.variations,
                normalized: row.normalized,
                frequency: row.frequency,
                stems: row.stems,
            }
        }
    }

    /// The keyword matches the headword or any spelling variation as typed, and
    /// `normalized` once tone marks are stripped from it.
    pub(crate) fn list_statement(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("select ");
        builder.push(COLUMNS).push(" from words");
        if let Some(keyword) = &query.keyword {
            let pattern = like_pattern(keyword);
            builder
                .push(" where word ilike ")
                .push_bind(pattern.clone())
                .push(" or normalized ilike ")
                .push_bind(like_pattern(&::words::normalize(keyword)))
                .push(" or exists (select 1 from unnest(variations) as variation where variation ilike ")
                .push_bind(pattern)
                .push(")");
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

    async fn write<'e, E>(executor: E, statement: &str, word: Word) -> Result<Word, ServiceError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, WordRow>(statement)
            .bind(word.id)
            .bind(word.word)
            .bind(word.word_class)
            .bind(word.definitions)
            .bind(word.variations)
            .bind(word.normalized)
            .bind(word.frequency)
            .bind(word.stems)
            .fetch_one(executor)
            .await?;
        Ok(row.into())
    }

    impl super::Words for Words {
        async fn create(&self, word: NewWord) -> Result<Word, ServiceError> {
            let word = Word::new(Uuid::now_v7(), word);
            let statement = format!(
                "insert into words ({COLUMNS}) values ($1, $2, $3, $4, $5, $6, $7, $8) returning {COLUMNS}"
            );
            let word = write(&self.0, &statement, word).await?;
            tracing::debug!(id = %word.id, word = %word.word, "created word");
            Ok(word)
        }

        async fn list(&self, query: &ListQuery) -> Result<Vec<Word>, ServiceError> {
            let mut builder = list_statement(query);
            let rows = builder.build_query_as::<WordRow>().fetch_all(&self.0).await?;
            Ok(rows.into_iter().map(Word::from).collect())
        }

        async fn get(&self, id: Uuid) -> Result<Word, ServiceError> {
            let statement = format!("select {COLUMNS} from words where id = $1");
            sqlx::query_as::<_, WordRow>(&statement)
                .bind(id)
                .fetch_optional(&self.0)
                .await?
                .map(Word::from)
                .ok_or(ServiceError::NotFound { kind: "word", id })
        }

        async fn update(&self, id: Uuid, update: WordUpdate) -> Result<Word, ServiceError> {
            let mut tx = self.0.begin().await?;
            let select = format!("select {COLUMNS} from words where id = $1 for update");
            let mut word: Word = sqlx::query_as::<_, WordRow>(&select)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .map(Word::from)
                .ok_or(ServiceError::NotFound { kind: "word", id })?;

            update.apply_to(&mut word);
            let statement = format!(
                "update words set word = $2, word_class = $3, definitions = $4, variations = $5, \
                 normalized = $6, frequency = $7, stems = $8 where id = $1 returning {COLUMNS}"
            );
            let word = write(&mut *tx, &statement, word).await?;
            tx.commit().await?;

            tracing::debug!(%id, "updated word");
            Ok(word)
        }
    }

}
