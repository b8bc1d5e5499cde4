use list_query::{Direction, Sort};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

pub mod examples;
pub mod words;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error("\"{0}\" is not a valid id")]
    MalformedId(String),
    #[error("no {kind} exists with id {id}")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<sentences::SchemaError> for ServiceError {
    fn from(error: sentences::SchemaError) -> Self {
        ServiceError::Invalid(error.to_string())
    }
}

impl From<::words::SchemaError> for ServiceError {
    fn from(error: ::words::SchemaError) -> Self {
        ServiceError::Invalid(error.to_string())
    }
}

/// Syntactic id check, done before any store is asked about it.
pub fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::MalformedId(raw.to_owned()))
}

/// `%keyword%` for `ILIKE`, with the pattern metacharacters taken literally.
pub(crate) fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Appends `order by`, `limit` and `offset`. `id` always breaks ties so that
/// pages never overlap.
pub(crate) fn push_window(
    builder: &mut QueryBuilder<'static, Postgres>,
    sort: Option<&Sort>,
    column: fn(&str) -> Option<SortColumn>,
    offset: u64,
    limit: u64,
) {
    let ordering = sort.and_then(|s| match column(&s.field) {
        Some(c) => Some((c, s.direction)),
        None => {
            tracing::debug!(field = %s.field, "ignoring sort on unknown field");
            None
        }
    });

    builder.push(" order by ");
    match ordering {
        Some((SortColumn::Id, direction)) => {
            builder.push("id ").push(keyword(direction));
        }
        Some((SortColumn::Text(name), direction)) => {
            builder
                .push(name)
                .push(" collate \"C\" ")
                .push(keyword(direction))
                .push(", id asc");
        }
        Some((SortColumn::Plain(name), direction)) => {
            builder
                .push(name)
                .push(" ")
                .push(keyword(direction))
                .push(" nulls last, id asc");
        }
        None => {
            builder.push("id asc");
        }
    }
    builder
        .push(" limit ")
        .push_bind(clamp(limit))
        .push(" offset ")
        .push_bind(clamp(offset));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    /// Compared byte-wise, independent of the database locale.
    Text(&'static str),
    Plain(&'static str),
}

fn keyword(direction: Direction) -> &'static str {
    match direction {
        Direction::Asc => "asc",
        Direction::Desc => "desc",
    }
}

fn clamp(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
