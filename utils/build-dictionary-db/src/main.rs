use anyhow::Context;
use clap::Parser;
use sentences::{Example, NewExample};
use serde::Deserialize;
use sqlx::Connection;
use words::{NewWord, Word};

/// PostgreSQL refuses statements with more bind parameters than this.
const MAX_BIND_PARAMS: usize = u16::MAX as usize;
const WORD_COLUMNS: usize = 8;
const EXAMPLE_COLUMNS: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let raw = tokio::fs::read(&opts.input)
        .await
        .with_context(|| anyhow::anyhow!("Failed to open file {}", opts.input.display()))?;
    let dump: Dump = serde_json::from_slice(&raw)
        .with_context(|| anyhow::anyhow!("Failed to parse {}", opts.input.display()))?;

    let words = accept(dump.words, "word", |word: &NewWord| word.validate().map_err(Into::into))
        .into_iter()
        .map(|word| Word::new(uuid::Uuid::now_v7(), word.with_normalized()))
        .collect::<Vec<_>>();
    let now = chrono::Utc::now();
    let examples = accept(dump.examples, "example", |example: &NewExample| {
        example.validate().map_err(Into::into)
    })
    .into_iter()
    .map(|example| Example::new(uuid::Uuid::now_v7(), example, now))
    .collect::<Vec<_>>();

    let mut connection = sqlx::PgConnection::connect(&opts.database_url)
        .await
        .with_context(|| anyhow::anyhow!("Failed to connect to database {}", opts.database_url))?;

    let mut inserted = 0;
    for batch in words.chunks(rows_per_batch(opts.batch_size, WORD_COLUMNS)) {
        insert_words(&mut connection, batch).await?;
        inserted += batch.len();
        println!("Words: {}/{}", inserted, words.len());
    }

    let mut inserted = 0;
    for batch in examples.chunks(rows_per_batch(opts.batch_size, EXAMPLE_COLUMNS)) {
        insert_examples(&mut connection, batch).await?;
        inserted += batch.len();
        println!("Examples: {}/{}", inserted, examples.len());
    }

    println!("Done");
    Ok(())
}

/// Script to load words and example sentences into the dictionary database.
///
/// The input is a JSON object with `words` and `examples` arrays, each entry
/// shaped like the body of the matching `POST` endpoint. Entries that the API
/// would reject are skipped and reported. Words without a `normalized` form
/// get one computed from the headword.
#[derive(Debug, clap::Parser)]
struct Opts {
    /// Filepath of the JSON dump to import.
    #[arg(short, long)]
    input: std::path::PathBuf,

    /// URL that can be used to connect to target database using SQLX.
    /// See the SQLX documentation on the DATABASE_URL environment variable for more details.
    #[arg(short, long, env = "DATABASE_URL")]
    database_url: String,

    /// Batch size of the insert batches. Capped so one insert stays within
    /// the bind parameter limit.
    #[arg(short, long, default_value_t = 1000)]
    batch_size: usize,
}

#[derive(Debug, Default, Deserialize)]
struct Dump {
    #[serde(default)]
    words: Vec<serde_json::Value>,
    #[serde(default)]
    examples: Vec<serde_json::Value>,
}

/// Keep the entries that deserialize and validate, reporting the rest.
fn accept<T, F>(entries: Vec<serde_json::Value>, kind: &str, validate: F) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
    F: Fn(&T) -> anyhow::Result<()>,
{
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            match serde_json::from_value::<T>(entry)
                .map_err(anyhow::Error::from)
                .and_then(|parsed| validate(&parsed).map(|_| parsed))
            {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    eprintln!("Skipping {} #{}: {}", kind, idx, e);
                    None
                }
            }
        })
        .collect()
}

fn rows_per_batch(requested: usize, columns: usize) -> usize {
    requested.clamp(1, MAX_BIND_PARAMS / columns)
}

async fn insert_words(conn: &mut sqlx::PgConnection, words: &[Word]) -> anyhow::Result<()> {
    let mut builder = sqlx::QueryBuilder::new(
        "insert into words (id, word, word_class, definitions, variations, normalized, frequency, stems) ",
    );
    builder.push_values(words, |mut b, word| {
        b.push_bind(word.id)
            .push_bind(word.word.clone())
            .push_bind(word.word_class.clone())
            .push_bind(word.definitions.clone())
            .push_bind(word.variations.clone())
            .push_bind(word.normalized.clone())
            .push_bind(word.frequency)
            .push_bind(word.stems.clone());
    });

    builder
        .build()
        .execute(conn)
        .await
        .with_context(|| anyhow::anyhow!("Failed to insert word batch"))
        .map(|_| ())
}

async fn insert_examples(
    conn: &mut sqlx::PgConnection,
    examples: &[Example],
) -> anyhow::Result<()> {
    let mut builder = sqlx::QueryBuilder::new(
        "insert into examples (id, igbo, english, associated_words, updated_on) ",
    );
    builder.push_values(examples, |mut b, example| {
        b.push_bind(example.id)
            .push_bind(example.igbo.clone())
            .push_bind(example.english.clone())
            .push_bind(example.associated_words.clone())
            .push_bind(example.updated_on);
    });

    builder
        .build()
        .execute(conn)
        .await
        .with_context(|| anyhow::anyhow!("Failed to insert example batch"))
        .map(|_| ())
}
