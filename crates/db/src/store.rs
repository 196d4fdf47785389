//! Store gateway: parameterized `query` / `execute` over a row store.
//!
//! Statements are written with named placeholders (`:id`, `:project_id`) and
//! bound from a [`Params`] map. [`SqlStore`] rewrites them into the
//! positional `$n` form understood by both SQLite and PostgreSQL before
//! handing them to sqlx.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::error::ErrorKind;
use sqlx::{Column, Row as _};

use crate::DbPool;

/// Errors surfaced by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("statement references unbound parameter :{0}")]
    UnboundParameter(String),

    #[error("column {0} is missing or null in result row")]
    MissingColumn(String),
}

impl StoreError {
    /// Whether the store rejected a write because a foreign key points nowhere.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::Sqlx(sqlx::Error::Database(db_err)) => {
                db_err.kind() == ErrorKind::ForeignKeyViolation
            }
            _ => false,
        }
    }
}

/// Named parameter values for a single statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to `:name`, replacing any earlier binding of the same name.
    pub fn bind(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name.to_owned(), value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One result row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: HashMap<String, Option<String>>,
}

impl Row {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.to_owned(), Some(v.to_owned())))
                .collect(),
        }
    }

    /// Text value of a non-null column.
    pub fn text(&self, column: &str) -> Result<String, StoreError> {
        self.columns
            .get(column)
            .cloned()
            .flatten()
            .ok_or_else(|| StoreError::MissingColumn(column.to_owned()))
    }
}

/// Abstract row store reachable through parameterized statements.
#[async_trait]
pub trait Store: Send + Sync {
    /// Run a statement that returns rows.
    async fn query(&self, statement: &str, params: &Params) -> Result<Vec<Row>, StoreError>;

    /// Run a statement for its side effects.
    async fn execute(&self, statement: &str, params: &Params) -> Result<(), StoreError>;
}

/// A statement rewritten to positional placeholders plus its bind values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStatement {
    pub sql: String,
    pub binds: Vec<String>,
}

/// Rewrite `:name` placeholders to `$1`, `$2`, ... in order of first use.
///
/// A name used twice maps to the same position. Quoted literals and `::`
/// casts are left alone.
pub fn compile_named(statement: &str, params: &Params) -> Result<CompiledStatement, StoreError> {
    let mut sql = String::with_capacity(statement.len());
    let mut order: Vec<&str> = Vec::new();
    let mut chars = statement.char_indices().peekable();
    let mut in_literal = false;

    while let Some((i, c)) = chars.next() {
        if in_literal {
            sql.push(c);
            if c == '\'' {
                in_literal = false;
            }
            continue;
        }

        match c {
            '\'' => {
                in_literal = true;
                sql.push(c);
            }
            ':' if matches!(chars.peek(), Some((_, ':'))) => {
                chars.next();
                sql.push_str("::");
            }
            ':' if matches!(chars.peek(), Some((_, n)) if n.is_ascii_alphabetic() || *n == '_') => {
                let start = i + 1;
                let mut end = start;
                while let Some(&(j, n)) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        end = j + n.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let name = &statement[start..end];
                let position = match order.iter().position(|n| *n == name) {
                    Some(p) => p + 1,
                    None => {
                        order.push(name);
                        order.len()
                    }
                };
                sql.push_str(&format!("${position}"));
            }
            _ => sql.push(c),
        }
    }

    let binds = order
        .into_iter()
        .map(|name| {
            params
                .get(name)
                .map(str::to_owned)
                .ok_or_else(|| StoreError::UnboundParameter(name.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledStatement { sql, binds })
}

/// [`Store`] backed by a sqlx pool.
#[derive(Debug, Clone)]
pub struct SqlStore {
    pool: DbPool,
}

impl SqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for SqlStore {
    async fn query(&self, statement: &str, params: &Params) -> Result<Vec<Row>, StoreError> {
        let CompiledStatement { sql, binds } = compile_named(statement, params)?;
        tracing::trace!(%sql, binds = binds.len(), "Running query");

        let mut query = sqlx::query::<sqlx::Any>(&sql);
        for value in binds {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, statement: &str, params: &Params) -> Result<(), StoreError> {
        let CompiledStatement { sql, binds } = compile_named(statement, params)?;
        tracing::trace!(%sql, binds = binds.len(), "Running statement");

        let mut query = sqlx::query::<sqlx::Any>(&sql);
        for value in binds {
            query = query.bind(value);
        }

        query.execute(&self.pool).await?;
        Ok(())
    }
}

fn decode_row(row: &AnyRow) -> Result<Row, StoreError> {
    let mut columns = HashMap::with_capacity(row.columns().len());
    for column in row.columns() {
        let value: Option<String> = row.try_get(column.ordinal())?;
        columns.insert(column.name().to_owned(), value);
    }
    Ok(Row { columns })
}
