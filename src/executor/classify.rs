/// Statement categories recognized by the executor.
///
/// Three mutually exclusive buckets, matched on the leading keyword,
/// case-insensitively, with leading whitespace tolerated; first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `CREATE` / `ALTER` / `TRUNCATE` / `DROP`
    Ddl,
    /// `INSERT` / `DELETE` / `UPDATE` / `REPLACE`
    Mutation {
        /// Insert-style statements additionally capture the generated id.
        captures_insert_id: bool,
    },
    /// Everything else is treated as a read-style statement.
    Read,
}

impl StatementKind {
    #[must_use]
    pub fn classify(sql: &str) -> Self {
        let trimmed = sql.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let keyword = &trimmed[..end];

        if matches_any(keyword, &["create", "alter", "truncate", "drop"]) {
            StatementKind::Ddl
        } else if matches_any(keyword, &["insert", "replace"]) {
            StatementKind::Mutation {
                captures_insert_id: true,
            }
        } else if matches_any(keyword, &["delete", "update"]) {
            StatementKind::Mutation {
                captures_insert_id: false,
            }
        } else {
            StatementKind::Read
        }
    }
}

fn matches_any(keyword: &str, candidates: &[&str]) -> bool {
    candidates.iter().any(|c| keyword.eq_ignore_ascii_case(c))
}

/// The normalized outcome of one executed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// DDL ran; the driver reports no counts for these, so success is the
    /// `Ok` itself.
    Ddl,
    /// A row-mutating statement ran.
    Mutation {
        rows_affected: u64,
        /// Generated identifier, captured for insert/replace only.
        last_insert_id: Option<u64>,
    },
    /// A read-style statement ran and its result set was cached.
    Read { rows: usize },
}

impl QueryOutcome {
    /// Rows affected, for mutation outcomes.
    #[must_use]
    pub fn rows_affected(&self) -> Option<u64> {
        match self {
            QueryOutcome::Mutation { rows_affected, .. } => Some(*rows_affected),
            _ => None,
        }
    }

    /// Rows selected, for read outcomes.
    #[must_use]
    pub fn rows(&self) -> Option<usize> {
        match self {
            QueryOutcome::Read { rows } => Some(*rows),
            _ => None,
        }
    }
}
