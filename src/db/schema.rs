use sqlx::PgPool;

/// Table names are interpolated into SQL, so only plain identifiers are allowed.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Creates the document table and its date index if missing.
pub async fn ensure_items_table(pool: &PgPool, table: &str) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (\
            id uuid PRIMARY KEY, \
            document jsonb NOT NULL, \
            created_at timestamptz NOT NULL DEFAULT now()\
        )"
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS {table}_date_idx ON {table} ((document->>'date') DESC)"
    ))
    .execute(pool)
    .await?;

    tracing::debug!("Ensured table {}", table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert!(is_valid_table_name("lost_found_items"));
        assert!(is_valid_table_name("_items2"));
        assert!(!is_valid_table_name("items; DROP TABLE x"));
        assert!(!is_valid_table_name("Items"));
        assert!(!is_valid_table_name("2items"));
        assert!(!is_valid_table_name(""));
    }
}
