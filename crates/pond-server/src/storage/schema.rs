//! Table definition for persisted readings

/// Name of the readings table.
pub const TABLE: &str = "pond_logs";

pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub constraint: &'static str,
}

/// Columns in storage order. `id` is the SQLite rowid alias.
pub const COLUMNS: &[Column] = &[
    Column { name: "id", sql_type: "INTEGER", constraint: "PRIMARY KEY" },
    Column { name: "timestamp", sql_type: "DATETIME", constraint: "NOT NULL" },
    Column { name: "ph", sql_type: "FLOAT", constraint: "NOT NULL" },
    Column { name: "ec", sql_type: "FLOAT", constraint: "NOT NULL" },
    Column { name: "do", sql_type: "FLOAT", constraint: "NOT NULL" },
    Column { name: "temp", sql_type: "FLOAT", constraint: "NOT NULL" },
];

// `do` is a reserved word, so every identifier is quoted.
fn quoted(name: &str) -> String {
    format!("\"{}\"", name)
}

fn column_list<'a>(columns: impl Iterator<Item = &'a Column>) -> String {
    columns.map(|c| quoted(c.name)).collect::<Vec<_>>().join(", ")
}

/// Idempotent table creation.
pub fn create_table_sql() -> String {
    let definitions = COLUMNS
        .iter()
        .map(|c| format!("{} {} {}", quoted(c.name), c.sql_type, c.constraint))
        .collect::<Vec<_>>()
        .join(",\n    ");
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        quoted(TABLE),
        definitions
    )
}

/// Insert of every column except `id`, bound positionally in column order.
pub fn insert_sql() -> String {
    let columns: Vec<&Column> = COLUMNS.iter().filter(|c| c.name != "id").collect();
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(TABLE),
        column_list(columns.into_iter()),
        placeholders
    )
}

pub fn select_all_sql() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY \"id\" ASC",
        column_list(COLUMNS.iter()),
        quoted(TABLE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_is_idempotent_statement() {
        let sql = create_table_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"pond_logs\""));
        assert!(sql.contains("\"id\" INTEGER PRIMARY KEY"));
        assert!(sql.contains("\"do\" FLOAT NOT NULL"));
    }

    #[test]
    fn test_insert_skips_id() {
        assert_eq!(
            insert_sql(),
            "INSERT INTO \"pond_logs\" (\"timestamp\", \"ph\", \"ec\", \"do\", \"temp\") \
             VALUES (?1, ?2, ?3, ?4, ?5)"
        );
    }

    #[test]
    fn test_select_orders_by_id() {
        let sql = select_all_sql();
        assert!(sql.starts_with("SELECT \"id\", \"timestamp\""));
        assert!(sql.ends_with("ORDER BY \"id\" ASC"));
    }
}
