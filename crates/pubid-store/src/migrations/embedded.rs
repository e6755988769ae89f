//! Embedded SQL migrations
//!
//! Migrations are embedded at compile time using include_str!

/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Get all embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_documents",
            sql: include_str!("../../migrations/001_documents.sql"),
        },
        Migration {
            id: "002_documents_type_index",
            sql: include_str!("../../migrations/002_documents_type_index.sql"),
        },
        Migration {
            id: "003_seed_imports",
            sql: include_str!("../../migrations/003_seed_imports.sql"),
        },
    ]
}
