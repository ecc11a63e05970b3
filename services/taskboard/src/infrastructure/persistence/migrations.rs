//! 内置数据库迁移

use taskboard_adapter_postgres::Migration;

/// 按版本排列的全部迁移
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "create_todos",
            include_str!("migrations/001_create_todos.sql"),
        ),
        Migration::new(2, "create_tags", include_str!("migrations/002_create_tags.sql")),
        Migration::new(
            3,
            "create_categories",
            include_str!("migrations/003_create_categories.sql"),
        ),
    ]
}
