//! 表结构迁移

use adapter_mysql::Migration;

pub const PRODUCT_MIGRATIONS: &[Migration] = &[Migration::new(
    1,
    "create_products",
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT NULL,
        price DECIMAL(19, 2) NOT NULL
    )
    "#,
)];
