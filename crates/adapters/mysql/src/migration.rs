//! MySQL 迁移管理模块
//!
//! 按版本顺序应用内置的 schema 迁移，已应用的版本记录在 `_migrations` 表中

use std::collections::HashSet;

use errors::{AppError, AppResult};
use sqlx::MySqlPool;
use tracing::{debug, info};

/// 迁移定义
#[derive(Debug, Clone)]
pub struct Migration {
    /// 版本号
    pub version: i64,
    /// 名称
    pub name: &'static str,
    /// 升级 SQL
    pub up_sql: &'static str,
}

impl Migration {
    pub const fn new(version: i64, name: &'static str, up_sql: &'static str) -> Self {
        Self {
            version,
            name,
            up_sql,
        }
    }
}

/// 迁移管理器
pub struct MigrationManager {
    pool: MySqlPool,
    table_name: String,
}

impl MigrationManager {
    /// 创建新的迁移管理器
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            table_name: "_migrations".to_string(),
        }
    }

    /// 初始化迁移表
    pub async fn init(&self) -> AppResult<()> {
        let create_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            self.table_name
        );

        sqlx::query(&create_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create migration table: {}", e)))?;

        debug!(table = %self.table_name, "Migration table initialized");
        Ok(())
    }

    /// 获取已应用的版本
    pub async fn applied_versions(&self) -> AppResult<HashSet<i64>> {
        let sql = format!("SELECT version FROM {}", self.table_name);

        let versions: Vec<i64> = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get migrations: {}", e)))?;

        Ok(versions.into_iter().collect())
    }

    /// 应用单个迁移
    ///
    /// MySQL 的 DDL 会隐式提交，因此迁移 SQL 自身需要是可重复执行的。
    pub async fn apply(&self, migration: &Migration) -> AppResult<()> {
        sqlx::query(migration.up_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to apply migration {}: {}",
                    migration.version, e
                ))
            })?;

        let insert_sql = format!(
            "INSERT INTO {} (version, name) VALUES (?, ?)",
            self.table_name
        );
        sqlx::query(&insert_sql)
            .bind(migration.version)
            .bind(migration.name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to record migration: {}", e)))?;

        info!(
            version = migration.version,
            name = migration.name,
            "Migration applied successfully"
        );

        Ok(())
    }

    /// 应用所有待处理的迁移，返回本次应用的版本
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<Vec<i64>> {
        self.init().await?;

        let applied = self.applied_versions().await?;
        let mut applied_now = Vec::new();

        for migration in pending(migrations, &applied) {
            self.apply(migration).await?;
            applied_now.push(migration.version);
        }

        Ok(applied_now)
    }
}

/// 尚未应用的迁移，按版本升序
fn pending<'a>(migrations: &'a [Migration], applied: &HashSet<i64>) -> Vec<&'a Migration> {
    let mut pending: Vec<_> = migrations
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .collect();
    pending.sort_by_key(|m| m.version);
    pending
}

/// 应用全部待处理迁移
pub async fn run_migrations(pool: &MySqlPool, migrations: &[Migration]) -> AppResult<()> {
    let applied = MigrationManager::new(pool.clone())
        .migrate(migrations)
        .await?;

    info!(applied = applied.len(), "Database schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_skips_applied_and_sorts() {
        let migrations = [
            Migration::new(3, "c", "SELECT 3"),
            Migration::new(1, "a", "SELECT 1"),
            Migration::new(2, "b", "SELECT 2"),
        ];
        let applied: HashSet<i64> = [1].into_iter().collect();

        let versions: Vec<i64> = pending(&migrations, &applied)
            .into_iter()
            .map(|m| m.version)
            .collect();

        assert_eq!(versions, vec![2, 3]);
    }

    #[test]
    fn test_pending_when_all_applied() {
        let migrations = [Migration::new(1, "a", "SELECT 1")];
        let applied: HashSet<i64> = [1].into_iter().collect();
        assert!(pending(&migrations, &applied).is_empty());
    }
}
