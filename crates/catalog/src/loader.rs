// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Schema loader
//!
//! Builds a [`DbInfo`] by repeatedly calling a [`Driver`]. Every round trip
//! is awaited before the next one is issued. Any failure aborts the load;
//! there is no partial schema.

use sqlforge_ir::{DbInfo, ForeignKeyInfo, IndexInfo, TableInfo};
use tracing::{debug, info};

use crate::connection::Connection;
use crate::error::{CatalogError, CatalogResult};
use crate::r#trait::Driver;

/// Load the whole schema of the connection's current database
///
/// # Errors
///
/// Propagates every driver error. Returns `CatalogError::Inconsistency` if
/// an index or foreign key names a column its table does not have, or if a
/// foreign key references a table or column that does not exist.
pub async fn load_schema(driver: &dyn Driver, conn: &mut dyn Connection) -> CatalogResult<DbInfo> {
    let table_names = driver.extract_table_names(conn).await?;
    info!("Loading {} tables with driver '{}'", table_names.len(), driver.name());

    let mut tables = Vec::with_capacity(table_names.len());
    for name in &table_names {
        tables.push(load_table(driver, conn, name).await?);
    }

    let db = DbInfo::new(tables);
    validate_foreign_keys(&db)?;
    Ok(db)
}

/// Load one table: columns, auto increment column, indexes, foreign keys
pub async fn load_table(
    driver: &dyn Driver,
    conn: &mut dyn Connection,
    name: &str,
) -> CatalogResult<TableInfo> {
    let columns = driver
        .extract_columns(conn, name)
        .await?
        .into_iter()
        .map(|column| column.with_table(name))
        .collect();
    let mut table = TableInfo::new(name, columns);

    if let Some(auto_inc) = driver.extract_auto_inc_column(conn, name).await? {
        table.auto_inc_column = Some(resolve(&table, &auto_inc, "auto increment column")?);
    }

    for index_name in driver.extract_index_names(conn, name).await? {
        let def = driver.extract_index(conn, name, &index_name).await?;
        let columns = def
            .columns
            .iter()
            .map(|column| resolve(&table, column, &format!("index '{}'", index_name)))
            .collect::<CatalogResult<Vec<_>>>()?;
        table.indexes.push(IndexInfo {
            name: index_name,
            columns,
            is_primary: def.is_primary,
            is_unique: def.is_unique,
        });
    }

    for fk_name in driver.extract_fk_names(conn, name).await? {
        let def = driver.extract_fk(conn, name, &fk_name).await?;
        if def.columns.len() != def.ref_columns.len() {
            return Err(CatalogError::inconsistency(format!(
                "foreign key '{}' in table '{}' has {} columns but {} referenced columns",
                fk_name,
                name,
                def.columns.len(),
                def.ref_columns.len()
            )));
        }
        let columns = def
            .columns
            .iter()
            .map(|column| resolve(&table, column, &format!("foreign key '{}'", fk_name)))
            .collect::<CatalogResult<Vec<_>>>()?;
        table.foreign_keys.push(ForeignKeyInfo {
            name: fk_name,
            columns,
            ref_table: def.ref_table,
            ref_columns: def.ref_columns,
        });
    }

    debug!(
        "Loaded table '{}': {} columns, {} indexes, {} foreign keys",
        name,
        table.columns.len(),
        table.indexes.len(),
        table.foreign_keys.len()
    );
    Ok(table)
}

fn resolve(table: &TableInfo, column: &str, owner: &str) -> CatalogResult<usize> {
    table.position_of(column).ok_or_else(|| {
        CatalogError::inconsistency(format!(
            "{} of table '{}' names unknown column '{}'",
            owner, table.name, column
        ))
    })
}

/// Every foreign key must point at an existing table and columns
fn validate_foreign_keys(db: &DbInfo) -> CatalogResult<()> {
    for table in db.tables() {
        for fk in &table.foreign_keys {
            let Some(target) = db.table(&fk.ref_table) else {
                return Err(CatalogError::inconsistency(format!(
                    "foreign key '{}' in table '{}' references unknown table '{}'",
                    fk.name, table.name, fk.ref_table
                )));
            };
            if let Some(missing) = fk.ref_columns.iter().find(|c| target.column(c).is_none()) {
                return Err(CatalogError::inconsistency(format!(
                    "foreign key '{}' in table '{}' references unknown column '{}.{}'",
                    fk.name, table.name, fk.ref_table, missing
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlforge_ir::{CanonicalType, ColumnInfo};

    fn table(name: &str, columns: &[&str]) -> TableInfo {
        TableInfo::new(
            name,
            columns
                .iter()
                .enumerate()
                .map(|(i, c)| ColumnInfo::new(*c, i, CanonicalType::Int64))
                .collect(),
        )
    }

    #[test]
    fn test_validate_foreign_keys_ok() {
        let mut orders = table("orders", &["id", "user_id"]);
        orders.foreign_keys.push(ForeignKeyInfo {
            name: "fk_user".to_string(),
            columns: vec![1],
            ref_table: "users".to_string(),
            ref_columns: vec!["id".to_string()],
        });
        let db = DbInfo::new(vec![table("users", &["id"]), orders]);
        assert!(validate_foreign_keys(&db).is_ok());
    }

    #[test]
    fn test_validate_foreign_keys_unknown_table() {
        let mut orders = table("orders", &["id", "user_id"]);
        orders.foreign_keys.push(ForeignKeyInfo {
            name: "fk_user".to_string(),
            columns: vec![1],
            ref_table: "users".to_string(),
            ref_columns: vec!["id".to_string()],
        });
        let db = DbInfo::new(vec![orders]);
        let err = validate_foreign_keys(&db).unwrap_err();
        assert!(err.to_string().contains("unknown table 'users'"));
    }

    #[test]
    fn test_validate_foreign_keys_unknown_column() {
        let mut orders = table("orders", &["id", "user_id"]);
        orders.foreign_keys.push(ForeignKeyInfo {
            name: "fk_user".to_string(),
            columns: vec![1],
            ref_table: "users".to_string(),
            ref_columns: vec!["uid".to_string()],
        });
        let db = DbInfo::new(vec![table("users", &["id"]), orders]);
        assert!(matches!(
            validate_foreign_keys(&db),
            Err(CatalogError::Inconsistency(_))
        ));
    }

    #[test]
    fn test_resolve() {
        let users = table("users", &["id", "email"]);
        assert_eq!(resolve(&users, "email", "index 'x'").unwrap(), 1);
        assert!(resolve(&users, "name", "index 'x'").is_err());
    }
}
