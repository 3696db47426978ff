pub mod table;

pub use table::Table;

use crate::error::Result;
use car_matcher_common::{CatalogEntry, Query};
use std::path::Path;

/// カタログの必須列
pub const CATALOG_COLUMNS: [&str; 4] = ["Brand", "Model", "Generation", "Version"];

/// ユーザー入力の必須列
pub const QUERY_COLUMNS: [&str; 4] = ["car_id", "marka", "model", "rok"];

pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    catalog_from_table(&Table::read(path)?)
}

pub fn load_queries(path: &Path) -> Result<Vec<Query>> {
    queries_from_table(&Table::read(path)?)
}

pub fn catalog_from_table(table: &Table) -> Result<Vec<CatalogEntry>> {
    let rows = table.select(&CATALOG_COLUMNS)?;

    Ok(rows
        .into_iter()
        .map(|fields| CatalogEntry {
            brand: fields[0].to_string(),
            model: fields[1].to_string(),
            generation_label: fields[2].to_string(),
            version_label: fields[3].to_string(),
        })
        .collect())
}

pub fn queries_from_table(table: &Table) -> Result<Vec<Query>> {
    let rows = table.select(&QUERY_COLUMNS)?;

    Ok(rows
        .into_iter()
        .map(|fields| Query {
            query_id: fields[0].to_string(),
            brand: fields[1].to_string(),
            model: fields[2].to_string(),
            year: fields[3].to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CarMatcherError;

    #[test]
    fn test_catalog_from_table() {
        let table = Table::parse(
            "catalog",
            "Brand;Model;Generation;Version\nAudi;A4;B8;(2008-2015)\nOpel;Astra;F;(1991-1998)\n",
        );
        let catalog = catalog_from_table(&table).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].generation_label, "B8");
        assert_eq!(catalog[1].version_label, "(1991-1998)");
    }

    #[test]
    fn test_queries_from_table_extra_columns() {
        // 余分な列があっても必要な列だけ拾う
        let table = Table::parse(
            "queries",
            "id_db;car_id;marka;model;rok;kolor\n7;42;audi;a4;2010;red\n",
        );
        let queries = queries_from_table(&table).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].query_id, "42");
        assert_eq!(queries[0].brand, "audi");
        assert_eq!(queries[0].year, "2010");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_catalog(Path::new("/nonexistent/catalog.csv"));
        assert!(matches!(result, Err(CarMatcherError::FileNotFound(_))));
    }
}
