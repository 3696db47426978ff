//! 照合結果のCSV行
//!
//! 列: `CarID;Ratio;MatchedId;MatchedBrand;MatchedModel;MatchedGeneration;MatchedVersion`

use crate::error::Result;
use crate::loader::table::{quote_field, Table};
use car_matcher_common::RankedResult;

const SEPARATOR: &str = ";";

pub const HEADER_COLUMNS: [&str; 7] = [
    "CarID",
    "Ratio",
    "MatchedId",
    "MatchedBrand",
    "MatchedModel",
    "MatchedGeneration",
    "MatchedVersion",
];

/// 出力ファイルの1行（クエリ1件 × 候補1件）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    pub car_id: String,
    pub ratio: String,
    pub matched_id: String,
    pub brand: String,
    pub model: String,
    pub generation: String,
    pub version: String,
}

impl MatchRow {
    /// 照合結果を行に展開（順位順）
    pub fn from_result(result: &RankedResult<'_>) -> Vec<MatchRow> {
        result
            .top_candidates
            .iter()
            .map(|c| MatchRow {
                car_id: result.query_id.clone(),
                ratio: format_ratio(c.ratio),
                matched_id: c.matched_index.to_string(),
                brand: c.matched_entry.brand.clone(),
                model: c.matched_entry.model.clone(),
                generation: c.matched_entry.generation_label.clone(),
                version: c.matched_entry.version_label.clone(),
            })
            .collect()
    }

    pub fn to_line(&self) -> String {
        [
            &self.car_id,
            &self.ratio,
            &self.matched_id,
            &self.brand,
            &self.model,
            &self.generation,
            &self.version,
        ]
        .iter()
        .map(|f| quote_field(f))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
    }
}

/// 既存の出力ファイルから行を読み戻す
pub fn rows_from_table(table: &Table) -> Result<Vec<MatchRow>> {
    let rows = table.select(&HEADER_COLUMNS)?;

    Ok(rows
        .into_iter()
        .map(|f| MatchRow {
            car_id: f[0].to_string(),
            ratio: f[1].to_string(),
            matched_id: f[2].to_string(),
            brand: f[3].to_string(),
            model: f[4].to_string(),
            generation: f[5].to_string(),
            version: f[6].to_string(),
        })
        .collect())
}

/// ヘッダー + 行をファイル内容に整形（末尾改行なし）
pub fn render_rows<'a>(rows: impl IntoIterator<Item = &'a MatchRow>) -> String {
    let mut lines = vec![HEADER_COLUMNS.join(SEPARATOR)];
    lines.extend(rows.into_iter().map(MatchRow::to_line));
    lines.join("\n")
}

/// 照合結果をファイル内容に整形
pub fn render_results(results: &[RankedResult<'_>]) -> String {
    let rows: Vec<MatchRow> = results.iter().flat_map(MatchRow::from_result).collect();
    render_rows(&rows)
}

/// スコアを書き出し用の文字列にする
///
/// 整数値は `1.0`、極小値は `1e-05` のように表記を揃える。
pub fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() && ratio.fract() == 0.0 {
        return format!("{:.1}", ratio);
    }
    if ratio != 0.0 && ratio.abs() < 1e-4 {
        let sci = format!("{:e}", ratio);
        if let Some((mantissa, exponent)) = sci.split_once('e') {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(d) => ("-", d),
                None => ("+", exponent),
            };
            return format!("{}e{}{:0>2}", mantissa, sign, digits);
        }
    }
    format!("{}", ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_matcher_common::{Candidate, CatalogEntry};

    fn entry() -> CatalogEntry {
        CatalogEntry {
            brand: "Audi".to_string(),
            model: "A4".to_string(),
            generation_label: "B8".to_string(),
            version_label: "(2008-2015)".to_string(),
        }
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0.78733), "0.78733");
        assert_eq!(format_ratio(1.0), "1.0");
        assert_eq!(format_ratio(0.0), "0.0");
        assert_eq!(format_ratio(0.5), "0.5");
        assert_eq!(format_ratio(0.00001), "1e-05");
    }

    #[test]
    fn test_render_results() {
        let e = entry();
        let results = vec![RankedResult {
            query_id: "1".to_string(),
            top_candidates: vec![Candidate {
                ratio: 0.78733,
                matched_index: 0,
                matched_entry: &e,
            }],
        }];

        let content = render_results(&results);
        assert_eq!(
            content,
            "CarID;Ratio;MatchedId;MatchedBrand;MatchedModel;MatchedGeneration;MatchedVersion\n\
             1;0.78733;0;Audi;A4;B8;(2008-2015)"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_results(&[]), HEADER_COLUMNS.join(";"));
    }

    #[test]
    fn test_rows_from_table() {
        let e = entry();
        let results = vec![RankedResult {
            query_id: "9".to_string(),
            top_candidates: vec![Candidate {
                ratio: 0.5,
                matched_index: 3,
                matched_entry: &e,
            }],
        }];
        let table = Table::parse("chunk", &render_results(&results));
        let rows = rows_from_table(&table).unwrap();
        assert_eq!(rows, MatchRow::from_result(&results[0]));
    }
}
