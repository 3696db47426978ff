//! 類似度スコアラ
//!
//! ユーザー入力とカタログエントリの組に対して最終スコアを計算する。
//!
//! ## 計算手順
//! 1. 比較文字列を作る（クエリ: "Brand Model"、カタログ: "Brand Model 世代ラベル"）
//! 2. 編集距離ベースの類似度を求める
//! 3. 年式がカタログの範囲に入っていればボーナスを加算（1件目 +0.2、2件目 +0.1）
//! 4. `(類似度 + ボーナス) / 1.3` を小数5桁に丸める

use crate::similarity::{capitalize, similarity_ratio_chars};
use crate::types::{CatalogEntry, Query};
use crate::year_range::{extract_year_ranges, parse_query_year, strip_parenthesized_ranges, YearRange};

/// 1件目の範囲に入ったときのボーナス
pub const PRIMARY_RANGE_BONUS: f64 = 0.2;
/// 2件目の範囲に入ったときのボーナス
pub const SECONDARY_RANGE_BONUS: f64 = 0.1;
/// 類似度 + 最大ボーナス
pub const SCORE_SCALE: f64 = 1.3;

/// 比較用に前処理したクエリ
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    text: Vec<char>,
    year: Option<i32>,
}

impl PreparedQuery {
    pub fn new(query: &Query) -> Self {
        Self {
            text: query_comparison_string(query).chars().collect(),
            year: parse_query_year(&query.year),
        }
    }
}

/// 比較用に前処理したカタログエントリ
#[derive(Debug, Clone)]
pub struct PreparedEntry {
    text: Vec<char>,
    ranges: Vec<YearRange>,
}

impl PreparedEntry {
    pub fn new(entry: &CatalogEntry, current_year: i32) -> Self {
        Self {
            text: catalog_comparison_string(entry).chars().collect(),
            ranges: extract_year_ranges(&entry.label_text(), current_year),
        }
    }
}

/// クエリ側の比較文字列（"Audi A4"）
pub fn query_comparison_string(query: &Query) -> String {
    format!("{} {}", capitalize(&query.brand), capitalize(&query.model))
}

/// カタログ側の比較文字列（"Audi A4 B8"）
///
/// モデル名の大文字小文字は保持する。括弧付きの年式範囲は除去する。
pub fn catalog_comparison_string(entry: &CatalogEntry) -> String {
    let head = format!("{} {}", capitalize(&entry.brand), entry.model);
    let label = strip_parenthesized_ranges(&entry.label_text());
    if label.is_empty() {
        head
    } else {
        format!("{} {}", head, label)
    }
}

/// 年式ボーナスを計算する
pub fn year_bonus(year: Option<i32>, ranges: &[YearRange]) -> f64 {
    let Some(year) = year else {
        return 0.0;
    };

    let mut bonus = 0.0;
    if ranges.first().is_some_and(|r| r.contains(year)) {
        bonus += PRIMARY_RANGE_BONUS;
    }
    if ranges.get(1).is_some_and(|r| r.contains(year)) {
        bonus += SECONDARY_RANGE_BONUS;
    }
    bonus
}

/// 小数5桁に丸める
///
/// ちょうど中間の値は0から遠い方へ丸める（偶数丸めではない）。
/// 例: `0.078125` は `0.07813` になる。
pub fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

/// 前処理済みの組でスコアを計算する
pub fn score_prepared(query: &PreparedQuery, entry: &PreparedEntry) -> f64 {
    let base = similarity_ratio_chars(&query.text, &entry.text);
    let bonus = year_bonus(query.year, &entry.ranges);
    round5((base + bonus) / SCORE_SCALE)
}

/// クエリとカタログエントリのスコアを計算する
///
/// # Arguments
/// * `query` - ユーザー入力
/// * `entry` - カタログエントリ
/// * `current_year` - `present` を解決する年
pub fn score(query: &Query, entry: &CatalogEntry, current_year: i32) -> f64 {
    score_prepared(&PreparedQuery::new(query), &PreparedEntry::new(entry, current_year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(brand: &str, model: &str, generation: &str, version: &str) -> CatalogEntry {
        CatalogEntry {
            brand: brand.to_string(),
            model: model.to_string(),
            generation_label: generation.to_string(),
            version_label: version.to_string(),
        }
    }

    fn query(brand: &str, model: &str, year: &str) -> Query {
        Query {
            query_id: "1".to_string(),
            brand: brand.to_string(),
            model: model.to_string(),
            year: year.to_string(),
        }
    }

    #[test]
    fn test_comparison_strings() {
        let q = query("audi", "a4", "2010");
        assert_eq!(query_comparison_string(&q), "Audi A4");

        let e = entry("AUDI", "A4 Allroad", "B8", "(2008-2015)");
        assert_eq!(catalog_comparison_string(&e), "Audi A4 Allroad B8");

        let bare = entry("audi", "A4", "", "");
        assert_eq!(catalog_comparison_string(&bare), "Audi A4");
    }

    #[test]
    fn test_score_with_primary_bonus() {
        let q = query("audi", "a4", "2010");
        let e = entry("Audi", "A4", "B8", "(2008-2015)");

        // "Audi A4" vs "Audi A4 B8": 14/17
        let expected = round5((14.0 / 17.0 + 0.2) / 1.3);
        assert_eq!(score(&q, &e, 2024), expected);
        assert_eq!(expected, 0.78733);
    }

    #[test]
    fn test_unknown_year_gets_no_bonus() {
        let e = entry("Audi", "A4", "B8", "(2008-2015)");
        let base = round5((14.0 / 17.0) / 1.3);
        assert_eq!(score(&query("audi", "a4", "0"), &e, 2024), base);
        assert_eq!(score(&query("audi", "a4", "abc"), &e, 2024), base);
        assert_eq!(score(&query("audi", "a4", ""), &e, 2024), base);
    }

    #[test]
    fn test_year_beyond_both_ranges() {
        let e = entry("Opel", "Astra", "(1990-1995)", "(1996-present)");
        let prepared = PreparedEntry::new(&e, 2024);
        assert_eq!(year_bonus(Some(2030), &prepared.ranges), 0.0);
    }

    #[test]
    fn test_second_range_uses_its_own_upper_bound() {
        let ranges = [YearRange::new(1997, 2001), YearRange::new(2002, 2004)];
        assert_eq!(year_bonus(Some(2003), &ranges), SECONDARY_RANGE_BONUS);
        assert_eq!(year_bonus(Some(1999), &ranges), PRIMARY_RANGE_BONUS);
        assert_eq!(year_bonus(Some(2005), &ranges), 0.0);
    }

    #[test]
    fn test_overlapping_ranges_stack() {
        let ranges = [YearRange::new(2000, 2010), YearRange::new(2005, 2012)];
        assert!((year_bonus(Some(2006), &ranges) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_score_bounds() {
        // 完全一致 + 両方の範囲に一致で 1.0
        let q = query("fiat", "uno", "2000");
        let e = entry("Fiat", "Uno", "(1999-2001)", "(2000-2002)");
        assert_eq!(catalog_comparison_string(&e), "Fiat Uno");
        assert_eq!(score(&q, &e, 2024), 1.0);

        let nothing = entry("", "", "", "");
        let s = score(&query("", "", ""), &nothing, 2024);
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn test_open_range_uses_injected_year() {
        let e = entry("Skoda", "Octavia", "IV", "(2019-present)");
        let q = query("skoda", "octavia", "2022");
        assert!(score(&q, &e, 2023) > score(&q, &e, 2020));
    }

    #[test]
    fn test_round5() {
        assert_eq!(round5(0.123456789), 0.12346);
        assert_eq!(round5(1.0), 1.0);
        assert_eq!(round5(0.0), 0.0);
    }

    #[test]
    fn test_round5_half_away_from_zero() {
        // 0.078125 は2進で正確に表せる中間値
        assert_eq!(round5(0.078125), 0.07813);
        assert_eq!(round5(-0.078125), -0.07813);
    }
}
