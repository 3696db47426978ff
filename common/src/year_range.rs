//! 年式範囲のパーサ
//!
//! カタログの世代・バージョンラベルに埋め込まれた年式範囲を抽出する。
//!
//! ## 対応形式
//! - `YYYY-YYYY`（例: `2008-2015`）
//! - `YYYY-present` / `YYYY-teraz`（現行モデル。現在の年に解決）
//!
//! 閉じた範囲が1つでもあれば開いた範囲は無視する。最大2件まで。

use serde::{Deserialize, Serialize};

/// 1エントリから取り出す範囲の上限
pub const MAX_RANGES: usize = 2;

/// 現行モデルを表すキーワード
const PRESENT_KEYWORDS: &[&str] = &["present", "teraz"];

/// 年式範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.low <= year && year <= self.high
    }
}

/// 範囲の終端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpperBound {
    Year(i32),
    Present,
}

/// テキスト中の範囲トークン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RangeToken {
    /// 文字位置 [start, end)
    start: usize,
    end: usize,
    low: i32,
    high: UpperBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Closed,
    Open,
}

/// テキストから年式範囲を抽出する
///
/// # Arguments
/// * `text` - 世代 + バージョンのラベル
/// * `current_year` - `present` を解決する年
pub fn extract_year_ranges(text: &str, current_year: i32) -> Vec<YearRange> {
    let chars: Vec<char> = text.chars().collect();

    let mut tokens = scan_tokens(&chars, TokenKind::Closed);
    if tokens.is_empty() {
        tokens = scan_tokens(&chars, TokenKind::Open);
    }

    tokens
        .into_iter()
        .take(MAX_RANGES)
        .map(|t| {
            let high = match t.high {
                UpperBound::Year(y) => y,
                UpperBound::Present => current_year,
            };
            YearRange::new(t.low, high)
        })
        .collect()
}

/// 括弧付きの範囲トークン `(YYYY-YYYY)` / `(YYYY-present)` を取り除く
///
/// 除去後の連続空白は1つにまとめ、前後の空白は落とす。
pub fn strip_parenthesized_ranges(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '(' {
            if let Some(token) = match_token(&chars, i + 1, TokenKind::Closed, false)
                .or_else(|| match_token(&chars, i + 1, TokenKind::Open, false))
            {
                if chars.get(token.end) == Some(&')') {
                    i = token.end + 1;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// クエリの年式を解釈する
///
/// 数値に変換できない・空・`0` の場合は `None`（年式不明）。
pub fn parse_query_year(text: &str) -> Option<i32> {
    match text.trim().parse::<i32>() {
        Ok(0) | Err(_) => None,
        Ok(year) => Some(year),
    }
}

/// 重ならないトークンを左から順に拾う
fn scan_tokens(chars: &[char], kind: TokenKind) -> Vec<RangeToken> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match match_token(chars, i, kind, true) {
            Some(token) => {
                i = token.end;
                tokens.push(token);
            }
            None => i += 1,
        }
    }

    tokens
}

/// 位置 `start` からトークンを1つ読み取る
///
/// `word_boundary` が真なら前後が単語文字でないことも要求する。
fn match_token(chars: &[char], start: usize, kind: TokenKind, word_boundary: bool) -> Option<RangeToken> {
    if word_boundary && start > 0 && is_word_char(chars[start - 1]) {
        return None;
    }

    let low = read_year(chars, start)?;
    if chars.get(start + 4) != Some(&'-') {
        return None;
    }
    let upper_start = start + 5;

    let (high, end) = match kind {
        TokenKind::Closed => (UpperBound::Year(read_year(chars, upper_start)?), upper_start + 4),
        TokenKind::Open => {
            let len = PRESENT_KEYWORDS
                .iter()
                .find(|kw| starts_with_at(chars, upper_start, kw))
                .map(|kw| kw.chars().count())?;
            (UpperBound::Present, upper_start + len)
        }
    };

    if word_boundary && chars.get(end).is_some_and(|&c| is_word_char(c)) {
        return None;
    }

    Some(RangeToken { start, end, low, high })
}

/// 4桁の年を読む
fn read_year(chars: &[char], start: usize) -> Option<i32> {
    let digits = chars.get(start..start + 4)?;
    if !digits.iter().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(
        digits
            .iter()
            .fold(0, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0) as i32),
    )
}

fn starts_with_at(chars: &[char], start: usize, word: &str) -> bool {
    let mut idx = start;
    for w in word.chars() {
        if chars.get(idx) != Some(&w) {
            return false;
        }
        idx += 1;
    }
    true
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_closed_range() {
        let ranges = extract_year_ranges("B8 (2008-2015)", 2024);
        assert_eq!(ranges, vec![YearRange::new(2008, 2015)]);
    }

    #[test]
    fn test_two_closed_ranges() {
        let ranges = extract_year_ranges("C5 (1997-2001) FL (2002-2004)", 2024);
        assert_eq!(ranges, vec![YearRange::new(1997, 2001), YearRange::new(2002, 2004)]);
    }

    #[test]
    fn test_at_most_two_ranges() {
        let ranges = extract_year_ranges("1990-1991 1992-1993 1994-1995", 2024);
        assert_eq!(ranges.len(), MAX_RANGES);
        assert_eq!(ranges[1], YearRange::new(1992, 1993));
    }

    #[test]
    fn test_open_range_resolves_to_current_year() {
        assert_eq!(
            extract_year_ranges("B9 (2015-present)", 2024),
            vec![YearRange::new(2015, 2024)]
        );
        assert_eq!(
            extract_year_ranges("B9 (2015-teraz)", 2021),
            vec![YearRange::new(2015, 2021)]
        );
    }

    #[test]
    fn test_closed_ranges_shadow_open_ranges() {
        let ranges = extract_year_ranges("(1990-1995) Lift (1996-present)", 2024);
        assert_eq!(ranges, vec![YearRange::new(1990, 1995)]);
    }

    #[test]
    fn test_no_ranges() {
        assert!(extract_year_ranges("B8 Avant", 2024).is_empty());
        assert!(extract_year_ranges("", 2024).is_empty());
    }

    #[test]
    fn test_word_boundary_required() {
        assert!(extract_year_ranges("x2008-2015", 2024).is_empty());
        assert!(extract_year_ranges("2008-20155", 2024).is_empty());
        assert!(extract_year_ranges("2015-presently", 2024).is_empty());
        assert_eq!(extract_year_ranges("-2008-2015-", 2024).len(), 1);
    }

    #[test]
    fn test_year_range_contains_inclusive() {
        let range = YearRange::new(2008, 2015);
        assert!(range.contains(2008));
        assert!(range.contains(2015));
        assert!(!range.contains(2007));
        assert!(!range.contains(2016));
    }

    #[test]
    fn test_strip_parenthesized_ranges() {
        assert_eq!(strip_parenthesized_ranges("B8 (2008-2015)"), "B8");
        assert_eq!(strip_parenthesized_ranges("B9 (2015-teraz) Avant"), "B9 Avant");
        assert_eq!(strip_parenthesized_ranges("(1990-1995) (1996-present)"), "");
        // 括弧なしはそのまま残す
        assert_eq!(strip_parenthesized_ranges("B8 2008-2015"), "B8 2008-2015");
        assert_eq!(strip_parenthesized_ranges("Sedan (4 doors)"), "Sedan (4 doors)");
    }

    #[test]
    fn test_parse_query_year() {
        assert_eq!(parse_query_year("2010"), Some(2010));
        assert_eq!(parse_query_year(" 1999 "), Some(1999));
        assert_eq!(parse_query_year("0"), None);
        assert_eq!(parse_query_year("abc"), None);
        assert_eq!(parse_query_year(""), None);
        assert_eq!(parse_query_year("2010.5"), None);
    }
}
