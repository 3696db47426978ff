//! セミコロン区切りテーブルの読み込み
//!
//! - 区切り文字は `;`（`"; "` 形式のファイルも受け付ける）
//! - ダブルクォートで囲んだフィールドに対応
//! - 空行は読み飛ばす

use crate::error::{CarMatcherError, Result};
use car_matcher_common::Error as CommonError;
use std::path::Path;

pub const DELIMITER: char = ';';

/// 元データに含まれる埋め草（値として扱わない）
const PLACEHOLDER_TOKEN: &str = "PlaceholderGen";

/// ヘッダー付きテーブル
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// エラーメッセージ用の名前（ファイルパスなど）
    name: String,
    headers: Vec<String>,
    /// (行番号, フィールド)
    rows: Vec<(usize, Vec<String>)>,
}

impl Table {
    /// ファイルから読み込み
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CarMatcherError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&path.display().to_string(), &content))
    }

    /// 文字列から読み込み
    pub fn parse(name: &str, content: &str) -> Self {
        let content = content
            .trim_start_matches('\u{feff}')
            .replace("; ", ";")
            .replace(PLACEHOLDER_TOKEN, "");

        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let headers = match lines.next() {
            Some((_, line)) => parse_line(line),
            None => Vec::new(),
        };

        let rows = lines.map(|(line_no, line)| (line_no, parse_line(line))).collect();

        Self {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    /// 列名から列番号を引く
    pub fn column(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| {
                CommonError::MissingColumn {
                    table: self.name.clone(),
                    column: column.to_string(),
                }
                .into()
            })
    }

    /// 指定列を持つ行を順に返す
    ///
    /// フィールドが足りない行があればエラー（行を黙って捨てない）。
    pub fn select(&self, columns: &[&str]) -> Result<Vec<Vec<&str>>> {
        let indices = columns
            .iter()
            .map(|c| self.column(c))
            .collect::<Result<Vec<usize>>>()?;
        let required = indices.iter().max().map(|&i| i + 1).unwrap_or(0);

        self.rows
            .iter()
            .map(|(line, fields)| {
                if fields.len() < required {
                    return Err(CommonError::MalformedRow {
                        table: self.name.clone(),
                        line: *line,
                        expected: required,
                        found: fields.len(),
                    }
                    .into());
                }
                Ok(indices.iter().map(|&i| fields[i].as_str()).collect())
            })
            .collect()
    }
}

/// 1行をフィールドに分割（ダブルクォート対応）
///
/// 引用符として扱うのはフィールド先頭（空白を除く）の `"` のみ。
/// フィールド途中の `"`（インチ表記など）は文字としてそのまま残す。
pub fn parse_line(line: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut field_start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if in_quotes {
            if c == '"' {
                // "" はエスケープされた引用符
                if chars.get(i + 1).is_some_and(|&(_, next)| next == '"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
        } else if c == DELIMITER {
            // フィールド終了
            fields.push(unquote(&line[field_start..pos]));
            field_start = pos + c.len_utf8();
            at_field_start = true;
        } else if c == '"' && at_field_start {
            in_quotes = true;
            at_field_start = false;
        } else if !c.is_whitespace() {
            at_field_start = false;
        }
        i += 1;
    }

    // 最後のフィールド
    fields.push(unquote(&line[field_start..]));

    fields
}

/// 書き出し用にフィールドをクォートする（必要な場合のみ）
pub fn quote_field(field: &str) -> String {
    if field.contains(DELIMITER) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn unquote(s: &str) -> String {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        s[1..s.len() - 1].replace("\"\"", "\"")
    } else {
        s.to_string()
    }
}
