//! 照合処理の型定義
//!
//! CLIとライブラリで共有される型:
//! - CatalogEntry: 車種カタログの1行
//! - Query: ユーザー入力の1行
//! - Candidate / RankedResult: 照合結果
//! - Chunk: 並列処理の単位となるクエリ範囲

use serde::{Deserialize, Serialize};

/// 車種カタログのエントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub brand: String,
    pub model: String,

    /// 世代ラベル（例: "B8 (2008-2015)"）
    #[serde(default)]
    pub generation_label: String,

    /// バージョンラベル（年式範囲を含むことがある）
    #[serde(default)]
    pub version_label: String,
}

impl CatalogEntry {
    /// 世代 + バージョンを連結したテキスト（年式範囲の抽出対象）
    pub fn label_text(&self) -> String {
        format!("{} {}", self.generation_label, self.version_label)
    }
}

/// ユーザーが入力した車両情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub query_id: String,
    pub brand: String,
    pub model: String,

    /// 年式（自由入力。数値以外・空・"0" は不明扱い）
    #[serde(default)]
    pub year: String,
}

/// 1件の照合候補
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate<'a> {
    pub ratio: f64,
    /// カタログ内の行番号（0始まり）
    pub matched_index: usize,
    pub matched_entry: &'a CatalogEntry,
}

/// クエリ1件分の上位候補
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult<'a> {
    pub query_id: String,
    pub top_candidates: Vec<Candidate<'a>>,
}

/// クエリ番号の半開区間 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
