//! チャンク単位の照合処理
//!
//! - `plan_chunks`: クエリ番号 `[0, n)` を固定幅のチャンクに分割
//! - `process_chunk`: 1チャンク分のクエリをカタログ全体と照合
//!
//! チャンク同士は状態を共有しないので、どの順番・どのスレッドで実行してもよい。

use crate::error::{Error, Result};
use crate::ranker::top_k;
use crate::scorer::{score_prepared, PreparedEntry, PreparedQuery};
use crate::types::{Candidate, CatalogEntry, Chunk, Query, RankedResult};

/// 前処理済みのカタログ
///
/// 比較文字列と年式範囲をエントリごとに1回だけ計算しておく。
#[derive(Debug, Clone)]
pub struct PreparedCatalog<'a> {
    entries: &'a [CatalogEntry],
    prepared: Vec<PreparedEntry>,
}

impl<'a> PreparedCatalog<'a> {
    pub fn new(entries: &'a [CatalogEntry], current_year: i32) -> Self {
        let prepared = entries
            .iter()
            .map(|e| PreparedEntry::new(e, current_year))
            .collect();
        Self { entries, prepared }
    }
}

/// チャンクを生成する
///
/// `[0, size), [size, 2*size), ...` の順で、最後のチャンクは `n` で打ち切る。
pub fn plan_chunks(n: usize, chunk_size: usize) -> Result<Vec<Chunk>> {
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize(chunk_size));
    }

    Ok((0..n)
        .step_by(chunk_size)
        .map(|start| Chunk::new(start, (start + chunk_size).min(n)))
        .collect())
}

/// 1クエリをカタログ全体と照合して上位候補を返す
pub fn rank_query<'a>(catalog: &PreparedCatalog<'a>, query: &Query, top: usize) -> RankedResult<'a> {
    let prepared_query = PreparedQuery::new(query);

    let candidates: Vec<Candidate<'a>> = catalog
        .entries
        .iter()
        .zip(&catalog.prepared)
        .enumerate()
        .map(|(matched_index, (entry, prepared))| Candidate {
            ratio: score_prepared(&prepared_query, prepared),
            matched_index,
            matched_entry: entry,
        })
        .collect();

    RankedResult {
        query_id: query.query_id.clone(),
        top_candidates: top_k(candidates, top),
    }
}

/// 1チャンク分のクエリを処理する
///
/// 結果はクエリ番号の昇順。範囲外の番号は `queries.len()` で打ち切る。
pub fn process_chunk<'a>(
    catalog: &PreparedCatalog<'a>,
    queries: &[Query],
    chunk: Chunk,
    top: usize,
) -> Vec<RankedResult<'a>> {
    let end = chunk.end.min(queries.len());
    let start = chunk.start.min(end);

    queries[start..end]
        .iter()
        .map(|query| rank_query(catalog, query, top))
        .collect()
}
