//! チャンク結果の結合
//!
//! ワーカーの完了順に関係なく、チャンク開始番号の昇順で連結する。

use super::ChunkOutput;
use crate::error::{CarMatcherError, Result};
use car_matcher_common::RankedResult;

/// チャンクごとの結果を1本の結果列にまとめる
///
/// `[0, total)` を隙間・重複なく覆っていなければエラー。
pub fn combine<'a>(mut outputs: Vec<ChunkOutput<'a>>, total: usize) -> Result<Vec<RankedResult<'a>>> {
    outputs.sort_by_key(|o| o.chunk.start);

    let mut next = 0;
    for output in &outputs {
        if output.chunk.start != next {
            return Err(CarMatcherError::ChunkCoverage(format!(
                "チャンク {} の開始位置が不正（期待値: {}）",
                output.chunk, next
            )));
        }
        if output.results.len() != output.chunk.len() {
            return Err(CarMatcherError::ChunkCoverage(format!(
                "チャンク {} の結果件数が不一致（{}件）",
                output.chunk,
                output.results.len()
            )));
        }
        next = output.chunk.end;
    }

    if next != total {
        return Err(CarMatcherError::ChunkCoverage(format!(
            "クエリ {}件 のうち {}件 しか処理されていません",
            total, next
        )));
    }

    Ok(outputs.into_iter().flat_map(|o| o.results).collect())
}
