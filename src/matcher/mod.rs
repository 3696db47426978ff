//! 並列照合モジュール
//!
//! ## 処理フロー
//! 1. クエリ番号 `[0, n)` を固定幅のチャンクに分割
//! 2. 全チャンクを専用スレッドプールに投入（1チャンク = 1タスク）
//! 3. 各タスクの結果をチャネルで回収
//! 4. 失敗があれば未着手のタスクをキャンセルし、最初のエラーを返す
//! 5. チャンク開始番号の順に結合

pub mod combiner;

pub use combiner::combine;

use crate::error::{CarMatcherError, Result};
use car_matcher_common::{plan_chunks, process_chunk, CatalogEntry, Chunk, PreparedCatalog, Query, RankedResult};
use indicatif::ProgressBar;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

/// 照合の実行パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    pub chunk_size: usize,
    pub worker_count: usize,
    pub top_k: usize,
    pub current_year: i32,
}

/// 1チャンク分の結果
#[derive(Debug, Clone)]
pub struct ChunkOutput<'a> {
    pub chunk: Chunk,
    pub results: Vec<RankedResult<'a>>,
}

/// チャンクをワーカープールに割り振る
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    chunk_size: usize,
    worker_count: usize,
}

impl Dispatcher {
    pub fn new(chunk_size: usize, worker_count: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(car_matcher_common::Error::InvalidChunkSize(chunk_size).into());
        }
        if worker_count == 0 {
            return Err(CarMatcherError::Config("worker_count は1以上を指定してください".into()));
        }
        Ok(Self {
            chunk_size,
            worker_count,
        })
    }

    /// `[0, n)` を覆うチャンク一覧
    pub fn dispatch(&self, n: usize) -> Result<Vec<Chunk>> {
        Ok(plan_chunks(n, self.chunk_size)?)
    }

    /// 全チャンクを並列に処理する
    ///
    /// `sink` は各ワーカー上でチャンク完了直後に呼ばれる（チャンクファイルの書き出しなど）。
    /// 戻り値の並びはワーカーの完了順。
    pub fn run<'a, F>(
        &self,
        catalog: &PreparedCatalog<'a>,
        queries: &[Query],
        top_k: usize,
        sink: F,
        progress: &ProgressBar,
    ) -> Result<Vec<ChunkOutput<'a>>>
    where
        F: Fn(&Chunk, &[RankedResult<'a>]) -> Result<()> + Sync,
    {
        let chunks = self.dispatch(queries.len())?;
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_count)
            .thread_name(|i| format!("car-matcher-{}", i))
            .build()
            .map_err(|e| CarMatcherError::ThreadPool(e.to_string()))?;

        let cancelled = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel::<(Chunk, Result<Vec<RankedResult<'a>>>)>();

        pool.scope(|scope| {
            for &chunk in &chunks {
                let tx = tx.clone();
                let cancelled = &cancelled;
                let sink = &sink;

                scope.spawn(move |_| {
                    let outcome = run_chunk(catalog, queries, chunk, top_k, sink, cancelled);
                    if outcome.is_err() {
                        cancelled.store(true, Ordering::SeqCst);
                    }
                    progress.inc(chunk.len() as u64);
                    // 受信側はスコープ終了まで生きている
                    let _ = tx.send((chunk, outcome));
                });
            }
        });
        drop(tx);

        let mut outputs = Vec::with_capacity(chunks.len());
        let mut first_error: Option<CarMatcherError> = None;

        for (chunk, outcome) in rx {
            match outcome {
                Ok(results) => outputs.push(ChunkOutput { chunk, results }),
                Err(CarMatcherError::Cancelled(_)) if first_error.is_some() => {}
                Err(e) => {
                    let replace = matches!(first_error, None | Some(CarMatcherError::Cancelled(_)));
                    if replace {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(outputs),
        }
    }
}

/// 1チャンクを処理する（ワーカー上で実行）
fn run_chunk<'a, F>(
    catalog: &PreparedCatalog<'a>,
    queries: &[Query],
    chunk: Chunk,
    top_k: usize,
    sink: &F,
    cancelled: &AtomicBool,
) -> Result<Vec<RankedResult<'a>>>
where
    F: Fn(&Chunk, &[RankedResult<'a>]) -> Result<()>,
{
    if cancelled.load(Ordering::SeqCst) {
        return Err(CarMatcherError::Cancelled(chunk));
    }

    let results = catch_unwind(AssertUnwindSafe(|| process_chunk(catalog, queries, chunk, top_k)))
        .map_err(|panic| CarMatcherError::ChunkFailed {
            chunk,
            reason: panic_message(panic.as_ref()),
        })?;

    catch_unwind(AssertUnwindSafe(|| sink(&chunk, &results)))
        .map_err(|panic| panic_message(panic.as_ref()))
        .and_then(|written| written.map_err(|e| e.to_string()))
        .map_err(|reason| CarMatcherError::ChunkFailed { chunk, reason })?;

    Ok(results)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "ワーカーがパニックしました".to_string()
    }
}

/// カタログとクエリを照合して、クエリ順の結果を返す
///
/// # Arguments
/// * `catalog` - カタログ全件
/// * `queries` - ユーザー入力全件
/// * `settings` - チャンク幅・ワーカー数など
/// * `sink` - チャンク完了ごとに呼ばれるコールバック
/// * `progress` - 進捗バー（クエリ件数単位）
pub fn run_matching<'a, F>(
    catalog: &'a [CatalogEntry],
    queries: &[Query],
    settings: &MatchSettings,
    sink: F,
    progress: &ProgressBar,
) -> Result<Vec<RankedResult<'a>>>
where
    F: Fn(&Chunk, &[RankedResult<'a>]) -> Result<()> + Sync,
{
    let dispatcher = Dispatcher::new(settings.chunk_size, settings.worker_count)?;
    let prepared = PreparedCatalog::new(catalog, settings.current_year);

    let outputs = dispatcher.run(&prepared, queries, settings.top_k, sink, progress)?;
    combine(outputs, queries.len())
}
