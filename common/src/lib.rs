//! Car Matcher Common Library
//!
//! 車種カタログ照合の中核（I/Oなし）
//!
//! - 類似度計算・年式ボーナス・上位候補抽出
//! - チャンク分割とチャンク単位の照合

pub mod types;
pub mod error;
pub mod similarity;
pub mod year_range;
pub mod scorer;
pub mod ranker;
pub mod chunk;

pub use types::{Candidate, CatalogEntry, Chunk, Query, RankedResult};
pub use error::{Error, Result};
pub use year_range::{extract_year_ranges, parse_query_year, strip_parenthesized_ranges, YearRange};
pub use similarity::{capitalize, similarity_ratio};
pub use scorer::{score, round5};
pub use ranker::top_k;
pub use chunk::{plan_chunks, process_chunk, rank_query, PreparedCatalog};
