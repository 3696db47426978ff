use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarMatcherError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] car_matcher_common::Error),

    #[error("スレッドプール生成エラー: {0}")]
    ThreadPool(String),

    #[error("チャンク {chunk} の処理に失敗: {reason}")]
    ChunkFailed {
        chunk: car_matcher_common::Chunk,
        reason: String,
    },

    #[error("チャンク {0} はキャンセルされました")]
    Cancelled(car_matcher_common::Chunk),

    #[error("チャンクの網羅性エラー: {0}")]
    ChunkCoverage(String),
}

pub type Result<T> = std::result::Result<T, CarMatcherError>;
