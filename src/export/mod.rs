pub mod csv;

use crate::error::{CarMatcherError, Result};
use crate::loader::Table;
use car_matcher_common::{plan_chunks, Chunk, RankedResult};
use std::path::{Path, PathBuf};

/// 全チャンクを結合した出力ファイルの既定名
pub const COMBINED_FILE_NAME: &str = "ListOfALLTopMatchesPerCar_ALL.csv";

/// チャンクごとの出力ファイル名
pub fn chunk_file_name(chunk: &Chunk) -> String {
    format!("ListOfTopMatchesPerCar_{}_{}.csv", chunk.start, chunk.end)
}

pub fn chunk_file_path(output_dir: &Path, chunk: &Chunk) -> PathBuf {
    output_dir.join(chunk_file_name(chunk))
}

/// 照合結果をファイルに書き出す
pub fn write_matches(path: &Path, results: &[RankedResult<'_>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, csv::render_results(results))?;
    Ok(())
}

/// 1チャンク分の結果を書き出す
pub fn write_chunk_file(output_dir: &Path, chunk: &Chunk, results: &[RankedResult<'_>]) -> Result<PathBuf> {
    let path = chunk_file_path(output_dir, chunk);
    write_matches(&path, results)?;
    Ok(path)
}

/// 既存のチャンクファイルから結合ファイルを作り直す
///
/// チャンクは開始番号の昇順で読む。1つでも欠けていればエラー。
///
/// # Returns
/// 書き出した行数（ヘッダー除く）
pub fn combine_chunk_files(
    output_dir: &Path,
    total: usize,
    chunk_size: usize,
    output_path: &Path,
) -> Result<usize> {
    let chunks = plan_chunks(total, chunk_size)?;
    let mut rows = Vec::new();

    for chunk in &chunks {
        let path = chunk_file_path(output_dir, chunk);
        if !path.exists() {
            return Err(CarMatcherError::FileNotFound(path.display().to_string()));
        }
        let table = Table::read(&path)?;
        rows.extend(csv::rows_from_table(&table)?);
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, csv::render_rows(&rows))?;

    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_file_name() {
        assert_eq!(
            chunk_file_name(&Chunk::new(500, 742)),
            "ListOfTopMatchesPerCar_500_742.csv"
        );
    }

    #[test]
    fn test_chunk_file_path() {
        let path = chunk_file_path(Path::new("out"), &Chunk::new(0, 500));
        assert_eq!(path, Path::new("out").join("ListOfTopMatchesPerCar_0_500.csv"));
    }
}
