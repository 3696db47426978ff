use crate::error::{CarMatcherError, Result};
use crate::matcher::MatchSettings;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 1チャンクあたりのクエリ数
    pub chunk_size: usize,
    /// 並列ワーカー数
    pub worker_count: usize,
    /// クエリごとに残す候補数
    pub top_k: usize,
    /// `present` を解決する年（未設定なら実行時の年）
    pub current_year: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CarMatcherError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("car-matcher").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            chunk_size: 500,
            worker_count: 4,
            top_k: 2,
            current_year: None,
        }
    }

    /// CLI引数で上書きする
    pub fn with_overrides(
        mut self,
        chunk_size: Option<usize>,
        worker_count: Option<usize>,
        top_k: Option<usize>,
        current_year: Option<i32>,
    ) -> Self {
        if let Some(v) = chunk_size {
            self.chunk_size = v;
        }
        if let Some(v) = worker_count {
            self.worker_count = v;
        }
        if let Some(v) = top_k {
            self.top_k = v;
        }
        if current_year.is_some() {
            self.current_year = current_year;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(CarMatcherError::Config("chunk_size は1以上を指定してください".into()));
        }
        if self.worker_count == 0 {
            return Err(CarMatcherError::Config("worker_count は1以上を指定してください".into()));
        }
        if self.top_k == 0 {
            return Err(CarMatcherError::Config("top_k は1以上を指定してください".into()));
        }
        Ok(())
    }

    /// 年式範囲 `present` の解決に使う年
    pub fn resolved_current_year(&self) -> i32 {
        self.current_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }

    /// 照合の実行パラメータに変換
    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            chunk_size: self.chunk_size,
            worker_count: self.worker_count,
            top_k: self.top_k,
            current_year: self.resolved_current_year(),
        }
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) -> Result<()> {
        self.chunk_size = chunk_size;
        self.validate()?;
        self.save()
    }

    pub fn set_worker_count(&mut self, worker_count: usize) -> Result<()> {
        self.worker_count = worker_count;
        self.validate()?;
        self.save()
    }

    pub fn set_top_k(&mut self, top_k: usize) -> Result<()> {
        self.top_k = top_k;
        self.validate()?;
        self.save()
    }
}
