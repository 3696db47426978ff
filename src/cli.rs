use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "car-matcher")]
#[command(about = "車種カタログ照合ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ユーザー入力をカタログと照合して上位候補をCSVに出力
    Run {
        /// カタログCSV（Brand;Model;Generation;Version）
        #[arg(short, long, default_value = "ListOfCarBrands.csv")]
        catalog: PathBuf,

        /// ユーザー入力CSV（car_id;marka;model;rok）
        #[arg(short, long, default_value = "solidDB.csv")]
        queries: PathBuf,

        /// 出力ディレクトリ（チャンクファイルの保存先）
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// 結合ファイル（省略時: 出力ディレクトリ/ListOfALLTopMatchesPerCar_ALL.csv）
        #[arg(long)]
        combined: Option<PathBuf>,

        /// 1チャンクあたりのクエリ数
        #[arg(long)]
        chunk_size: Option<usize>,

        /// 並列ワーカー数
        #[arg(short, long)]
        workers: Option<usize>,

        /// クエリごとに残す候補数
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// 現行モデル（present）を解決する年
        #[arg(long)]
        current_year: Option<i32>,

        /// チャンクごとのファイルを出力しない
        #[arg(long)]
        no_chunk_files: bool,
    },

    /// 1台分の入力をカタログと照合して表示
    Lookup {
        /// カタログCSV
        #[arg(short, long, default_value = "ListOfCarBrands.csv")]
        catalog: PathBuf,

        /// メーカー
        #[arg(required = true)]
        brand: String,

        /// モデル
        #[arg(required = true)]
        model: String,

        /// 年式（省略可）
        #[arg(short, long, default_value = "")]
        year: String,

        /// 表示する候補数
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// 現行モデル（present）を解決する年
        #[arg(long)]
        current_year: Option<i32>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 既存のチャンクファイルから結合ファイルを作り直す
    Combine {
        /// チャンクファイルのディレクトリ
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// クエリ総数
        #[arg(short, long, required = true)]
        total: usize,

        /// 1チャンクあたりのクエリ数
        #[arg(long)]
        chunk_size: Option<usize>,

        /// 結合ファイル（省略時: 出力ディレクトリ/ListOfALLTopMatchesPerCar_ALL.csv）
        #[arg(long)]
        combined: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// チャンク幅を設定
        #[arg(long)]
        set_chunk_size: Option<usize>,

        /// ワーカー数を設定
        #[arg(long)]
        set_workers: Option<usize>,

        /// 候補数を設定
        #[arg(long)]
        set_top_k: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
