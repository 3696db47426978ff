use car_matcher::{cli, config, error, export, loader, matcher};
use car_matcher_common::{rank_query, PreparedCatalog, Query};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Run {
            catalog,
            queries,
            output_dir,
            combined,
            chunk_size,
            workers,
            top_k,
            current_year,
            no_chunk_files,
        } => {
            println!("🚗 car-matcher - 車種照合\n");
            let started = Instant::now();

            let config = config.with_overrides(chunk_size, workers, top_k, current_year);
            config.validate()?;
            let settings = config.match_settings();

            // 1. カタログ読み込み
            println!("[1/4] カタログを読み込み中...");
            let catalog_entries = loader::load_catalog(&catalog)?;
            println!("✔ {}件のカタログエントリ\n", catalog_entries.len());

            // 2. ユーザー入力読み込み
            println!("[2/4] ユーザー入力を読み込み中...");
            let query_list = loader::load_queries(&queries)?;
            println!("✔ {}件の入力\n", query_list.len());

            if catalog_entries.is_empty() {
                eprintln!("⚠ カタログが空です。候補なしで出力します");
            }

            // 3. 並列照合
            println!(
                "[3/4] 照合中... (チャンク幅: {}, ワーカー: {}, 候補数: {}, 基準年: {})",
                settings.chunk_size, settings.worker_count, settings.top_k, settings.current_year
            );
            std::fs::create_dir_all(&output_dir)?;

            let progress = ProgressBar::new(query_list.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("  [{bar:40}] {pos}/{len} ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let verbose = cli.verbose;
            let results = matcher::run_matching(
                &catalog_entries,
                &query_list,
                &settings,
                |chunk, chunk_results| {
                    if no_chunk_files {
                        return Ok(());
                    }
                    let path = export::write_chunk_file(&output_dir, chunk, chunk_results)?;
                    if verbose {
                        progress.println(format!("  チャンク {} を書き出し: {}", chunk, path.display()));
                    }
                    Ok(())
                },
                &progress,
            )?;
            progress.finish_and_clear();
            println!("✔ 照合完了\n");

            // 4. 結合ファイル出力
            println!("[4/4] 結果を保存中...");
            let combined_path = combined.unwrap_or_else(|| output_dir.join(export::COMBINED_FILE_NAME));
            export::write_matches(&combined_path, &results)?;
            println!("✔ 結果を保存: {}", combined_path.display());

            println!("\n✅ 完了 ({:.2}秒)", started.elapsed().as_secs_f64());
        }

        Commands::Lookup {
            catalog,
            brand,
            model,
            year,
            top_k,
            current_year,
            json,
        } => {
            let config = config.with_overrides(None, None, top_k, current_year);
            config.validate()?;

            let catalog_entries = loader::load_catalog(&catalog)?;
            let prepared = PreparedCatalog::new(&catalog_entries, config.resolved_current_year());
            let query = Query {
                query_id: "lookup".to_string(),
                brand,
                model,
                year,
            };
            let result = rank_query(&prepared, &query, config.top_k);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("🔍 {} {} {}\n", query.brand, query.model, query.year);
                if result.top_candidates.is_empty() {
                    println!("候補がありません");
                }
                for (rank, candidate) in result.top_candidates.iter().enumerate() {
                    let entry = candidate.matched_entry;
                    println!(
                        "  {}. {} (#{}) {} {} {} {}",
                        rank + 1,
                        export::csv::format_ratio(candidate.ratio),
                        candidate.matched_index,
                        entry.brand,
                        entry.model,
                        entry.generation_label,
                        entry.version_label
                    );
                }
            }
        }

        Commands::Combine {
            output_dir,
            total,
            chunk_size,
            combined,
        } => {
            println!("📄 car-matcher - チャンク結合\n");

            let config = config.with_overrides(chunk_size, None, None, None);
            config.validate()?;

            let combined_path = combined.unwrap_or_else(|| output_dir.join(export::COMBINED_FILE_NAME));
            let rows = export::combine_chunk_files(&output_dir, total, config.chunk_size, &combined_path)?;
            println!("✔ {}行を結合: {}", rows, combined_path.display());
        }

        Commands::Config {
            set_chunk_size,
            set_workers,
            set_top_k,
            show,
        } => {
            let mut config = config;

            if let Some(v) = set_chunk_size {
                config.set_chunk_size(v)?;
                println!("✔ チャンク幅を設定しました: {}", v);
            }
            if let Some(v) = set_workers {
                config.set_worker_count(v)?;
                println!("✔ ワーカー数を設定しました: {}", v);
            }
            if let Some(v) = set_top_k {
                config.set_top_k(v)?;
                println!("✔ 候補数を設定しました: {}", v);
            }

            if show {
                println!("設定:");
                println!("  チャンク幅: {}", config.chunk_size);
                println!("  ワーカー数: {}", config.worker_count);
                println!("  候補数: {}", config.top_k);
                match config.current_year {
                    Some(year) => println!("  基準年: {}", year),
                    None => println!("  基準年: 実行時の年 ({})", config.resolved_current_year()),
                }
                if let Ok(path) = Config::config_path() {
                    println!("  設定ファイル: {}", path.display());
                }
            }
        }
    }

    Ok(())
}
