use anyhow::Context;
use clap::Parser;
use time_to_target::{cli, config, extractor, output};
use cli::{Cli, Commands};
use config::Config;
use extractor::TierSelector;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // config サブコマンド以外は設定ファイルの場所が決まらなくても動かす
    let config = match cli.command {
        Commands::Config { .. } => Config::load(),
        _ => Config::load_optional(),
    }
    .context("設定の読み込みに失敗")?;

    match &cli.command {
        Commands::Run { .. } => {
            println!("⏱  time-to-target - 一括計測\n");

            let config = config.merged(cli.command.overrides());
            let mut batch = config.to_batch_config()?;
            batch.show_progress = true;

            println!("入力: {}", batch.input_dir.display());
            println!("出力: {}", batch.output_path.display());
            println!("ティア: {}\n", batch.tier);

            let summary = time_to_target::batch::run_batch(&batch)
                .with_context(|| format!("一括処理が中断しました: {}", batch.input_dir.display()))?;

            println!("✔ {}件を処理", summary.processed);
            println!("  一致: {}件", summary.found);
            println!("  一致なし: {}件", summary.not_found);
            if !summary.failed.is_empty() {
                println!("  失敗: {}件", summary.failed.len());
                for (file_name, message) in &summary.failed {
                    println!("    - {}: {}", file_name, message);
                }
            }
            println!("\n✅ 結果を保存: {}", summary.output_path.display());
        }

        Commands::Extract { file, label, tier } => {
            let label = match label {
                Some(label) => label.clone(),
                None => file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .and_then(|n| time_to_target::scanner::label_for(&n, &config.suffix).map(str::to_string))
                    .with_context(|| format!("ファイル名からラベルを決められません: {}", file.display()))?,
            };
            let selector = tier.selector().unwrap_or_else(|| config.tier.clone());

            let duration = extractor::get_duration(file, &label, &selector)?;
            let row = output::ResultRow::new(label, duration);
            println!("{}", row.render(&config.missing_marker));
        }

        Commands::Tiers { file } => {
            let textgrid = extractor::load_textgrid(file)?;
            if textgrid.tiers.is_empty() {
                println!("ティアがありません: {}", file.display());
            }
            for (i, tier) in textgrid.tiers.iter().enumerate() {
                let marker = if TierSelector::Index(i) == config.tier
                    || TierSelector::Name(tier.name.clone()) == config.tier
                {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} [{}] {} ({}, {}件)",
                    marker,
                    i,
                    tier.name,
                    tier.class_name(),
                    tier.len()
                );
            }
        }

        Commands::Config { set_base_dir, set_missing_marker, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(dir) = set_base_dir {
                config.base_dir = dir.clone();
                changed = true;
            }
            if let Some(marker) = set_missing_marker {
                config.missing_marker = marker.clone();
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if *show || !changed {
                println!("設定:");
                println!("  基準フォルダ: {}", config.base_dir.display());
                println!("  入力サブフォルダ: {}", config.input_subdir);
                println!("  出力ファイル: {}", config.output_filename);
                println!("  接尾辞: {}", config.suffix);
                println!("  ティア: {}", config.tier);
                println!("  一致なしの表記: {}", config.missing_marker);
                println!("  失敗時に続行: {}", if config.keep_going { "はい" } else { "いいえ" });
            }
        }
    }

    Ok(())
}
