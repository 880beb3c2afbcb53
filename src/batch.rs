//! 一括処理
//!
//! 入力フォルダのTextGridを名前順に処理し、1ファイルにつき1行を
//! 結果ファイルへ追記する。

use crate::error::Result;
use crate::extractor::{self, TargetDuration, TierSelector};
use crate::output::{self, ResultRow};
use crate::scanner;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// ファイル単位の失敗をどう扱うか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 最初の失敗で全体を中断（書き込み済みの行は残る）
    #[default]
    Abort,
    /// 失敗したファイルは行を書かずに記録し、次へ進む
    Skip,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub suffix: String,
    pub tier: TierSelector,
    pub missing_marker: String,
    pub policy: FailurePolicy,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub output_path: PathBuf,
    pub processed: usize,
    pub found: usize,
    pub not_found: usize,
    /// (ファイル名, エラーメッセージ)
    pub failed: Vec<(String, String)>,
}

pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    output::write_header(&config.output_path)?;

    let files = scanner::scan_folder(&config.input_dir, &config.suffix)?;
    tracing::info!(
        input = %config.input_dir.display(),
        count = files.len(),
        "TextGridを検出"
    );

    let mut summary = BatchSummary {
        output_path: config.output_path.clone(),
        ..Default::default()
    };

    let progress = if config.show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    for file in &files {
        progress.set_message(file.file_name.clone());

        let duration = match extractor::get_duration(&file.path, &file.label, &config.tier) {
            Ok(duration) => duration,
            Err(e) => match config.policy {
                FailurePolicy::Abort => {
                    progress.abandon();
                    return Err(e);
                }
                FailurePolicy::Skip => {
                    tracing::warn!(file = %file.file_name, error = %e, "スキップ");
                    summary.failed.push((file.file_name.clone(), e.to_string()));
                    progress.inc(1);
                    continue;
                }
            },
        };

        let row = ResultRow::new(file.label.clone(), duration);
        output::append_row(&config.output_path, &row, &config.missing_marker)?;

        summary.processed += 1;
        match duration {
            TargetDuration::Found(_) => summary.found += 1,
            TargetDuration::NotFound => summary.not_found += 1,
        }
        progress.inc(1);
    }

    progress.finish_and_clear();

    tracing::info!(
        processed = summary.processed,
        found = summary.found,
        not_found = summary.not_found,
        failed = summary.failed.len(),
        "一括処理完了"
    );

    Ok(summary)
}
