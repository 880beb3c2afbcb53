use clap::{Args, Parser, Subcommand};
use crate::config::Overrides;
use crate::extractor::TierSelector;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "time-to-target")]
#[command(about = "TextGridの対象区間長を一括計測するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ内のTextGridを一括処理して結果ファイルを出力
    Run {
        /// 基準フォルダ（入力サブフォルダと出力ファイルの置き場所）
        #[arg(env = "TIME_TO_TARGET_BASE_DIR")]
        base_dir: Option<PathBuf>,

        /// TextGridを置いたサブフォルダ名
        #[arg(short, long, env = "TIME_TO_TARGET_INPUT_SUBDIR")]
        input_subdir: Option<String>,

        /// 出力ファイル名
        #[arg(short, long, env = "TIME_TO_TARGET_OUTPUT")]
        output: Option<String>,

        /// 対象ファイルの接尾辞
        #[arg(long)]
        suffix: Option<String>,

        #[command(flatten)]
        tier: TierArgs,

        /// 一致区間がない場合に書く文字列
        #[arg(long)]
        missing_marker: Option<String>,

        /// 失敗したファイルを飛ばして続行
        #[arg(short, long)]
        keep_going: bool,

        /// 設定ファイルの keepGoing を無視して最初の失敗で中断
        #[arg(long, conflicts_with = "keep_going")]
        no_keep_going: bool,
    },

    /// 1ファイルだけ区間長を求める
    Extract {
        /// TextGridファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 検索ラベル（省略時はファイル名）
        #[arg(short, long)]
        label: Option<String>,

        #[command(flatten)]
        tier: TierArgs,
    },

    /// TextGridのティア一覧を表示
    Tiers {
        /// TextGridファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 基準フォルダを設定
        #[arg(long)]
        set_base_dir: Option<PathBuf>,

        /// 一致なしの表記を設定
        #[arg(long)]
        set_missing_marker: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// ティア指定（位置または名前のどちらか）
#[derive(Args, Clone, Debug, Default)]
pub struct TierArgs {
    /// ティアの位置（0始まり、デフォルト: 0）
    #[arg(long, conflicts_with = "tier_name")]
    pub tier_index: Option<usize>,

    /// ティア名
    #[arg(long)]
    pub tier_name: Option<String>,
}

impl TierArgs {
    pub fn selector(&self) -> Option<TierSelector> {
        match (&self.tier_index, &self.tier_name) {
            (_, Some(name)) => Some(TierSelector::Name(name.clone())),
            (Some(i), None) => Some(TierSelector::Index(*i)),
            (None, None) => None,
        }
    }
}

impl Commands {
    /// `run` の引数を設定の上書き値に変換
    pub fn overrides(&self) -> Overrides {
        match self {
            Commands::Run {
                base_dir,
                input_subdir,
                output,
                suffix,
                tier,
                missing_marker,
                keep_going,
                no_keep_going,
            } => Overrides {
                base_dir: base_dir.clone(),
                input_subdir: input_subdir.clone(),
                output_filename: output.clone(),
                suffix: suffix.clone(),
                tier: tier.selector(),
                missing_marker: missing_marker.clone(),
                keep_going: match (*keep_going, *no_keep_going) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            },
            _ => Overrides::default(),
        }
    }
}
