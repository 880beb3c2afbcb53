use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeToTargetError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("TextGridの解析に失敗: {path}: {message}")]
    TextGridParse { path: String, message: String },

    #[error("ティアがありません: {0}")]
    NoTiers(String),

    #[error("ティアが見つかりません: {tier} ({path})")]
    TierNotFound { path: String, tier: String },

    #[error("IntervalTierではありません: {tier} ({path})")]
    NotIntervalTier { path: String, tier: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TimeToTargetError>;
