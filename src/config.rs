use crate::batch::{BatchConfig, FailurePolicy};
use crate::error::{Result, TimeToTargetError};
use crate::extractor::TierSelector;
use crate::output::DEFAULT_MISSING_MARKER;
use crate::scanner::DEFAULT_SUFFIX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 永続化される設定（~/.config/time-to-target/config.json）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub base_dir: PathBuf,
    pub input_subdir: String,
    pub output_filename: String,
    pub suffix: String,
    pub tier: TierSelector,
    pub missing_marker: String,
    pub keep_going: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            input_subdir: "stimulus_textgrids".into(),
            output_filename: "durations.txt".into(),
            suffix: DEFAULT_SUFFIX.into(),
            tier: TierSelector::default(),
            missing_marker: DEFAULT_MISSING_MARKER.into(),
            keep_going: false,
        }
    }
}

/// コマンドライン・環境変数からの上書き値
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_dir: Option<PathBuf>,
    pub input_subdir: Option<String>,
    pub output_filename: Option<String>,
    pub suffix: Option<String>,
    pub tier: Option<TierSelector>,
    pub missing_marker: Option<String>,
    /// `Some(false)` で設定ファイルの `keepGoing: true` を打ち消す
    pub keep_going: Option<bool>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ホームディレクトリが決まらない環境では既定値を使う
    pub fn load_optional() -> Result<Self> {
        Self::load_at(Self::config_path().ok().as_deref())
    }

    pub fn load_at(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TimeToTargetError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("time-to-target").join("config.json"))
    }

    /// 上書き値を適用した新しい設定を返す
    pub fn merged(&self, overrides: Overrides) -> Self {
        Self {
            base_dir: overrides.base_dir.unwrap_or_else(|| self.base_dir.clone()),
            input_subdir: overrides.input_subdir.unwrap_or_else(|| self.input_subdir.clone()),
            output_filename: overrides
                .output_filename
                .unwrap_or_else(|| self.output_filename.clone()),
            suffix: overrides.suffix.unwrap_or_else(|| self.suffix.clone()),
            tier: overrides.tier.unwrap_or_else(|| self.tier.clone()),
            missing_marker: overrides
                .missing_marker
                .unwrap_or_else(|| self.missing_marker.clone()),
            keep_going: overrides.keep_going.unwrap_or(self.keep_going),
        }
    }

    pub fn input_dir(&self) -> PathBuf {
        self.base_dir.join(&self.input_subdir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output_filename)
    }

    pub fn to_batch_config(&self) -> Result<BatchConfig> {
        if self.suffix.is_empty() {
            return Err(TimeToTargetError::Config("拡張子が空です".into()));
        }

        Ok(BatchConfig {
            input_dir: self.input_dir(),
            output_path: self.output_path(),
            suffix: self.suffix.clone(),
            tier: self.tier.clone(),
            missing_marker: self.missing_marker.clone(),
            policy: if self.keep_going {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            },
            show_progress: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_paths() {
        let config = Config {
            base_dir: PathBuf::from("/data/lign199"),
            ..Default::default()
        };

        assert_eq!(config.input_dir(), PathBuf::from("/data/lign199/stimulus_textgrids"));
        assert_eq!(config.output_path(), PathBuf::from("/data/lign199/durations.txt"));
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();

        assert_eq!(config.input_subdir, "stimulus_textgrids");
        assert_eq!(config.missing_marker, "NA");
        assert_eq!(config.tier, TierSelector::Index(0));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            base_dir: PathBuf::from("/data"),
            tier: TierSelector::Name("words".into()),
            missing_marker: "None".into(),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.base_dir, PathBuf::from("/data"));
        assert_eq!(loaded.tier, TierSelector::Name("words".into()));
        assert_eq!(loaded.missing_marker, "None");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"baseDir": "/srv/study"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/srv/study"));
        assert_eq!(config.output_filename, "durations.txt");
        assert_eq!(config.suffix, ".TextGrid");
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ invalid").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, TimeToTargetError::JsonParse(_)));
    }

    #[test]
    fn test_merged_overrides() {
        let base = Config::default();
        let merged = base.merged(Overrides {
            base_dir: Some(PathBuf::from("/tmp/run")),
            tier: Some(TierSelector::Index(2)),
            keep_going: Some(true),
            ..Default::default()
        });

        assert_eq!(merged.base_dir, PathBuf::from("/tmp/run"));
        assert_eq!(merged.input_subdir, "stimulus_textgrids");
        assert_eq!(merged.tier, TierSelector::Index(2));

        let batch = merged.to_batch_config().unwrap();
        assert_eq!(batch.policy, FailurePolicy::Skip);
        assert_eq!(batch.input_dir, PathBuf::from("/tmp/run/stimulus_textgrids"));
    }

    #[test]
    fn test_keep_going_can_be_turned_off() {
        let base = Config {
            keep_going: true,
            ..Default::default()
        };

        let kept = base.merged(Overrides::default());
        assert_eq!(kept.to_batch_config().unwrap().policy, FailurePolicy::Skip);

        let off = base.merged(Overrides {
            keep_going: Some(false),
            ..Default::default()
        });
        assert_eq!(off.to_batch_config().unwrap().policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_load_without_config_path_gives_default() {
        let config = Config::load_at(None).unwrap();
        assert_eq!(config.output_filename, "durations.txt");
        assert!(!config.keep_going);
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let config = Config {
            suffix: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.to_batch_config(),
            Err(TimeToTargetError::Config(_))
        ));
    }
}
