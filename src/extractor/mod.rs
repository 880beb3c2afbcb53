//! 区間長抽出モジュール
//!
//! TextGridを読み込み、指定ティアの中からラベルが完全一致する
//! 最初の区間を探してその長さを返す。

mod types;

pub use types::{TargetDuration, TierSelector};

use crate::error::{Result, TimeToTargetError};
use crate::textgrid::{self, TextGrid, Tier};
use std::path::Path;

/// TextGridファイルを読み込む
pub fn load_textgrid(path: &Path) -> Result<TextGrid> {
    if !path.exists() {
        return Err(TimeToTargetError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    textgrid::decode(&bytes)
        .and_then(|content| textgrid::parse(&content))
        .map_err(|e| TimeToTargetError::TextGridParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// ティアを選択
///
/// `Index` は宣言順の位置、`Name` は名前の完全一致で選ぶ。
/// 点ティアは区間を持たないのでエラーとする。
pub fn select_tier<'a>(tiers: &'a [Tier], selector: &TierSelector, path: &Path) -> Result<&'a Tier> {
    if tiers.is_empty() {
        return Err(TimeToTargetError::NoTiers(path.display().to_string()));
    }

    let tier = match selector {
        TierSelector::Index(i) => tiers.get(*i),
        TierSelector::Name(name) => tiers.iter().find(|t| &t.name == name),
    }
    .ok_or_else(|| TimeToTargetError::TierNotFound {
        path: path.display().to_string(),
        tier: selector.to_string(),
    })?;

    if tier.intervals().is_none() {
        return Err(TimeToTargetError::NotIntervalTier {
            path: path.display().to_string(),
            tier: tier.name.clone(),
        });
    }

    Ok(tier)
}

/// ティア内を先頭から走査し、最初に一致した区間の長さを返す
pub fn find_in_tier(tier: &Tier, label: &str) -> TargetDuration {
    tier.intervals()
        .unwrap_or_default()
        .iter()
        .find(|interval| interval.text == label)
        .map(|interval| TargetDuration::Found(round3(interval.xmax - interval.xmin)))
        .unwrap_or(TargetDuration::NotFound)
}

/// ファイルを開いてラベル一致区間の長さを求める
pub fn get_duration(path: &Path, label: &str, selector: &TierSelector) -> Result<TargetDuration> {
    let textgrid = load_textgrid(path)?;
    let tier = select_tier(&textgrid.tiers, selector, path)?;
    let duration = find_in_tier(tier, label);

    tracing::debug!(
        file = %path.display(),
        tier = %tier.name,
        label,
        ?duration,
        "区間を検索"
    );

    Ok(duration)
}

/// 小数第3位で丸める
///
/// 2進数の値そのものを10進展開して丸める（`{:.3}` は正確に丸める）。
/// `value * 1000.0` を経由すると 0.0045 が 4.5 になり切り上がってしまう。
pub fn round3(value: f64) -> f64 {
    format!("{:.3}", value).parse().unwrap_or(value)
}
