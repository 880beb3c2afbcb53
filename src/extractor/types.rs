use serde::{Deserialize, Serialize};
use std::fmt;

/// 対象区間の長さ（秒）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetDuration {
    /// 一致した区間の長さ（小数第3位で丸め済み）
    Found(f64),
    /// 一致する区間なし
    NotFound,
}

impl TargetDuration {
    pub fn is_found(&self) -> bool {
        matches!(self, TargetDuration::Found(_))
    }
}

/// 検索対象ティアの指定方法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TierSelector {
    /// ファイル内の宣言順での位置
    Index(usize),
    /// ティア名（完全一致）
    Name(String),
}

impl Default for TierSelector {
    fn default() -> Self {
        TierSelector::Index(0)
    }
}

impl fmt::Display for TierSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierSelector::Index(i) => write!(f, "#{}", i),
            TierSelector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}
