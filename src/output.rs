//! 結果ファイル出力
//!
//! ヘッダ行で作り直したあと、1行ごとに開いて追記して閉じる。

use crate::error::Result;
use crate::extractor::TargetDuration;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub const HEADER: &str = "file,time_to_target";

pub const DEFAULT_MISSING_MARKER: &str = "NA";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub label: String,
    pub duration: TargetDuration,
}

impl ResultRow {
    pub fn new(label: impl Into<String>, duration: TargetDuration) -> Self {
        Self {
            label: label.into(),
            duration,
        }
    }

    /// `<label>, <duration>` 形式（改行なし）
    pub fn render(&self, missing_marker: &str) -> String {
        let value = match self.duration {
            TargetDuration::Found(d) => format_duration(d),
            TargetDuration::NotFound => missing_marker.to_string(),
        };
        format!("{}, {}", self.label, value)
    }
}

/// 秒数を最短の小数表記にする（小数部は最低1桁、最大3桁）
pub fn format_duration(seconds: f64) -> String {
    let mut s = format!("{:.3}", seconds);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.push('0');
    }
    s
}

/// 出力ファイルを作り直してヘッダ行のみ書く
pub fn write_header(path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{}", HEADER)?;
    Ok(())
}

/// 1行追記する
pub fn append_row(path: &Path, row: &ResultRow, missing_marker: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", row.render(missing_marker))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1.25), "1.25");
        assert_eq!(format_duration(1.0), "1.0");
        assert_eq!(format_duration(0.333), "0.333");
        assert_eq!(format_duration(0.0), "0.0");
        assert_eq!(format_duration(12.5), "12.5");
        assert_eq!(format_duration(0.0045), "0.004");
        assert_eq!(format_duration(0.0055), "0.005");
    }

    #[test]
    fn test_render_found_and_missing() {
        let found = ResultRow::new("foo", TargetDuration::Found(1.25));
        assert_eq!(found.render(DEFAULT_MISSING_MARKER), "foo, 1.25");

        let missing = ResultRow::new("baz", TargetDuration::NotFound);
        assert_eq!(missing.render(DEFAULT_MISSING_MARKER), "baz, NA");
        assert_eq!(missing.render("None"), "baz, None");
        assert_eq!(missing.render(""), "baz, ");
    }

    #[test]
    fn test_header_truncates_and_rows_append() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("durations.txt");
        std::fs::write(&path, "stale content\n").unwrap();

        write_header(&path).unwrap();
        append_row(&path, &ResultRow::new("a", TargetDuration::Found(0.5)), "NA").unwrap();
        append_row(&path, &ResultRow::new("b", TargetDuration::NotFound), "NA").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "file,time_to_target\na, 0.5\nb, NA\n");
    }
}
