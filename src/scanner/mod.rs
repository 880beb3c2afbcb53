use crate::error::{Result, TimeToTargetError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_SUFFIX: &str = ".TextGrid";

#[derive(Debug, Clone)]
pub struct AnnotationFile {
    pub path: PathBuf,
    pub file_name: String,
    /// ファイル名から拡張子を除いたもの（検索ラベル）
    pub label: String,
}

pub fn scan_folder(folder: &Path, suffix: &str) -> Result<Vec<AnnotationFile>> {
    if !folder.is_dir() {
        return Err(TimeToTargetError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder).max_depth(1) {  // 直下のみ（再帰しない）
        // 読めないフォルダは空扱いにせずエラーにする
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if let Some(label) = label_for(&file_name, suffix) {
            files.push(AnnotationFile {
                path: path.to_path_buf(),
                label: label.to_string(),
                file_name,
            });
        }
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

/// 接尾辞に一致すればラベル部分を返す（大文字小文字を区別）
pub fn label_for<'a>(file_name: &'a str, suffix: &str) -> Option<&'a str> {
    file_name.strip_suffix(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_label_for() {
        assert_eq!(label_for("foo.TextGrid", DEFAULT_SUFFIX), Some("foo"));
        assert_eq!(label_for("a.b.TextGrid", DEFAULT_SUFFIX), Some("a.b"));
        assert_eq!(label_for("foo.textgrid", DEFAULT_SUFFIX), None);
        assert_eq!(label_for("notes.txt", DEFAULT_SUFFIX), None);
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"), DEFAULT_SUFFIX);
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_folder_empty() {
        let dir = tempdir().expect("Failed to create temp dir");

        let result = scan_folder(dir.path(), DEFAULT_SUFFIX).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().expect("Failed to create temp dir");
        let temp_dir = dir.path();

        File::create(temp_dir.join("c.TextGrid")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("a.TextGrid")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("b.TextGrid")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.join("notes.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir_all(temp_dir.join("nested.TextGrid")).unwrap();

        let result = scan_folder(temp_dir, DEFAULT_SUFFIX).unwrap();
        let labels: Vec<&str> = result.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(result[0].file_name, "a.TextGrid");
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_unreadable_folder_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("Failed to create temp dir");
        let locked = dir.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        File::create(locked.join("a.TextGrid")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root権限では読めてしまうので確認できない
        let readable = fs::read_dir(&locked).is_ok();
        let result = scan_folder(&locked, DEFAULT_SUFFIX);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        let err = result.unwrap_err();
        assert!(matches!(err, TimeToTargetError::Io(_)), "{:?}", err);
    }
}
