use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::config::PageConfig;
use crate::app::infrastructure::error::{AppError, Result};

/// Suggested file name, e.g. `page-tailwind-portrait.html`.
pub fn default_export_name(config: PageConfig) -> String {
    format!("page-{}-{}.html", config.framework, config.orientation)
}

/// Append `.html` unless the path already carries an HTML extension.
pub fn with_html_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".html");
            PathBuf::from(name)
        }
    }
}

/// Write the assembled document to `path`. Returns the path written.
pub fn export_document(path: &Path, document: &str) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(AppError::Export("no file name given".to_string()));
    }
    let target = with_html_extension(path);
    fs::write(&target, document).map_err(|e| AppError::Export(format!("{}: {}", target.display(), e)))?;
    tracing::debug!(path = %target.display(), bytes = document.len(), "document exported");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::config::{Framework, Orientation};

    #[test]
    fn test_default_export_name() {
        let config = PageConfig::new(Framework::Bootstrap, Orientation::Landscape);
        assert_eq!(default_export_name(config), "page-bootstrap-landscape.html");
    }

    #[test]
    fn test_with_html_extension() {
        assert_eq!(with_html_extension(Path::new("a/page")), PathBuf::from("a/page.html"));
        assert_eq!(with_html_extension(Path::new("page.HTM")), PathBuf::from("page.HTM"));
        assert_eq!(with_html_extension(Path::new("page.txt")), PathBuf::from("page.txt.html"));
    }

    #[test]
    fn test_export_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_document(&dir.path().join("out"), "<html></html>").unwrap();
        assert_eq!(written, dir.path().join("out.html"));
        assert_eq!(fs::read_to_string(written).unwrap(), "<html></html>");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_document(&dir.path().join("nope").join("x.html"), "x").unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }

    #[test]
    fn test_empty_path_fails() {
        assert!(matches!(export_document(Path::new(""), "x"), Err(AppError::Export(_))));
    }
}
