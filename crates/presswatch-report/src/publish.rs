//! Writing the report artifact and handing it to the browser.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::ReportError;

/// `reporte_{slug}_{YYYYmmdd_HHMMSS}.html`
#[must_use]
pub fn report_filename(slug: &str, generated_at: NaiveDateTime) -> String {
    format!("reporte_{slug}_{}.html", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Write `html` to `dir/filename`, creating `dir` if needed.
///
/// The page is written to a temporary sibling first and renamed into place,
/// so a failed write never leaves a truncated report behind.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory cannot be created or the file
/// cannot be written.
pub fn write_report(dir: &Path, filename: &str, html: &str) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

    let path = dir.join(filename);
    let partial = dir.join(format!(".{filename}.partial"));

    if let Err(e) = std::fs::write(&partial, html) {
        let _ = std::fs::remove_file(&partial);
        return Err(io_error(&partial, e));
    }
    std::fs::rename(&partial, &path).map_err(|e| io_error(&path, e))?;

    tracing::info!(path = %path.display(), bytes = html.len(), "report written");
    Ok(path)
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Open `path` in the default browser. Failure is logged, not returned.
pub fn open_in_browser(path: &Path) -> bool {
    match open::that(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not open report in browser");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("presswatch-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn filename_uses_slug_and_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap();
        assert_eq!(
            report_filename("adecoagro", at),
            "reporte_adecoagro_20240301_140709.html"
        );
    }

    #[test]
    fn write_creates_missing_directory() {
        let dir = scratch_dir("write").join("nested");
        let path = write_report(&dir, "r.html", "<html></html>").unwrap();

        assert_eq!(path, dir.join("r.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
        assert!(!dir.join(".r.html.partial").exists());

        let _ = std::fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn write_into_a_file_path_fails_without_output() {
        let dir = scratch_dir("blocked");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let err = write_report(&blocker, "r.html", "<html></html>").unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
        assert!(!blocker.join("r.html").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
