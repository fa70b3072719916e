use std::path::{Path, PathBuf};

/// The file name of a path, for the logs.
pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Resolves a path read from the configuration file against the directory of that file.
pub fn resolve_path(root: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(
            simplify_file_name(Path::new("/data/time_series_19-covid-Deaths.csv")),
            "time_series_19-covid-Deaths.csv"
        );
    }

    #[test]
    fn relative_paths() {
        let root = Path::new("/data/covid");
        assert_eq!(
            resolve_path(root, "confirmed.csv"),
            PathBuf::from("/data/covid/confirmed.csv")
        );
        assert_eq!(
            resolve_path(root, "/elsewhere/confirmed.csv"),
            PathBuf::from("/elsewhere/confirmed.csv")
        );
    }
}
