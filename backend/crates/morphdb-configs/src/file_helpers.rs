use std::path::{Path, PathBuf};

/// Resolve a possibly-relative path against the current working directory.
///
/// The path does not need to exist. When the working directory cannot be read
/// the input is returned unchanged.
pub fn normalize_dir_path(path: &str) -> String {
    let p = Path::new(path);
    if p.is_absolute() {
        return path.to_string();
    }
    match std::env::current_dir() {
        Ok(cwd) => join_clean(&cwd, p).to_string_lossy().into_owned(),
        Err(_) => path.to_string(),
    }
}

fn join_clean(base: &Path, rel: &Path) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in rel.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_unchanged() {
        assert_eq!(normalize_dir_path("/var/lib/morphdb"), "/var/lib/morphdb");
    }

    #[test]
    fn test_relative_path_becomes_absolute() {
        let normalized = normalize_dir_path("./data/morphdb.sqlite");
        assert!(Path::new(&normalized).is_absolute());
        assert!(normalized.ends_with("data/morphdb.sqlite"));
        assert!(!normalized.contains("/./"));
    }
}
