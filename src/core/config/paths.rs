use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "portfolio-assistant";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub project_root: PathBuf,
    pub user_data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub secrets_path: PathBuf,
}

impl AppPaths {
    /// Resolves directories from `PORTFOLIO_ROOT` / `PORTFOLIO_DATA_DIR`, falling back
    /// to the manifest or working directory and the XDG data home.
    pub fn new() -> Self {
        let lookup = |key: &str| env::var(key).ok();
        let project_root = project_root_from(lookup);
        let user_data_dir = data_dir_from(lookup, &project_root, cfg!(debug_assertions));
        Self::with_dirs(project_root, user_data_dir)
    }

    /// Builds paths rooted at explicit directories, creating the data and log dirs.
    pub fn with_dirs(project_root: PathBuf, user_data_dir: PathBuf) -> Self {
        let log_dir = user_data_dir.join("logs");
        let secrets_path = user_data_dir.join("secrets.yaml");

        for dir in [&user_data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            project_root,
            user_data_dir,
            log_dir,
            secrets_path,
        }
    }

    /// Resolves a configured path against the project root unless already absolute.
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let candidate = PathBuf::from(raw);
        if candidate.is_absolute() {
            return candidate;
        }
        self.project_root.join(candidate)
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn project_root_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(root) = lookup("PORTFOLIO_ROOT") {
        return PathBuf::from(root);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let has_layout = manifest_dir.join("config.yml").is_file() || manifest_dir.join("data").is_dir();
    match env::current_dir() {
        Ok(cwd) if !has_layout => cwd,
        _ => manifest_dir,
    }
}

/// Debug builds keep state next to the checkout; release builds use the XDG data home.
fn data_dir_from(
    lookup: impl Fn(&str) -> Option<String>,
    project_root: &Path,
    debug: bool,
) -> PathBuf {
    if let Some(dir) = lookup("PORTFOLIO_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if debug {
        return project_root.to_path_buf();
    }

    let data_home = lookup("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| lookup("HOME").map(|home| Path::new(&home).join(".local/share")));
    match data_home {
        Some(base) => base.join(DATA_DIR_NAME),
        None => project_root.join(".portfolio-assistant"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::with_dirs(dir.path().to_path_buf(), dir.path().join("state"));

        let absolute = dir.path().join("corpus");
        assert_eq!(paths.resolve(absolute.to_str().unwrap()), absolute);
        assert_eq!(paths.resolve("data"), dir.path().join("data"));
    }

    #[test]
    fn with_dirs_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::with_dirs(dir.path().to_path_buf(), dir.path().join("state"));

        assert!(paths.log_dir.is_dir());
        assert_eq!(paths.secrets_path, dir.path().join("state").join("secrets.yaml"));
    }

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn explicit_data_dir_wins() {
        let lookup = env_of(&[("PORTFOLIO_DATA_DIR", "/srv/portfolio"), ("HOME", "/home/p")]);
        let dir = data_dir_from(lookup, Path::new("/repo"), false);
        assert_eq!(dir, PathBuf::from("/srv/portfolio"));
    }

    #[test]
    fn debug_builds_use_project_root() {
        let dir = data_dir_from(env_of(&[("HOME", "/home/p")]), Path::new("/repo"), true);
        assert_eq!(dir, PathBuf::from("/repo"));
    }

    #[test]
    fn release_builds_use_xdg_then_home() {
        let xdg = env_of(&[("XDG_DATA_HOME", "/data"), ("HOME", "/home/p")]);
        assert_eq!(
            data_dir_from(xdg, Path::new("/repo"), false),
            PathBuf::from("/data/portfolio-assistant")
        );

        let home = env_of(&[("HOME", "/home/p")]);
        assert_eq!(
            data_dir_from(home, Path::new("/repo"), false),
            PathBuf::from("/home/p/.local/share/portfolio-assistant")
        );

        assert_eq!(
            data_dir_from(env_of(&[]), Path::new("/repo"), false),
            PathBuf::from("/repo/.portfolio-assistant")
        );
    }

    #[test]
    fn project_root_env_override() {
        let root = project_root_from(env_of(&[("PORTFOLIO_ROOT", "/opt/portfolio")]));
        assert_eq!(root, PathBuf::from("/opt/portfolio"));
    }
}
