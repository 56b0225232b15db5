use std::{
    env,
    path::{Path, PathBuf},
};

pub struct Env {}

impl Env {
    pub const SYS_NAME: &'static str = "searchbench";

    pub fn proj_root() -> PathBuf {
        env::current_dir().expect("searchbench: failed to get current directory")
    }

    /// Default directory for benchmark result files.
    pub fn output_root() -> PathBuf {
        let mut path = Self::proj_root();
        path.push("output");
        path
    }

    /// Default directory for generated figures.
    pub fn plots_root() -> PathBuf {
        let mut path = Self::proj_root();
        path.push("plots");
        path
    }

    /// Expands a leading `~` and anchors relative paths at the project root.
    pub fn resolve_path(path: &Path) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        if expanded.is_relative() {
            Self::proj_root().join(expanded)
        } else {
            expanded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roots() {
        assert!(Env::output_root().ends_with("output"));
        assert!(Env::plots_root().ends_with("plots"));
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            Env::resolve_path(Path::new("/tmp/output")),
            PathBuf::from("/tmp/output")
        );
        assert_eq!(
            Env::resolve_path(Path::new("output")),
            Env::proj_root().join("output")
        );
    }
}
