//! Subcommand implementations.

pub mod browse;
pub mod completions;
pub mod list;
pub mod zones;

use clientele_core::config::AppConfig;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Data file resolution: flag beats config; relative paths are rooted at the
/// working directory.
pub(crate) fn resolve_data_path(flag: Option<&Path>, config: &AppConfig, root: &Path) -> PathBuf {
    let path = flag.map_or_else(|| config.data.path.clone(), Path::to_path_buf);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}

/// Page size resolution: a valid (nonzero) flag beats config.
pub(crate) fn resolve_page_size(flag: Option<usize>, config: &AppConfig) -> NonZeroUsize {
    flag.and_then(NonZeroUsize::new)
        .unwrap_or_else(|| config.view.page_size())
}

#[cfg(test)]
mod tests {
    use super::{resolve_data_path, resolve_page_size};
    use clientele_core::config::AppConfig;
    use std::path::{Path, PathBuf};

    #[test]
    fn flag_overrides_configured_data_path() {
        let config = AppConfig::default();
        let root = Path::new("/work");
        let path = resolve_data_path(Some(Path::new("other.json")), &config, root);
        assert_eq!(path, PathBuf::from("/work/other.json"));
    }

    #[test]
    fn absolute_flag_path_is_kept() {
        let config = AppConfig::default();
        let path = resolve_data_path(Some(Path::new("/abs/data.json")), &config, Path::new("/w"));
        assert_eq!(path, PathBuf::from("/abs/data.json"));
    }

    #[test]
    fn config_path_roots_at_working_directory() {
        let config = AppConfig::default();
        let path = resolve_data_path(None, &config, Path::new("/work"));
        assert_eq!(path, PathBuf::from("/work/data/customers.json"));
    }

    #[test]
    fn zero_page_size_flag_falls_back_to_config() {
        let config = AppConfig::default();
        assert_eq!(resolve_page_size(Some(0), &config).get(), 25);
        assert_eq!(resolve_page_size(Some(10), &config).get(), 10);
        assert_eq!(resolve_page_size(None, &config).get(), 25);
    }
}
