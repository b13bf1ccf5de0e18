//! Resolved on-disk locations of every table and log.

use std::path::{Path, PathBuf};

use flipcheck_core::config::{FlipcheckConfig, PathsConfig};

use crate::persist::sibling_path;
use crate::source::MetricSource;

/// Absolute-or-root-relative paths derived from [`PathsConfig`].
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub classification_dir: PathBuf,
    pub combined_path: PathBuf,
    pub results_path: PathBuf,
    sources: Vec<(MetricSource, PathBuf)>,
}

impl StorageLayout {
    pub fn from_config(config: &FlipcheckConfig, root: &Path) -> Self {
        Self::from_paths(&config.paths, root)
    }

    pub fn from_paths(paths: &PathsConfig, root: &Path) -> Self {
        Self::build(paths.classification_dir_in(root), paths)
    }

    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::build(dir.to_path_buf(), &PathsConfig::default())
    }

    fn build(dir: PathBuf, paths: &PathsConfig) -> Self {
        Self {
            combined_path: dir.join(paths.effective_combined_file()),
            results_path: dir.join(paths.effective_results_file()),
            sources: MetricSource::PREFERENCE
                .iter()
                .map(|&s| (s, dir.join(s.file_name(paths))))
                .collect(),
            classification_dir: dir,
        }
    }

    pub fn source_path(&self, source: MetricSource) -> &Path {
        self.sources
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, p)| p.as_path())
            .unwrap_or(self.classification_dir.as_path())
    }

    /// Sources in join preference order with their paths.
    pub fn sources(&self) -> impl Iterator<Item = (MetricSource, &Path)> {
        self.sources.iter().map(|(s, p)| (*s, p.as_path()))
    }

    pub fn lock_path(&self) -> PathBuf {
        sibling_path(&self.combined_path, "lock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let layout = StorageLayout::from_config(&FlipcheckConfig::default(), Path::new("/w"));
        assert_eq!(
            layout.combined_path,
            PathBuf::from("/w/classification_files/combined_metrics.txt")
        );
        assert_eq!(
            layout.source_path(MetricSource::BFactor),
            Path::new("/w/classification_files/Bfactor_summary.txt")
        );
        assert_eq!(
            layout.lock_path(),
            PathBuf::from("/w/classification_files/combined_metrics.txt.lock")
        );
        let order: Vec<MetricSource> = layout.sources().map(|(s, _)| s).collect();
        assert_eq!(order, MetricSource::PREFERENCE.to_vec());
    }
}
