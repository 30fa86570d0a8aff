//! Shared utilities: an id-ordered map, progress reporting over long
//! passes, and a process-wide configuration singleton.

use crate::config::PipelineConfig;
use indexmap::IndexMap;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::OnceLock;

/// An insertion-ordered map keyed by a small integer id (vertex id, gate
/// id). Iteration order matches insertion order rather than hash order,
/// which is what makes `for_each_edge`'s "lower id first" rule and
/// deterministic test output possible without a separate sort pass.
pub type OrderedIdMap<K, V> = IndexMap<K, V>;

/// Reports progress over a long-running pass (a simplification round, a
/// search-scheduler node expansion) without forcing a terminal dependency
/// on callers that don't want one.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// A progress bar of the given length, rendered to stderr.
    pub fn visible(len: u64, label: &str) -> Progress {
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template("{prefix} [{bar:40}] {pos}/{len}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(label.to_string());
        Progress { bar: Some(bar) }
    }

    /// A no-op progress reporter, used by tests and library callers that
    /// don't want terminal output.
    pub fn silent() -> Progress {
        Progress { bar: None }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

static GLOBAL_CONFIG: OnceLock<PipelineConfig> = OnceLock::new();

/// Installs the process-wide pipeline configuration. Has no effect if a
/// configuration has already been installed (first write wins, matching
/// the teacher's config-singleton convention).
pub fn set_global_config(config: PipelineConfig) {
    let _ = GLOBAL_CONFIG.set(config);
}

/// Returns the process-wide pipeline configuration, falling back to
/// defaults if none has been installed.
pub fn global_config() -> &'static PipelineConfig {
    GLOBAL_CONFIG.get_or_init(PipelineConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_map_preserves_insertion_order() {
        let mut m: OrderedIdMap<u64, &str> = OrderedIdMap::new();
        m.insert(5, "five");
        m.insert(1, "one");
        m.insert(3, "three");
        let keys: Vec<_> = m.keys().copied().collect();
        assert_eq!(keys, vec![5, 1, 3]);
    }

    #[test]
    fn silent_progress_does_not_panic() {
        let p = Progress::silent();
        p.inc(3);
        p.finish();
    }

    #[test]
    fn global_config_defaults_when_unset() {
        // Note: since this is a process-wide OnceLock, other tests in this
        // binary that call `set_global_config` first will determine which
        // value wins; we only assert the accessor never panics.
        let _ = global_config();
    }
}
