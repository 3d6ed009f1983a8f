/*!
 * Filter engine: named views over the registry
 *
 * Filters only decide which entries are shown. They never touch the
 * selection, so a hidden file that is selected is still combined.
 */

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::classify::extension_of;
use crate::types::FileEntry;

/// Named visibility filters
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Every file
    #[default]
    All,
    /// Component sources (jsx, tsx, vue, or a path naming a component)
    Components,
    /// Stylesheets
    Styles,
    /// Configuration files
    Config,
}

const COMPONENT_EXTENSIONS: &[&str] = &["jsx", "tsx", "vue"];
const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "stylus"];
const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];
const CONFIG_MARKERS: &[&str] = &["config", ".env", "package.json", "tsconfig"];

impl FilterKind {
    /// Whether a relative path is visible under this filter
    ///
    /// Substring checks are case-sensitive and the extension is taken from
    /// the path.
    pub fn matches_path(self, path: &str) -> bool {
        let extension = extension_of(path);
        let ext = extension.as_str();

        match self {
            Self::All => true,
            Self::Components => {
                path.contains("component")
                    || path.contains("Component")
                    || COMPONENT_EXTENSIONS.contains(&ext)
            }
            Self::Styles => STYLE_EXTENSIONS.contains(&ext),
            Self::Config => {
                CONFIG_MARKERS.iter().any(|marker| path.contains(marker))
                    || CONFIG_EXTENSIONS.contains(&ext)
            }
        }
    }

    /// Whether an entry is visible under this filter
    pub fn matches(self, entry: &FileEntry) -> bool {
        self.matches_path(&entry.relative_path)
    }
}

/// Indices of the entries visible under a filter
pub fn filter(kind: FilterKind, entries: &[FileEntry]) -> BTreeSet<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| kind.matches(entry))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::source::RawFile;

    #[test]
    fn test_components() {
        assert!(FilterKind::Components.matches_path("src/components/nav.js"));
        assert!(FilterKind::Components.matches_path("src/NavComponent.ts"));
        assert!(FilterKind::Components.matches_path("src/App.vue"));
        assert!(FilterKind::Components.matches_path("src/App.TSX"));
        assert!(!FilterKind::Components.matches_path("src/COMPONENTS/x.js"));
        assert!(!FilterKind::Components.matches_path("src/index.js"));
    }

    #[test]
    fn test_styles() {
        assert!(FilterKind::Styles.matches_path("a/main.scss"));
        assert!(FilterKind::Styles.matches_path("a/theme.stylus"));
        assert!(!FilterKind::Styles.matches_path("a/main.js"));
    }

    #[test]
    fn test_config() {
        assert!(FilterKind::Config.matches_path("app.config.ts"));
        assert!(FilterKind::Config.matches_path("proj/.env.local"));
        assert!(FilterKind::Config.matches_path("proj/Cargo.toml"));
        assert!(FilterKind::Config.matches_path("proj/tsconfig.base.json"));
        assert!(!FilterKind::Config.matches_path("proj/Config.ts"));
        assert!(!FilterKind::Config.matches_path("proj/main.rs"));
    }

    #[test]
    fn test_filter_does_not_touch_selection() {
        let mut registry = Registry::load(vec![
            RawFile::in_memory("p/a.css", "a{}"),
            RawFile::in_memory("p/b.rs", "fn b() {}"),
        ]);
        registry.select_all();

        let visible = filter(FilterKind::Styles, registry.files());
        assert_eq!(visible.into_iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(registry.selected().collect::<Vec<_>>(), vec![0, 1]);

        let all = filter(FilterKind::All, registry.files());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("config".parse::<FilterKind>().unwrap(), FilterKind::Config);
        assert_eq!(FilterKind::Components.to_string(), "components");
    }
}
