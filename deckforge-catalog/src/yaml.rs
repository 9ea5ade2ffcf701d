//! YAML loading for versioned catalog configuration.
//!
//! Loads asset pool definitions and human-curated override entries
//! from the `catalog/` directory.

use crate::types::{AssetOverride, AssetPool, Category};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
    #[error("Duplicate pool definition for category '{0}'")]
    DuplicatePool(Category),
    #[error("Duplicate asset '{asset}' in {category} pool")]
    DuplicateAsset { category: Category, asset: String },
}

/// All loaded catalog configuration: pools plus override entries.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pools: Vec<AssetPool>,
    overrides: Vec<AssetOverride>,
}

impl CatalogConfig {
    pub fn new(pools: Vec<AssetPool>, overrides: Vec<AssetOverride>) -> Self {
        Self { pools, overrides }
    }

    /// The pool for a category, if one was defined.
    pub fn pool(&self, category: Category) -> Option<&AssetPool> {
        self.pools.iter().find(|p| p.category == category)
    }

    /// Override entries for a category, in file/table order.
    pub fn overrides_for(&self, category: Category) -> Vec<&AssetOverride> {
        self.overrides
            .iter()
            .filter(|o| o.category == category)
            .collect()
    }

    pub fn pools(&self) -> &[AssetPool] {
        &self.pools
    }
}

/// Load all pool definitions from YAML files in a directory.
///
/// Each `.yaml` file in the directory should contain a single
/// [`AssetPool`]. Validates the per-partition invariants: one pool per
/// category, no duplicate identifier within a pool.
pub fn load_pools(dir: &Path) -> Result<Vec<AssetPool>, YamlError> {
    let pools: Vec<AssetPool> = load_yaml_dir(dir)?;

    let mut seen_categories = Vec::new();
    for pool in &pools {
        if seen_categories.contains(&pool.category) {
            return Err(YamlError::DuplicatePool(pool.category));
        }
        seen_categories.push(pool.category);

        let mut seen_assets: Vec<&str> = Vec::new();
        for asset in &pool.assets {
            if seen_assets.contains(&asset.as_str()) {
                return Err(YamlError::DuplicateAsset {
                    category: pool.category,
                    asset: asset.clone(),
                });
            }
            seen_assets.push(asset);
        }
    }

    Ok(pools)
}

/// Load all override entries from YAML files in a directory.
///
/// Each `.yaml` file should contain a YAML sequence (list) of
/// [`AssetOverride`] entries. An absent directory is an empty table.
pub fn load_overrides(dir: &Path) -> Result<Vec<AssetOverride>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let mut all = Vec::new();
    for path in sorted_yaml_files(dir)? {
        let contents = std::fs::read_to_string(&path).map_err(|e| YamlError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let overrides: Vec<AssetOverride> =
            serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
                path: path.display().to_string(),
                source: e,
            })?;
        all.extend(overrides);
    }

    Ok(all)
}

/// Load all catalog configuration from the standard directory layout.
///
/// Expected structure:
/// ```text
/// catalog_dir/
///   pools/
///     characters.yaml
///     specials.yaml
///     ...
///   overrides/
///     characters.yaml
///     ...
/// ```
pub fn load_catalog(catalog_dir: &Path) -> Result<CatalogConfig, YamlError> {
    let pools = load_pools(&catalog_dir.join("pools"))?;
    let overrides = load_overrides(&catalog_dir.join("overrides"))?;
    Ok(CatalogConfig::new(pools, overrides))
}

/// Generic helper: load all YAML files in a directory, each containing a single `T`.
fn load_yaml_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let mut items = Vec::new();
    for path in sorted_yaml_files(dir)? {
        let contents = std::fs::read_to_string(&path).map_err(|e| YamlError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let item: T = serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        items.push(item);
    }

    Ok(items)
}

/// The `.yaml`/`.yml` files in a directory, sorted by file name so load
/// order is stable across platforms.
fn sorted_yaml_files(dir: &Path) -> Result<Vec<std::path::PathBuf>, YamlError> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries.into_iter().map(|e| e.path()).collect())
}
