use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Hero metadata as stored by the asset fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroData {
    /// Display name, e.g. "廉颇"
    pub cname: String,
    /// Short code used to name the icon file
    #[serde(deserialize_with = "string_or_number")]
    pub ename: String,
}

/// Item metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemData {
    pub item_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub item_id: String,
}

/// Well-known CJK fonts tried when the asset directory ships none
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "/System/Library/Fonts/PingFang.ttc",
];

const FONT_EXTENSIONS: &[&str] = &["ttf", "ttc", "otf"];

/// Read-only asset registry: name lookups plus resolved file locations.
///
/// Every piece is optional. A missing table or file leaves its lookup empty
/// and the renderer falls back to plain shapes.
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    root: PathBuf,
    pub heroes_by_name: HashMap<String, String>,
    pub items_by_name: HashMap<String, String>,
    pub font_path: Option<PathBuf>,
    pub map_art: Option<PathBuf>,
    pub invisible_overlay: Option<PathBuf>,
}

impl AssetLibrary {
    /// Load metadata and locate optional files under `assets_dir`
    pub fn load(assets_dir: &Path) -> Result<Self> {
        let mut assets = Self {
            root: assets_dir.to_path_buf(),
            ..Self::default()
        };

        let heroes: Vec<HeroData> = table_or_empty(&assets_dir.join("heroes.json"));
        for hero in heroes {
            assets.heroes_by_name.insert(hero.cname, hero.ename);
        }

        let items: Vec<ItemData> = table_or_empty(&assets_dir.join("items.json"));
        for item in items {
            assets.items_by_name.insert(item.item_name, item.item_id);
        }

        assets.font_path = find_font(&assets_dir.join("fonts"));
        if assets.font_path.is_none() {
            tracing::warn!("No CJK font found. Text will use whatever fonts the system offers.");
        }
        assets.map_art = existing(assets_dir.join("map").join("map.png"));
        assets.invisible_overlay = existing(assets_dir.join("invisible.png"));

        tracing::info!(
            "Loaded {} heroes and {} items from {}",
            assets.heroes_by_name.len(),
            assets.items_by_name.len(),
            assets_dir.display()
        );
        Ok(assets)
    }

    /// An empty library: every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Icon file for a hero display name, if both the mapping and the file exist
    pub fn hero_icon(&self, name: &str) -> Option<PathBuf> {
        let code = self.heroes_by_name.get(name)?;
        let found = existing(self.root.join("heroes").join(format!("{}.jpg", code)));
        if found.is_none() {
            tracing::debug!("Missing icon for hero {} ({})", name, code);
        }
        found
    }

    /// Icon file for an item display name
    pub fn item_icon(&self, name: &str) -> Option<PathBuf> {
        let id = self.items_by_name.get(name)?;
        let found = existing(self.root.join("items").join(format!("{}.jpg", id)));
        if found.is_none() {
            tracing::debug!("Missing icon for item {} ({})", name, id);
        }
        found
    }
}

/// A broken table disables its lookups instead of failing the load
fn table_or_empty<T: for<'de> Deserialize<'de>>(path: &Path) -> Vec<T> {
    read_table(path).unwrap_or_else(|e| {
        tracing::warn!("{:#}. Lookups from this table are disabled.", e);
        Vec::new()
    })
}

fn read_table<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        tracing::warn!(
            "No {} found. Run the asset fetcher to download metadata.",
            path.display()
        );
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// First font in `font_dir` (sorted by name), then the system list
fn find_font(font_dir: &Path) -> Option<PathBuf> {
    let mut bundled: Vec<PathBuf> = std::fs::read_dir(font_dir)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| FONT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    bundled.sort();

    bundled
        .into_iter()
        .next()
        .or_else(|| SYSTEM_FONTS.iter().map(PathBuf::from).find(|p| p.is_file()))
}

/// Ids are published as strings by some sources and as numbers by others
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
