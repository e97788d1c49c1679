use std::borrow::Cow;

use anyhow::anyhow;
use gpui::{AssetSource, SharedString};
use material_icon_embed_rs::Asset as MaterialAsset;
use rust_embed::RustEmbed;
use tracing::debug;

#[derive(RustEmbed)]
#[folder = "assets"]
#[include = "icons/**/*"]
#[exclude = "*.DS_Store"]
pub struct LocalAsset;

/// Material file/folder icons first, then the icons bundled with the gallery.
pub struct GalleryAssets;

impl AssetSource for GalleryAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        MaterialAsset::get(path)
            .map(|f| Some(f.data))
            .or_else(|| LocalAsset::get(path).map(|f| Some(f.data)))
            .ok_or_else(|| {
                debug!("asset not found: {path}");
                anyhow!("Asset not found: {}", path)
            })
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let mut assets: Vec<SharedString> = MaterialAsset::iter()
            .chain(LocalAsset::iter())
            .filter(|p| p.starts_with(path))
            .map(SharedString::from)
            .collect();

        assets.sort();
        assets.dedup();
        Ok(assets)
    }
}
