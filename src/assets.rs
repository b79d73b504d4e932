use crate::error::OverlayError;
use crate::overlay::MouseIcon;
use crate::OverlayResult;
use eframe::egui;
use std::collections::HashMap;
use std::path::Path;

pub const ARROW_ASSET: &str = "arrow.png";

/// The mouse and arrow images, uploaded once at startup.
///
/// An image that fails to load is left out and simply not drawn.
#[derive(Default)]
pub struct Assets {
    mouse: HashMap<MouseIcon, egui::TextureHandle>,
    arrow: Option<egui::TextureHandle>,
}

impl Assets {
    pub fn load(ctx: &egui::Context, dir: &Path) -> Self {
        let mut assets = Self::default();

        for icon in MouseIcon::ALL {
            match load_texture(ctx, dir, icon.asset_name()) {
                Ok(tex) => {
                    assets.mouse.insert(icon, tex);
                }
                Err(e) => tracing::warn!("{e}"),
            }
        }

        assets.arrow = load_texture(ctx, dir, ARROW_ASSET)
            .map_err(|e| tracing::warn!("{e}"))
            .ok();

        tracing::debug!(
            dir = %dir.display(),
            mouse_icons = assets.mouse.len(),
            arrow = assets.arrow.is_some(),
            "assets loaded"
        );

        assets
    }

    pub fn mouse(&self, icon: MouseIcon) -> Option<&egui::TextureHandle> {
        self.mouse.get(&icon)
    }

    pub fn arrow(&self) -> Option<&egui::TextureHandle> {
        self.arrow.as_ref()
    }
}

fn load_texture(
    ctx: &egui::Context,
    dir: &Path,
    name: &str,
) -> OverlayResult<egui::TextureHandle> {
    let path = dir.join(name);
    let img = image::open(&path).map_err(|source| OverlayError::Asset {
        path: path.clone(),
        source,
    })?;

    let size = [img.width() as usize, img.height() as usize];
    let rgba = img.to_rgba8();

    Ok(ctx.load_texture(
        name,
        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
        egui::TextureOptions::LINEAR,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_yields_no_textures() {
        let ctx = egui::Context::default();
        let assets = Assets::load(&ctx, Path::new("/nonexistent/input-overlay-assets"));

        assert!(assets.arrow().is_none());
        assert!(MouseIcon::ALL.iter().all(|i| assets.mouse(*i).is_none()));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let ctx = egui::Context::default();
        match load_texture(&ctx, Path::new("/nonexistent"), ARROW_ASSET) {
            Err(OverlayError::Asset { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent").join(ARROW_ASSET))
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("loaded an asset from a missing directory"),
        }
    }
}
