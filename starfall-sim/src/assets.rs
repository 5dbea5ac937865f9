//! Asset Manifest
//!
//! Declares every image the scene needs before it can start. The front-end
//! loads these through its own asset pipeline; the simulation uses the
//! declared sizes as physics body sizes.

use serde::{Serialize, Deserialize};

use crate::core::fixed::MAX_WORLD_EXTENT;
use crate::core::vec2::FixedVec2;
use crate::error::{Result, SceneError};

/// Identifies one loadable asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKey {
    /// Background image
    Sky,
    /// Platform texture
    Ground,
    /// Collectible texture
    Star,
    /// Hazard texture
    Bomb,
    /// Player spritesheet
    Dude,
}

impl AssetKey {
    /// Every key, in load order.
    pub const ALL: [AssetKey; 5] = [
        AssetKey::Sky,
        AssetKey::Ground,
        AssetKey::Star,
        AssetKey::Bomb,
        AssetKey::Dude,
    ];

    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            AssetKey::Sky => "sky",
            AssetKey::Ground => "ground",
            AssetKey::Star => "star",
            AssetKey::Bomb => "bomb",
            AssetKey::Dude => "dude",
        }
    }
}

/// What kind of image an asset is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetKind {
    /// A single image.
    Image {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// A horizontal strip of equally sized animation frames.
    Spritesheet {
        /// Frame cell width in pixels
        frame_width: u32,
        /// Frame cell height in pixels
        frame_height: u32,
        /// Number of frames in the strip
        frames: u32,
    },
}

/// One declared asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Asset identity
    pub key: AssetKey,
    /// Path relative to the asset root
    pub path: String,
    /// Image or spritesheet layout
    #[serde(flatten)]
    pub kind: AssetKind,
}

impl AssetEntry {
    /// Create an image entry.
    pub fn image(key: AssetKey, path: &str, width: u32, height: u32) -> Self {
        Self {
            key,
            path: path.to_string(),
            kind: AssetKind::Image { width, height },
        }
    }

    /// Create a spritesheet entry.
    pub fn spritesheet(key: AssetKey, path: &str, frame_width: u32, frame_height: u32, frames: u32) -> Self {
        Self {
            key,
            path: path.to_string(),
            kind: AssetKind::Spritesheet { frame_width, frame_height, frames },
        }
    }

    /// Size of one displayed frame, in pixels.
    pub fn frame_size(&self) -> (u32, u32) {
        match self.kind {
            AssetKind::Image { width, height } => (width, height),
            AssetKind::Spritesheet { frame_width, frame_height, .. } => (frame_width, frame_height),
        }
    }

    /// Number of frames (1 for plain images).
    pub fn frame_count(&self) -> u32 {
        match self.kind {
            AssetKind::Image { .. } => 1,
            AssetKind::Spritesheet { frames, .. } => frames,
        }
    }
}

/// The full set of assets fetched before the scene starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Declared entries
    pub entries: Vec<AssetEntry>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            entries: vec![
                AssetEntry::image(AssetKey::Sky, "sky.png", 800, 600),
                AssetEntry::image(AssetKey::Ground, "platform.png", 400, 32),
                AssetEntry::image(AssetKey::Star, "star.png", 24, 22),
                AssetEntry::image(AssetKey::Bomb, "bomb.png", 14, 14),
                AssetEntry::spritesheet(AssetKey::Dude, "dude.png", 32, 48, 9),
            ],
        }
    }
}

impl AssetManifest {
    /// Look up an entry by key.
    pub fn get(&self, key: AssetKey) -> Option<&AssetEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Physics body size for an asset (one frame for spritesheets).
    pub fn body_size(&self, key: AssetKey) -> Result<FixedVec2> {
        let entry = self
            .get(key)
            .ok_or_else(|| SceneError::InvalidConfig(format!("asset '{}' is not declared", key.name())))?;
        let (w, h) = entry.frame_size();
        Ok(FixedVec2::from_ints(w as i32, h as i32))
    }

    /// Every key declared exactly once, with non-empty paths and sizes.
    pub fn validate(&self) -> Result<()> {
        for key in AssetKey::ALL {
            let count = self.entries.iter().filter(|e| e.key == key).count();
            if count != 1 {
                return Err(SceneError::InvalidConfig(format!(
                    "asset '{}' declared {} times, expected once",
                    key.name(),
                    count
                )));
            }
        }

        for entry in &self.entries {
            if entry.path.trim().is_empty() {
                return Err(SceneError::InvalidConfig(format!(
                    "asset '{}' has an empty path",
                    entry.key.name()
                )));
            }
            let (w, h) = entry.frame_size();
            if w == 0 || h == 0 || entry.frame_count() == 0 {
                return Err(SceneError::InvalidConfig(format!(
                    "asset '{}' has a zero-sized frame",
                    entry.key.name()
                )));
            }
            if w > MAX_WORLD_EXTENT as u32 || h > MAX_WORLD_EXTENT as u32 {
                return Err(SceneError::InvalidConfig(format!(
                    "asset '{}' frame {}x{} exceeds {} px",
                    entry.key.name(),
                    w,
                    h,
                    MAX_WORLD_EXTENT
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_is_valid() {
        let manifest = AssetManifest::default();
        manifest.validate().unwrap();
        assert_eq!(manifest.entries.len(), AssetKey::ALL.len());
    }

    #[test]
    fn test_spritesheet_frame_size() {
        let manifest = AssetManifest::default();
        let dude = manifest.get(AssetKey::Dude).unwrap();
        assert_eq!(dude.frame_size(), (32, 48));
        assert_eq!(dude.frame_count(), 9);
        assert_eq!(manifest.body_size(AssetKey::Dude).unwrap(), FixedVec2::from_ints(32, 48));
    }

    #[test]
    fn test_missing_asset_rejected() {
        let mut manifest = AssetManifest::default();
        manifest.entries.retain(|e| e.key != AssetKey::Bomb);

        assert!(matches!(manifest.validate(), Err(SceneError::InvalidConfig(_))));
        assert!(manifest.body_size(AssetKey::Bomb).is_err());
    }

    #[test]
    fn test_manifest_json_shape() {
        let json = serde_json::to_value(AssetManifest::default()).unwrap();
        let dude = &json["entries"][4];
        assert_eq!(dude["key"], "dude");
        assert_eq!(dude["kind"], "spritesheet");
        assert_eq!(dude["frame_width"], 32);
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut manifest = AssetManifest::default();
        manifest.entries[2] = AssetEntry::image(AssetKey::Star, "star.png", 40_000, 22);
        assert!(matches!(manifest.validate(), Err(SceneError::InvalidConfig(_))));
    }
}
