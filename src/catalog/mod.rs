//! Scene catalog
//!
//! The catalog is the ordered, immutable list of scenes a vignette plays
//! through. It is built once at startup, either from the shipped story
//! ([`SceneCatalog::builtin`]) or from a TOML file passed with `--catalog`.
//!
//! # File format
//!
//! ```toml
//! [[scene]]
//! id = "market"
//! title = "Chợ chiều vắng khách"
//! subtitle = "Bà Hoa ngồi bên xe cà phê của mình, mong có người ghé"
//! duration_ms = 3500
//! ```

mod builtin;
mod error;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use builtin::STORY_TITLE;
pub use error::CatalogError;

/// One timed segment of the vignette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Unique discriminator, used to pick scene-specific decorations
    pub id: String,
    /// Caption headline
    pub title: String,
    /// Caption body
    pub subtitle: String,
    /// How long the scene stays on screen, in milliseconds
    pub duration_ms: u64,
}

impl SceneDescriptor {
    /// Create a new scene descriptor.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            duration_ms,
        }
    }
}

/// On-disk shape of a catalog file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(rename = "scene", default)]
    scenes: Vec<SceneDescriptor>,
}

/// Ordered, immutable sequence of scenes.
///
/// Start offsets are computed once on construction, so
/// `offsets[i]` is the sum of the durations of every scene before `i`
/// and `offsets[len]` is the total duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCatalog {
    scenes: Vec<SceneDescriptor>,
    offsets: Vec<u64>,
}

impl SceneCatalog {
    /// Build a catalog from scene descriptors.
    ///
    /// An empty list is accepted (it plays as an immediately stopped
    /// vignette); blank ids, duplicate ids and zero durations are rejected.
    pub fn new(scenes: Vec<SceneDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(scenes.len());
        for (index, scene) in scenes.iter().enumerate() {
            if scene.id.trim().is_empty() {
                return Err(CatalogError::BlankId { index });
            }
            if !seen.insert(scene.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: scene.id.clone(),
                });
            }
            if scene.duration_ms == 0 {
                return Err(CatalogError::ZeroDuration {
                    id: scene.id.clone(),
                });
            }
        }

        let offsets = offsets_for(&scenes);
        Ok(Self { scenes, offsets })
    }

    /// The story shipped with the binary.
    pub fn builtin() -> Self {
        let scenes = builtin::scenes();
        Self {
            offsets: offsets_for(&scenes),
            scenes,
        }
    }

    /// Parse a catalog from TOML text. Files must contain at least one scene.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        if file.scenes.is_empty() {
            return Err(CatalogError::Empty);
        }
        Self::new(file.scenes)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            scenes = catalog.len(),
            "loaded scene catalog"
        );
        Ok(catalog)
    }

    /// Serialize the catalog back to the TOML file format.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&CatalogFile {
            scenes: self.scenes.clone(),
        })
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// True if the catalog has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// All scenes in playback order.
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    /// Scene at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    /// Index of the final scene, or `None` for an empty catalog.
    pub fn last_index(&self) -> Option<usize> {
        self.scenes.len().checked_sub(1)
    }

    /// Scene at `index`, clamped to the last scene.
    ///
    /// An out-of-range index is a logic fault in the caller; it is logged
    /// and the last scene is returned instead. `None` only for an empty catalog.
    pub fn scene_or_last(&self, index: usize) -> Option<&SceneDescriptor> {
        match self.scenes.get(index) {
            Some(scene) => Some(scene),
            None => {
                let last = self.last_index()?;
                tracing::error!(index, last, "scene index out of range, clamping");
                self.scenes.get(last)
            }
        }
    }

    /// Start offsets of every scene plus the total, `len() + 1` entries.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Sum of all scene durations.
    pub fn total_duration_ms(&self) -> u64 {
        self.offsets.last().copied().unwrap_or(0)
    }
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Running start offsets, ending with the total duration.
fn offsets_for(scenes: &[SceneDescriptor]) -> Vec<u64> {
    let mut offsets = Vec::with_capacity(scenes.len() + 1);
    let mut sum = 0u64;
    offsets.push(sum);
    for scene in scenes {
        sum = sum.saturating_add(scene.duration_ms);
        offsets.push(sum);
    }
    offsets
}
