use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use macroquad::{
    math::Vec2 as MacroquadVec2,
    texture::{self, DrawTextureParams, Texture2D},
};
use roguelike_core::{SpriteFrame, SpriteSet};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Frame paths for every sprite sequence, resolved against the manifest's
/// directory and ordered by [`SpriteSet::index`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteManifest {
    sequences: Vec<Vec<PathBuf>>,
}

impl SpriteManifest {
    /// Returns the default manifest path relative to the repository root.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from("assets/sprites.toml")
    }

    /// Reads and parses the manifest stored at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::parse(&contents, &base)
    }

    /// Parses manifest `contents`, resolving frame paths against `base`.
    ///
    /// Every sprite sequence must be listed exactly once with at least one
    /// frame; unknown sequence names are rejected.
    pub fn parse(contents: &str, base: &Path) -> Result<Self> {
        let manifest: RawManifest =
            toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            bail!(
                "unsupported sprite manifest version {}; expected {}",
                manifest.version,
                SUPPORTED_MANIFEST_VERSION
            );
        }

        let mut resolved = HashMap::new();
        for (name, frames) in manifest.sprites {
            let set = parse_sprite_set(&name)?;
            if frames.is_empty() {
                bail!("sprite sequence `{name}` lists no frames");
            }
            let paths: Vec<PathBuf> = frames.iter().map(|frame| base.join(frame)).collect();
            if resolved.insert(set, paths).is_some() {
                bail!("sprite manifest contains duplicate entry for `{name}`");
            }
        }

        let mut sequences = Vec::with_capacity(SpriteSet::COUNT);
        for set in SpriteSet::ALL {
            let Some(paths) = resolved.remove(&set) else {
                bail!("sprite manifest missing entry for `{}`", set.name());
            };
            sequences.push(paths);
        }

        Ok(Self { sequences })
    }

    /// Frame paths of the provided sequence.
    #[must_use]
    pub fn frames(&self, set: SpriteSet) -> &[PathBuf] {
        self.sequences
            .get(set.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, serde::Deserialize)]
struct RawManifest {
    version: u32,
    sprites: HashMap<String, Vec<String>>,
}

fn parse_sprite_set(name: &str) -> Result<SpriteSet> {
    SpriteSet::ALL
        .into_iter()
        .find(|set| set.name() == name)
        .with_context(|| format!("unknown sprite sequence `{name}` in manifest"))
}

/// Textures for every sprite sequence held in a fixed table.
#[derive(Debug)]
pub struct SpriteAtlas {
    sequences: [Vec<Texture2D>; SpriteSet::COUNT],
}

impl SpriteAtlas {
    /// Loads every frame listed by the manifest from disk.
    pub fn load(manifest: &SpriteManifest) -> Result<Self> {
        Self::load_with(manifest, default_loader)
    }

    /// Draws `frame` with its top-left corner at `position`, scaled to
    /// `size`. Frame indices wrap around the sequence length.
    pub fn draw(&self, frame: SpriteFrame, position: Vec2, size: Vec2) -> Result<()> {
        let texture = self
            .texture(frame)
            .with_context(|| format!("sprite {frame} missing from atlas"))?;

        texture::draw_texture_ex(
            texture,
            position.x,
            position.y,
            macroquad::color::WHITE,
            DrawTextureParams {
                dest_size: Some(MacroquadVec2::new(size.x, size.y)),
                ..DrawTextureParams::default()
            },
        );

        Ok(())
    }

    /// Texture used for `frame`, wrapping the frame index.
    #[must_use]
    pub fn texture(&self, frame: SpriteFrame) -> Option<Texture2D> {
        let sequence = self.sequences.get(frame.set.index())?;
        if sequence.is_empty() {
            return None;
        }
        sequence.get(frame.frame % sequence.len()).copied()
    }

    /// Number of textures stored in the atlas.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.sequences.iter().map(Vec::len).sum()
    }

    fn load_with(
        manifest: &SpriteManifest,
        mut loader: impl FnMut(&Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut sequences: [Vec<Texture2D>; SpriteSet::COUNT] = Default::default();
        for set in SpriteSet::ALL {
            let frames = manifest.frames(set);
            let mut textures = Vec::with_capacity(frames.len());
            for path in frames {
                let texture = loader(path).with_context(|| {
                    format!("failed to load sprite {} from {}", set.name(), path.display())
                })?;
                textures.push(texture);
            }
            sequences[set.index()] = textures;
        }
        Ok(Self { sequences })
    }
}

fn default_loader(path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roguelike_core::{Actor, AnimState, Facing};
    use std::cell::RefCell;

    fn full_manifest() -> String {
        let mut contents = String::from("version = 1\n\n[sprites]\n");
        for set in SpriteSet::ALL {
            contents.push_str(&format!(
                "{0} = [\"{0}_0.png\", \"{0}_1.png\"]\n",
                set.name()
            ));
        }
        contents
    }

    #[test]
    fn atlas_loads_frames_in_table_order() {
        let manifest =
            SpriteManifest::parse(&full_manifest(), Path::new("assets")).expect("manifest parses");
        let load_order = RefCell::new(Vec::new());
        let atlas = SpriteAtlas::load_with(&manifest, |path| {
            load_order.borrow_mut().push(path.to_path_buf());
            Ok(Texture2D::empty())
        })
        .expect("atlas should load using provided loader");

        assert_eq!(atlas.texture_count(), SpriteSet::COUNT * 2);
        let order = load_order.into_inner();
        assert_eq!(order[0], PathBuf::from("assets/hero_idle_left_0.png"));
        assert_eq!(order[15], PathBuf::from("assets/enemy_walk_right_1.png"));
    }

    #[test]
    fn texture_lookup_wraps_frame_index() {
        let manifest =
            SpriteManifest::parse(&full_manifest(), Path::new("assets")).expect("manifest parses");
        let atlas = SpriteAtlas::load_with(&manifest, |_| Ok(Texture2D::empty()))
            .expect("atlas loads");
        let set = SpriteSet::new(Actor::Enemy, AnimState::Walk, Facing::Left);

        assert!(atlas.texture(SpriteFrame { set, frame: 5 }).is_some());
    }

    #[test]
    fn loader_failures_are_reported_with_sequence_name() {
        let manifest =
            SpriteManifest::parse(&full_manifest(), Path::new("assets")).expect("manifest parses");
        let error = SpriteAtlas::load_with(&manifest, |_| bail!("no such file"))
            .expect_err("loader failure must propagate");

        assert!(format!("{error:#}").contains("hero_idle_left"));
    }
}
