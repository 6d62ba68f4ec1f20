//! Sprite lookup for fruit kinds
//!
//! The simulation only knows a fruit's kind and whether it is whole or
//! sliced. Turning that into a file on disk is the resolver's job, and
//! turning the file into something drawable is the catalog's.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use color_eyre::{Result, eyre::WrapErr};
use image::RgbaImage;
use ratatui::style::Color;
use tracing::info;

use crate::entities::{FruitKind, SpriteVariant};

/// Maps a fruit name and variant to the asset that pictures it
pub trait AssetResolver {
    fn resolve(&self, name: &str, variant: SpriteVariant) -> PathBuf;
}

/// `<dir>/<name>.png` for whole fruit, `<dir>/half_<name>.png` for sliced
#[derive(Debug, Clone)]
pub struct ImageDirResolver {
    root: PathBuf,
}

impl ImageDirResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetResolver for ImageDirResolver {
    fn resolve(&self, name: &str, variant: SpriteVariant) -> PathBuf {
        match variant {
            SpriteVariant::Whole => self.root.join(format!("{name}.png")),
            SpriteVariant::Sliced => self.root.join(format!("half_{name}.png")),
        }
    }
}

/// Something the renderer can paint into a fruit's hit box
#[derive(Debug, Clone)]
pub enum Sprite {
    /// Decoded image, scaled to the box at draw time
    Bitmap(RgbaImage),
    /// Text art drawn from the box's top-left cell
    Glyph {
        lines: Vec<&'static str>,
        color: Color,
    },
}

#[derive(Debug, Clone)]
pub struct SpriteCatalog {
    sprites: HashMap<(FruitKind, SpriteVariant), Sprite>,
}

impl SpriteCatalog {
    /// Loads both variants of every kind. Any missing or unreadable image is
    /// an error; the game has nothing to draw without them.
    pub fn load(resolver: &impl AssetResolver, kinds: &[FruitKind]) -> Result<Self> {
        let mut sprites = HashMap::new();
        for kind in kinds {
            for variant in [SpriteVariant::Whole, SpriteVariant::Sliced] {
                let path = resolver.resolve(kind.name(), variant);
                let image = image::open(&path)
                    .wrap_err_with(|| format!("failed to load sprite {}", path.display()))?
                    .to_rgba8();
                sprites.insert((*kind, variant), Sprite::Bitmap(image));
            }
        }
        info!(count = sprites.len(), "loaded sprite images");
        Ok(Self { sprites })
    }

    /// Text-art sprites for every kind, used when no image directory is given
    pub fn builtin() -> Self {
        let mut sprites = HashMap::new();
        for kind in FruitKind::ALL {
            for variant in [SpriteVariant::Whole, SpriteVariant::Sliced] {
                sprites.insert(
                    (kind, variant),
                    Sprite::Glyph {
                        lines: glyph_lines(kind, variant),
                        color: glyph_color(kind),
                    },
                );
            }
        }
        Self { sprites }
    }

    pub fn get(&self, kind: FruitKind, variant: SpriteVariant) -> Option<&Sprite> {
        self.sprites.get(&(kind, variant))
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

fn glyph_lines(kind: FruitKind, variant: SpriteVariant) -> Vec<&'static str> {
    match (kind, variant) {
        (FruitKind::Melon, SpriteVariant::Whole) => vec![" .--. ", "(####)", " `--' "],
        (FruitKind::Melon, SpriteVariant::Sliced) => vec![" .-/. ", "(##/#)", " `/-' "],
        (FruitKind::Orange, SpriteVariant::Whole) => vec!["  ,   ", " (oo) ", "  ``  "],
        (FruitKind::Orange, SpriteVariant::Sliced) => vec!["  , / ", " (o/o)", "  `/  "],
        (FruitKind::Pomegranate, SpriteVariant::Whole) => vec!["  w   ", " (::) ", "  ``  "],
        (FruitKind::Pomegranate, SpriteVariant::Sliced) => vec!["  w / ", " (:/:)", "  `/  "],
        (FruitKind::Guava, SpriteVariant::Whole) => vec!["  _   ", " (  ) ", " `--' "],
        (FruitKind::Guava, SpriteVariant::Sliced) => vec!["  _ / ", " ( / )", " `/-' "],
    }
}

fn glyph_color(kind: FruitKind) -> Color {
    match kind {
        FruitKind::Melon => Color::Green,
        FruitKind::Orange => Color::LightYellow,
        FruitKind::Pomegranate => Color::Red,
        FruitKind::Guava => Color::LightGreen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fruit-slice-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_resolver_naming_convention() {
        let resolver = ImageDirResolver::new("images");
        assert_eq!(
            resolver.resolve("melon", SpriteVariant::Whole),
            PathBuf::from("images/melon.png")
        );
        assert_eq!(
            resolver.resolve("melon", SpriteVariant::Sliced),
            PathBuf::from("images/half_melon.png")
        );
    }

    #[test]
    fn test_builtin_covers_every_kind_and_variant() {
        let catalog = SpriteCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        for kind in FruitKind::ALL {
            assert!(catalog.get(kind, SpriteVariant::Whole).is_some());
            assert!(catalog.get(kind, SpriteVariant::Sliced).is_some());
        }
    }

    #[test]
    fn test_load_fails_on_missing_image() {
        let dir = scratch_dir("missing");
        let resolver = ImageDirResolver::new(&dir);
        let err = SpriteCatalog::load(&resolver, &[FruitKind::Guava]).unwrap_err();
        assert!(format!("{err}").contains("guava.png"));
    }

    #[test]
    fn test_load_reads_png_pair() {
        let dir = scratch_dir("pair");
        let whole = RgbaImage::from_pixel(4, 4, image::Rgba([200, 40, 40, 255]));
        let half = RgbaImage::from_pixel(4, 2, image::Rgba([40, 200, 40, 255]));
        whole.save(dir.join("orange.png")).unwrap();
        half.save(dir.join("half_orange.png")).unwrap();

        let catalog = SpriteCatalog::load(&ImageDirResolver::new(&dir), &[FruitKind::Orange]).unwrap();

        assert_eq!(catalog.len(), 2);
        match catalog.get(FruitKind::Orange, SpriteVariant::Sliced) {
            Some(Sprite::Bitmap(image)) => assert_eq!(image.dimensions(), (4, 2)),
            other => panic!("expected bitmap, got {other:?}"),
        }
        assert!(catalog.get(FruitKind::Melon, SpriteVariant::Whole).is_none());
    }
}
