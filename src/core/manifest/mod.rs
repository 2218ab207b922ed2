//=========================================================================
// Sprite Manifests
//=========================================================================
//
// Declarative sprite placement: a JSON manifest maps frame names from a
// spritesheet document onto concrete `Sprite` values.
//
// Manifest entry semantics:
// - `position` places a single sprite absolutely
// - `points` + `loop` places `loop` copies at `i * address + diff` per axis
// - `zIndex` is either a fixed value or the name of a sprite field to
//   read after placement (e.g. depth-sort by `y`)
// - `isSceneProperty` captures the sprite into the metadata store's
//   write-once keyed values under the manifest key
//
// Spritesheet parsing beyond the document model is engine territory;
// this module only resolves frame regions.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::{BTreeMap, HashMap};

//=== External Crates =====================================================

use log::warn;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use super::error::ManifestError;
use super::metadata::MetadataStore;

//=== Spritesheet Document ================================================

/// Rectangular region of a spritesheet image.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FrameRegion {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// One named frame of a spritesheet document.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpriteFrame {
    pub frame: FrameRegion,
}

/// Sheet-level metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetMeta {
    pub image: String,
    pub size: SheetSize,
    pub format: String,
    pub scale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SheetSize {
    pub w: u32,
    pub h: u32,
}

/// A spritesheet document: frames, sheet metadata, optional animations.
#[derive(Debug, Clone, Deserialize)]
pub struct SpriteSheetDoc {
    pub frames: HashMap<String, SpriteFrame>,
    pub meta: SheetMeta,
    #[serde(default)]
    pub animations: Option<HashMap<String, Vec<String>>>,
}

//=== Manifest Model ======================================================

/// Per-axis placement rule for repeated entries: `i * address + diff`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AxisRule {
    pub address: f32,
    #[serde(default)]
    pub diff: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointRule {
    pub x: AxisRule,
    pub y: AxisRule,
}

/// Absolute placement for single entries.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Sprite field a z-index rule may read from after placement.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteField {
    X,
    Y,
    Width,
    Height,
}

/// Fixed z-index, or one derived from a sprite field.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum ZIndexRule {
    Fixed(i32),
    FromField(SpriteField),
}

/// One manifest entry: which frame to instantiate and where to place it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Frame name within the entry's spritesheet document.
    pub name: String,

    pub z_index: ZIndexRule,

    /// The spritesheet document this entry draws from.
    pub schema: SpriteSheetDoc,

    #[serde(default)]
    pub points: Option<PointRule>,

    #[serde(default)]
    pub position: Option<Position>,

    /// Number of copies to place; absent means a single sprite.
    #[serde(rename = "loop", default)]
    pub repeat: Option<u32>,

    /// Capture the sprite into the metadata store under the manifest key.
    #[serde(default)]
    pub is_scene_property: bool,
}

/// A scene's sprite manifest, keyed by logical sprite name.
///
/// `BTreeMap` keeps mapping deterministic across runs.
pub type SceneManifest = BTreeMap<String, ManifestEntry>;

/// Parses a manifest document from JSON.
pub fn manifest_from_json(document: &str) -> Result<SceneManifest, ManifestError> {
    Ok(serde_json::from_str(document)?)
}

//=== Sprite ==============================================================

/// A concrete sprite produced from a manifest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Frame name the texture region was resolved from.
    pub name: String,

    /// Region within the sheet image.
    pub texture: FrameRegion,

    pub x: f32,
    pub y: f32,
    pub z_index: i32,
    pub width: f32,
    pub height: f32,
}

//=== Mapping =============================================================

/// Maps every manifest entry onto sprites, in key order.
///
/// Entries flagged as scene properties are stored into `metadata` under
/// their manifest key; a repeated entry can only capture its first copy
/// (write-once), which is warned about.
pub fn build_sprites(
    manifest: &SceneManifest,
    metadata: &mut MetadataStore,
) -> Result<Vec<Sprite>, ManifestError> {
    let mut sprites = Vec::new();
    for (key, entry) in manifest {
        match entry.repeat {
            Some(count) => {
                for index in 0..count {
                    sprites.push(configure_sprite(key, entry, Some(index), metadata)?);
                }
            }
            None => sprites.push(configure_sprite(key, entry, None, metadata)?),
        }
    }
    Ok(sprites)
}

fn configure_sprite(
    key: &str,
    entry: &ManifestEntry,
    index: Option<u32>,
    metadata: &mut MetadataStore,
) -> Result<Sprite, ManifestError> {
    let region = entry
        .schema
        .frames
        .get(&entry.name)
        .ok_or_else(|| ManifestError::UnknownFrame {
            entry: key.to_owned(),
            frame: entry.name.clone(),
        })?
        .frame;

    let mut sprite = Sprite {
        name: entry.name.clone(),
        texture: region,
        x: 0.0,
        y: 0.0,
        z_index: 0,
        width: region.w,
        height: region.h,
    };

    if let Some(position) = entry.position {
        sprite.x = position.x;
        sprite.y = position.y;
    }
    if let (Some(points), Some(i)) = (entry.points, index) {
        sprite.x = i as f32 * points.x.address + points.x.diff;
        sprite.y = i as f32 * points.y.address + points.y.diff;
    }

    sprite.z_index = resolve_z_index(&sprite, entry.z_index);

    if entry.is_scene_property && !metadata.set_blocked(key, sprite.clone()) {
        warn!(target: "manifest", "scene property '{}' already captured", key);
    }

    Ok(sprite)
}

fn resolve_z_index(sprite: &Sprite, rule: ZIndexRule) -> i32 {
    match rule {
        ZIndexRule::Fixed(value) => value,
        ZIndexRule::FromField(field) => match field {
            SpriteField::X => sprite.x as i32,
            SpriteField::Y => sprite.y as i32,
            SpriteField::Width => sprite.width as i32,
            SpriteField::Height => sprite.height as i32,
        },
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(frames: &[(&str, f32, f32)]) -> SpriteSheetDoc {
        SpriteSheetDoc {
            frames: frames
                .iter()
                .map(|&(name, w, h)| {
                    (
                        name.to_owned(),
                        SpriteFrame { frame: FrameRegion { x: 0.0, y: 0.0, w, h } },
                    )
                })
                .collect(),
            meta: SheetMeta {
                image: "atlas.png".to_owned(),
                size: SheetSize { w: 256, h: 256 },
                format: "RGBA8888".to_owned(),
                scale: "1".to_owned(),
            },
            animations: None,
        }
    }

    fn entry(name: &str, schema: SpriteSheetDoc) -> ManifestEntry {
        ManifestEntry {
            name: name.to_owned(),
            z_index: ZIndexRule::Fixed(0),
            schema,
            points: None,
            position: None,
            repeat: None,
            is_scene_property: false,
        }
    }

    #[test]
    fn single_entry_places_at_its_position() {
        let mut manifest = SceneManifest::new();
        let mut hero = entry("hero", sheet(&[("hero", 32.0, 48.0)]));
        hero.position = Some(Position { x: 10.0, y: 20.0 });
        manifest.insert("hero".to_owned(), hero);

        let mut metadata = MetadataStore::new();
        let sprites = build_sprites(&manifest, &mut metadata).unwrap();

        assert_eq!(sprites.len(), 1);
        assert_eq!((sprites[0].x, sprites[0].y), (10.0, 20.0));
        assert_eq!((sprites[0].width, sprites[0].height), (32.0, 48.0));
    }

    #[test]
    fn repeated_entry_places_copies_along_the_rule() {
        let mut manifest = SceneManifest::new();
        let mut fence = entry("post", sheet(&[("post", 16.0, 16.0)]));
        fence.repeat = Some(3);
        fence.points = Some(PointRule {
            x: AxisRule { address: 16.0, diff: 4.0 },
            y: AxisRule { address: 0.0, diff: 100.0 },
        });
        manifest.insert("fence".to_owned(), fence);

        let mut metadata = MetadataStore::new();
        let sprites = build_sprites(&manifest, &mut metadata).unwrap();

        assert_eq!(sprites.len(), 3);
        assert_eq!(sprites[0].x, 4.0);
        assert_eq!(sprites[1].x, 20.0);
        assert_eq!(sprites[2].x, 36.0);
        assert!(sprites.iter().all(|sprite| sprite.y == 100.0));
    }

    #[test]
    fn z_index_resolves_from_a_sprite_field() {
        let mut manifest = SceneManifest::new();
        let mut hero = entry("hero", sheet(&[("hero", 32.0, 48.0)]));
        hero.position = Some(Position { x: 0.0, y: 77.0 });
        hero.z_index = ZIndexRule::FromField(SpriteField::Y);
        manifest.insert("hero".to_owned(), hero);

        let sprites = build_sprites(&manifest, &mut MetadataStore::new()).unwrap();
        assert_eq!(sprites[0].z_index, 77);
    }

    #[test]
    fn scene_property_entries_are_captured_once() {
        let mut manifest = SceneManifest::new();
        let mut hero = entry("hero", sheet(&[("hero", 32.0, 48.0)]));
        hero.is_scene_property = true;
        manifest.insert("hero".to_owned(), hero);

        let mut metadata = MetadataStore::new();
        build_sprites(&manifest, &mut metadata).unwrap();

        let captured = metadata.blocked::<Sprite>("hero").unwrap();
        assert_eq!(captured.name, "hero");
    }

    #[test]
    fn unknown_frame_is_an_error() {
        let mut manifest = SceneManifest::new();
        manifest.insert("hero".to_owned(), entry("ghost", sheet(&[("hero", 32.0, 48.0)])));

        let error = build_sprites(&manifest, &mut MetadataStore::new()).unwrap_err();
        assert!(matches!(
            error,
            ManifestError::UnknownFrame { frame, .. } if frame == "ghost"
        ));
    }

    #[test]
    fn manifest_parses_from_json() {
        let document = r#"{
            "hero": {
                "name": "hero",
                "zIndex": "y",
                "position": {"x": 8, "y": 16},
                "isSceneProperty": true,
                "schema": {
                    "frames": {
                        "hero": {"frame": {"x": 0, "y": 0, "w": 32, "h": 48}}
                    },
                    "meta": {
                        "image": "atlas.png",
                        "size": {"w": 256, "h": 256},
                        "format": "RGBA8888",
                        "scale": "1"
                    }
                }
            }
        }"#;

        let manifest = manifest_from_json(document).unwrap();
        let hero = &manifest["hero"];
        assert!(hero.is_scene_property);
        assert!(matches!(hero.z_index, ZIndexRule::FromField(SpriteField::Y)));
        assert_eq!(hero.schema.meta.size.w, 256);

        let sprites = build_sprites(&manifest, &mut MetadataStore::new()).unwrap();
        assert_eq!(sprites[0].z_index, 16);
    }
}
