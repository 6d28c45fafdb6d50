//! City tilemap resource.
//!
//! Loads the subset of the Tiled JSON format the city map uses: orthogonal
//! tile layers with uncompressed `data` arrays and embedded tilesets. The
//! [`CityMap`] resource exposes the pixel size of the map (world bounds,
//! camera zoom, spawn ranges) and per-tile source rectangles for rendering.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::warn;
use raylib::prelude::Rectangle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the tileset the city map must embed.
pub const CITY_TILESET: &str = "city-tileset";

/// Layers drawn by the renderer, bottom to top.
pub const CITY_LAYERS: [&str; 3] = ["colisao", "chao", "predios"];

/// Tile flip flags stored in the upper bits of a gid.
const GID_FLAGS_MASK: u32 = 0xF000_0000;

#[derive(Debug, Error)]
pub enum CityMapError {
    #[error("failed to read map {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse map {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("tileset \"{0}\" not found in map")]
    MissingTileset(String),
    #[error("invalid map dimensions {width}x{height} tiles of {tile_width}x{tile_height} px")]
    InvalidDimensions {
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    },
}

/// One layer as stored in the Tiled file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TiledLayer {
    pub name: String,
    #[serde(rename = "type", default = "default_layer_type")]
    pub kind: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// Global tile ids, row-major. 0 means empty.
    #[serde(default)]
    pub data: Vec<u32>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

/// An embedded tileset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TiledTileset {
    pub firstgid: u32,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(default)]
    pub margin: u32,
    #[serde(default)]
    pub spacing: u32,
    #[serde(default)]
    pub columns: u32,
    #[serde(default)]
    pub tilecount: u32,
    #[serde(default)]
    pub imagewidth: u32,
    #[serde(default)]
    pub imageheight: u32,
}

impl TiledTileset {
    /// Whether `gid` belongs to this tileset.
    pub fn contains(&self, gid: u32) -> bool {
        let gid = gid & !GID_FLAGS_MASK;
        gid >= self.firstgid && (self.tilecount == 0 || gid - self.firstgid < self.tilecount)
    }

    /// Source rectangle of `gid` inside the tileset image.
    ///
    /// Returns `None` for empty cells, foreign gids or a tileset without columns.
    pub fn source_rect(&self, gid: u32) -> Option<Rectangle> {
        let gid = gid & !GID_FLAGS_MASK;
        if gid == 0 || self.columns == 0 || !self.contains(gid) {
            return None;
        }
        let local = gid - self.firstgid;
        let col = local % self.columns;
        let row = local / self.columns;
        let step_x = self.tilewidth.checked_add(self.spacing)?;
        let step_y = self.tileheight.checked_add(self.spacing)?;
        let x = col.checked_mul(step_x)?.checked_add(self.margin)?;
        let y = row.checked_mul(step_y)?.checked_add(self.margin)?;
        Some(Rectangle {
            x: x as f32,
            y: y as f32,
            width: self.tilewidth as f32,
            height: self.tileheight as f32,
        })
    }
}

/// Top-level Tiled document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TiledMap {
    pub width: u32,
    pub height: u32,
    pub tilewidth: u32,
    pub tileheight: u32,
    #[serde(default)]
    pub layers: Vec<TiledLayer>,
    #[serde(default)]
    pub tilesets: Vec<TiledTileset>,
}

fn default_layer_type() -> String {
    "tilelayer".to_string()
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

/// The loaded city map.
#[derive(Resource, Debug, Clone)]
pub struct CityMap {
    pub map: TiledMap,
    /// Path the map was loaded from; the tileset image is resolved against it.
    pub path: PathBuf,
    tileset_index: usize,
}

impl CityMap {
    /// Read and validate a map file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CityMapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CityMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Parse and validate map JSON. `path` is only used for messages and
    /// resolving the tileset image.
    pub fn from_json(text: &str, path: impl AsRef<Path>) -> Result<Self, CityMapError> {
        let path = path.as_ref().to_path_buf();
        let map: TiledMap = serde_json::from_str(text).map_err(|source| CityMapError::Parse {
            path: path.clone(),
            source,
        })?;

        let width_px = map.width.checked_mul(map.tilewidth).filter(|&w| w > 0);
        let height_px = map.height.checked_mul(map.tileheight).filter(|&h| h > 0);
        if width_px.is_none() || height_px.is_none() {
            return Err(CityMapError::InvalidDimensions {
                width: map.width,
                height: map.height,
                tile_width: map.tilewidth,
                tile_height: map.tileheight,
            });
        }

        let tileset_index = map
            .tilesets
            .iter()
            .position(|t| t.name == CITY_TILESET)
            .ok_or_else(|| CityMapError::MissingTileset(CITY_TILESET.to_string()))?;

        Ok(Self {
            map,
            path,
            tileset_index,
        })
    }

    /// Map width in pixels.
    pub fn width_px(&self) -> f32 {
        (self.map.width * self.map.tilewidth) as f32
    }

    /// Map height in pixels.
    pub fn height_px(&self) -> f32 {
        (self.map.height * self.map.tileheight) as f32
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width_px() / 2.0, self.height_px() / 2.0)
    }

    pub fn tileset(&self) -> &TiledTileset {
        &self.map.tilesets[self.tileset_index]
    }

    /// Path of the tileset image, relative to the map file.
    pub fn tileset_image_path(&self) -> PathBuf {
        let image = &self.tileset().image;
        match self.path.parent() {
            Some(dir) => dir.join(image),
            None => PathBuf::from(image),
        }
    }

    pub fn layer(&self, name: &str) -> Option<&TiledLayer> {
        self.map
            .layers
            .iter()
            .find(|l| l.name == name && l.kind == "tilelayer")
    }

    /// The city layers present in the map, in draw order.
    pub fn draw_layers(&self) -> impl Iterator<Item = &TiledLayer> {
        CITY_LAYERS.iter().filter_map(|name| self.layer(name))
    }

    /// Log a warning for every expected layer the map lacks.
    /// Returns how many are present.
    pub fn warn_missing_layers(&self) -> usize {
        let mut present = 0;
        for name in CITY_LAYERS {
            if self.layer(name).is_some() {
                present += 1;
            } else {
                warn!("Map layer '{}' not found, skipping", name);
            }
        }
        present
    }

    /// Visit every non-empty tile of `layer` as (destination, source) rectangles.
    pub fn for_each_tile(&self, layer: &TiledLayer, mut f: impl FnMut(Rectangle, Rectangle)) {
        let tileset = self.tileset();
        let columns = if layer.width > 0 {
            layer.width
        } else {
            self.map.width
        };
        let tw = self.map.tilewidth as f32;
        let th = self.map.tileheight as f32;
        for (i, &gid) in layer.data.iter().enumerate() {
            let Some(src) = tileset.source_rect(gid) else {
                continue;
            };
            let i = i as u32;
            let dest = Rectangle {
                x: (i % columns) as f32 * tw,
                y: (i / columns) as f32 * th,
                width: tw,
                height: th,
            };
            f(dest, src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = r#"{
        "width": 4, "height": 2, "tilewidth": 8, "tileheight": 8,
        "layers": [
            {"name": "chao", "type": "tilelayer", "width": 4, "height": 2,
             "data": [1, 2, 0, 0, 0, 0, 5, 1]},
            {"name": "objects", "type": "objectgroup"}
        ],
        "tilesets": [
            {"firstgid": 1, "name": "city-tileset", "image": "tilemap.png",
             "tilewidth": 8, "tileheight": 8, "margin": 0, "spacing": 1,
             "columns": 4, "tilecount": 16}
        ]
    }"#;

    #[test]
    fn test_dimensions_in_pixels() {
        let map = CityMap::from_json(SMALL_MAP, "assets/maps/city.json").unwrap();
        assert_eq!(map.width_px(), 32.0);
        assert_eq!(map.height_px(), 16.0);
        assert_eq!(map.center(), (16.0, 8.0));
        assert_eq!(
            map.tileset_image_path(),
            PathBuf::from("assets/maps/tilemap.png")
        );
    }

    #[test]
    fn test_source_rect_accounts_for_spacing() {
        let map = CityMap::from_json(SMALL_MAP, "city.json").unwrap();
        let ts = map.tileset();
        assert!(ts.source_rect(0).is_none());
        let first = ts.source_rect(1).unwrap();
        assert_eq!((first.x, first.y), (0.0, 0.0));
        let second = ts.source_rect(2).unwrap();
        assert_eq!((second.x, second.y), (9.0, 0.0));
        // gid 5 is the first tile of the second row
        let fifth = ts.source_rect(5).unwrap();
        assert_eq!((fifth.x, fifth.y), (0.0, 9.0));
        assert!(ts.source_rect(17).is_none());
    }

    #[test]
    fn test_for_each_tile_skips_empty_cells() {
        let map = CityMap::from_json(SMALL_MAP, "city.json").unwrap();
        let layer = map.layer("chao").unwrap();
        let mut dests = Vec::new();
        map.for_each_tile(layer, |dest, _| dests.push((dest.x, dest.y)));
        assert_eq!(dests, vec![(0.0, 0.0), (8.0, 0.0), (16.0, 8.0), (24.0, 8.0)]);
    }

    #[test]
    fn test_missing_layers_are_skipped() {
        let map = CityMap::from_json(SMALL_MAP, "city.json").unwrap();
        assert!(map.layer("objects").is_none());
        let names: Vec<&str> = map.draw_layers().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["chao"]);
        assert_eq!(map.warn_missing_layers(), 1);
    }

    #[test]
    fn test_missing_tileset_is_an_error() {
        let json = SMALL_MAP.replace("city-tileset", "other");
        let err = CityMap::from_json(&json, "city.json").unwrap_err();
        assert!(matches!(err, CityMapError::MissingTileset(name) if name == "city-tileset"));
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let json = SMALL_MAP.replace("\"width\": 4, \"height\": 2, \"tilewidth\": 8", "\"width\": 0, \"height\": 2, \"tilewidth\": 8");
        let err = CityMap::from_json(&json, "city.json").unwrap_err();
        assert!(matches!(err, CityMapError::InvalidDimensions { width: 0, .. }));
    }

    #[test]
    fn test_overflowing_dimensions_are_rejected() {
        let json = SMALL_MAP.replacen("\"width\": 4", "\"width\": 4294967295", 1);
        let err = CityMap::from_json(&json, "city.json").unwrap_err();
        assert!(matches!(
            err,
            CityMapError::InvalidDimensions {
                width: u32::MAX,
                tile_width: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_huge_tileset_values_do_not_overflow() {
        let json = SMALL_MAP
            .replace("\"tilecount\": 16", "\"tilecount\": 4294967295")
            .replace("\"margin\": 0", "\"margin\": 4294967295");
        let map = CityMap::from_json(&json, "city.json").unwrap();
        let ts = map.tileset();
        assert!(ts.contains(1));
        assert!(ts.contains(0x0FFF_FFFF));
        assert_eq!(ts.source_rect(1).unwrap().x, u32::MAX as f32);
        // Any tile past the first column lands beyond u32 range.
        assert!(ts.source_rect(2).is_none());
    }

    #[test]
    fn test_bad_json_and_missing_file() {
        assert!(matches!(
            CityMap::from_json("{ not json", "city.json"),
            Err(CityMapError::Parse { .. })
        ));
        assert!(matches!(
            CityMap::load_from_file("no/such/map.json"),
            Err(CityMapError::Io { .. })
        ));
    }
}
