//! Loader for Tiled JSON map exports.
//!
//! Reads the `platforms` object layer into typed surfaces, the `slopes`
//! layer into line segments, and the first image layer into the background.

use std::path::Path;

use serde::Deserialize;

use crate::error::{GameError, GameResult};
use crate::geometry::{Point, Slope, Surface, SurfaceType};
use crate::world::{Background, World};

pub const PLATFORM_LAYER: &str = "platforms";
pub const SLOPE_LAYER: &str = "slopes";

#[derive(Debug, Deserialize)]
struct TiledMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    layers: Vec<TiledLayer>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TiledLayer {
    #[serde(rename = "imagelayer")]
    Image {
        #[serde(default)]
        name: String,
        #[serde(default)]
        image: String,
    },
    #[serde(rename = "objectgroup")]
    Objects {
        #[serde(default)]
        name: String,
        #[serde(default)]
        objects: Vec<TiledObject>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct TiledObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    properties: Vec<TiledProperty>,
    #[serde(default)]
    polyline: Vec<TiledPoint>,
}

#[derive(Debug, Deserialize)]
struct TiledProperty {
    name: String,
    #[serde(default)]
    value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct TiledPoint {
    x: f32,
    y: f32,
}

impl TiledObject {
    /// Custom "type" property first, then the built-in type/class fields.
    fn surface_tag(&self) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == "type")
            .and_then(|p| p.value.as_str())
            .or_else(|| (!self.kind.is_empty()).then_some(self.kind.as_str()))
            .or_else(|| (!self.class.is_empty()).then_some(self.class.as_str()))
    }
}

/// Reads a map file. Image paths inside it resolve against the file's directory.
pub fn load_map(path: &Path) -> GameResult<World> {
    let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let world = parse_map(&text, base_dir)?;

    log::info!(
        "loaded {}: {} surfaces, {} slopes, {}x{} px",
        path.display(),
        world.surfaces.len(),
        world.slopes.len(),
        world.width,
        world.height
    );
    Ok(world)
}

pub fn parse_map(json: &str, base_dir: &Path) -> GameResult<World> {
    let map: TiledMap = serde_json::from_str(json)?;

    let mut surfaces = Vec::new();
    let mut slopes = Vec::new();
    let mut background = None;

    for layer in &map.layers {
        match layer {
            TiledLayer::Image { name, image } => {
                if background.is_some() || image.is_empty() {
                    log::debug!("ignoring image layer {name:?}");
                    continue;
                }
                background = Some(load_background(&base_dir.join(image))?);
            }
            TiledLayer::Objects { name, objects } if name == PLATFORM_LAYER => {
                surfaces.extend(objects.iter().filter_map(to_surface));
            }
            TiledLayer::Objects { name, objects } if name == SLOPE_LAYER => {
                slopes.extend(objects.iter().filter_map(to_slope));
            }
            TiledLayer::Objects { name, .. } => {
                log::debug!("ignoring object layer {name:?}");
            }
            TiledLayer::Other => {}
        }
    }

    Ok(World {
        surfaces,
        slopes,
        background,
        // widen before multiplying, tile counts times tile size can exceed u32
        width: map.width as f32 * map.tilewidth as f32,
        height: map.height as f32 * map.tileheight as f32,
    })
}

fn to_surface(obj: &TiledObject) -> Option<Surface> {
    let Some(tag) = obj.surface_tag() else {
        log::warn!("platform {} has no type tag, skipped", obj.id);
        return None;
    };
    match tag.parse::<SurfaceType>() {
        Ok(kind) => Some(Surface::new(obj.x, obj.y, obj.width, obj.height, kind)),
        Err(e) => {
            log::warn!("platform {}: {e}, skipped", obj.id);
            None
        }
    }
}

fn to_slope(obj: &TiledObject) -> Option<Slope> {
    let [a, b, ..] = obj.polyline.as_slice() else {
        log::warn!("slope {} needs a polyline of two points, skipped", obj.id);
        return None;
    };
    // polyline points are relative to the object origin
    let start = Point::new(obj.x + a.x, obj.y + a.y);
    let end = Point::new(obj.x + b.x, obj.y + b.y);
    Some(Slope::new(start, end, None))
}

fn load_background(path: &Path) -> GameResult<Background> {
    let img = image::open(path)
        .map_err(|source| GameError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let (width, height) = img.dimensions();
    let pixels = img
        .pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | (p[2] as u32))
        .collect();

    Ok(Background {
        width: width as usize,
        height: height as usize,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Gradient, Rect};

    const SAMPLE: &str = r#"{
        "width": 40, "height": 60, "tilewidth": 30, "tileheight": 30,
        "layers": [
            { "type": "tilelayer", "name": "tiles", "data": [] },
            { "type": "objectgroup", "name": "platforms", "objects": [
                { "id": 1, "x": 0, "y": 1750, "width": 1200, "height": 50,
                  "properties": [ { "name": "type", "type": "string", "value": "f" } ] },
                { "id": 2, "x": 0, "y": 0, "width": 20, "height": 1800, "type": "r" },
                { "id": 3, "x": 1180, "y": 0, "width": 20, "height": 1800, "class": "l" },
                { "id": 4, "x": 400, "y": 900, "width": 100, "height": 10, "type": "q" },
                { "id": 5, "x": 400, "y": 700, "width": 100, "height": 10 }
            ] },
            { "type": "objectgroup", "name": "slopes", "objects": [
                { "id": 6, "x": 100, "y": 500,
                  "polyline": [ { "x": 0, "y": 0 }, { "x": 50, "y": -50 } ] },
                { "id": 7, "x": 10, "y": 10, "polyline": [ { "x": 0, "y": 0 } ] }
            ] }
        ]
    }"#;

    #[test]
    fn parses_platforms_and_slopes() {
        let world = parse_map(SAMPLE, Path::new(".")).unwrap();
        assert_eq!(world.width, 1200.0);
        assert_eq!(world.height, 1800.0);
        assert!(world.background.is_none());

        let kinds: Vec<_> = world.surfaces.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [SurfaceType::Floor, SurfaceType::RightWall, SurfaceType::LeftWall]
        );
        assert_eq!(world.surfaces[0].rect, Rect::new(0.0, 1750.0, 1200.0, 50.0));

        assert_eq!(world.slopes.len(), 1);
        let slope = &world.slopes[0];
        assert_eq!(slope.start, Point::new(100.0, 500.0));
        assert_eq!(slope.end, Point::new(150.0, 450.0));
        assert_eq!(slope.gradient, Gradient::Finite(1.0));
        assert_eq!(slope.kind, None);
    }

    #[test]
    fn property_tag_overrides_type_field() {
        let json = r#"{ "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
            "layers": [ { "type": "objectgroup", "name": "platforms", "objects": [
                { "x": 0, "y": 0, "width": 8, "height": 8, "type": "f",
                  "properties": [ { "name": "type", "value": "c" } ] } ] } ] }"#;
        let world = parse_map(json, Path::new(".")).unwrap();
        assert_eq!(world.surfaces[0].kind, SurfaceType::Ceiling);
    }

    #[test]
    fn huge_dimensions_do_not_overflow() {
        let json = r#"{ "width": 4000000000, "height": 3, "tilewidth": 2, "tileheight": 4000000000,
            "layers": [] }"#;
        let world = parse_map(json, Path::new(".")).unwrap();
        assert_eq!(world.width, 8.0e9);
        assert_eq!(world.height, 1.2e10);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_map("{ \"width\": 3 ", Path::new(".")).err().unwrap();
        assert!(matches!(err, GameError::MapFormat(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_map(&dir.path().join("nope.tmj")).err().unwrap();
        assert!(matches!(err, GameError::Io { .. }));
    }

    #[test]
    fn loads_background_relative_to_map() {
        let dir = tempfile::tempdir().unwrap();
        let mut img = image::RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 128, 255]));
        img.save(dir.path().join("bg.png")).unwrap();

        let json = r#"{ "width": 1, "height": 1, "tilewidth": 2, "tileheight": 1,
            "layers": [ { "type": "imagelayer", "name": "bg", "image": "bg.png" } ] }"#;
        let map_path = dir.path().join("map.tmj");
        std::fs::write(&map_path, json).unwrap();

        let world = load_map(&map_path).unwrap();
        let bg = world.background.unwrap();
        assert_eq!((bg.width, bg.height), (2, 1));
        assert_eq!(bg.pixels, vec![0x00FF0000, 0x000080FF]);
    }

    #[test]
    fn broken_background_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bg.png"), b"not a png").unwrap();
        let json = r#"{ "width": 1, "height": 1, "tilewidth": 1, "tileheight": 1,
            "layers": [ { "type": "imagelayer", "image": "bg.png" } ] }"#;
        let err = parse_map(json, dir.path()).err().unwrap();
        assert!(matches!(err, GameError::Image { .. }));
    }
}
