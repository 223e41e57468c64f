//! Terrain layout loader.
//!
//! Maps are written as rows of glyphs: `.` floor, `#` wall, `~` water. The
//! character at column `c` of row `r` is cell `(c, r)`; the board width is the
//! longest row and short rows are padded with walls.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::{
    HexCoord, HexLayout, MapDimensions, TerrainKind, TerrainMap, TerrainTile,
};

use crate::loaders::{LoadResult, read_file};

/// Raw map file contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub rows: Vec<String>,
    /// Pixel geometry; defaults to the standard layout.
    #[serde(default)]
    pub layout: Option<HexLayout>,
}

impl MapSpec {
    pub fn into_map(self) -> LoadResult<TerrainMap> {
        let height = self.rows.len();
        let width = self
            .rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            anyhow::bail!("Map has no cells");
        }

        let mut tiles = HashMap::with_capacity(width * height);
        for (row, line) in self.rows.iter().enumerate() {
            let mut glyphs = line.chars();
            for col in 0..width {
                let kind = match glyphs.next() {
                    Some(glyph) => TerrainKind::from_glyph(glyph).ok_or_else(|| {
                        anyhow::anyhow!(
                            "Unknown terrain glyph '{}' at row {}, column {}",
                            glyph,
                            row,
                            col
                        )
                    })?,
                    None => TerrainKind::Wall,
                };
                tiles.insert(HexCoord::new(col as i32, row as i32), TerrainTile::new(kind));
            }
        }

        let map = TerrainMap::new(MapDimensions::new(width as u32, height as u32), tiles);
        Ok(match self.layout {
            Some(layout) => map.with_layout(layout),
            None => map,
        })
    }
}

/// Loader for terrain layouts from RON files.
pub struct TerrainLoader;

impl TerrainLoader {
    /// Load a terrain map from a RON file.
    pub fn load(path: &Path) -> LoadResult<TerrainMap> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<TerrainMap> {
        let spec: MapSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;
        spec.into_map()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use skirmish_core::TerrainOracle;

    use super::*;

    #[test]
    fn glyph_rows_become_terrain() {
        let map = TerrainLoader::parse(r#"(rows: ["..#", "~.", "..."])"#).unwrap();

        assert_eq!(map.dimensions(), MapDimensions::new(3, 3));
        assert!(map.is_walkable(HexCoord::new(0, 0)));
        assert!(!map.is_walkable(HexCoord::new(2, 0)));
        assert_eq!(
            map.tile(HexCoord::new(0, 1)).map(TerrainTile::terrain),
            Some(TerrainKind::Water)
        );
        // padded
        assert_eq!(
            map.tile(HexCoord::new(2, 1)).map(TerrainTile::terrain),
            Some(TerrainKind::Wall)
        );
        assert!(!map.is_walkable(HexCoord::new(0, 3)));
        assert_eq!(map.layout(), HexLayout::default());
    }

    #[test]
    fn custom_layout_overrides_geometry() {
        let map = TerrainLoader::parse(
            r#"(rows: ["."], layout: Some((tile_width: 40.0, tile_height: 40.0)))"#,
        )
        .unwrap();
        assert_eq!(map.layout(), HexLayout::new(40.0, 40.0));
    }

    #[test]
    fn reports_unknown_glyphs_with_position() {
        let err = TerrainLoader::parse(r#"(rows: ["...", ".x."])"#).unwrap_err();
        assert!(err.to_string().contains("'x' at row 1, column 1"));
        assert!(TerrainLoader::parse(r#"(rows: [])"#).is_err());
    }

    #[test]
    fn load_includes_the_path_in_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(rows: [\"?\"])").unwrap();
        let err = TerrainLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));

        assert!(TerrainLoader::load(Path::new("/nonexistent/map.ron")).is_err());
    }
}
