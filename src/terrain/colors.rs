//! Color mapping for terrain classes

use super::TerrainClass;

/// RGBA color type
pub type TerrainColor = [f32; 4];

/// Trait for mapping terrain types to colors
pub trait ColorMapper<T> {
    /// Map a terrain type to an RGBA color
    fn map_color(&self, terrain: &T) -> TerrainColor;
}

const DEEP_WATER: TerrainColor = [0.0, 0.0, 0.8, 1.0]; // #0000cc
const SAND: TerrainColor = [0.6, 0.4, 0.2, 1.0]; // #996633
const GRASS: TerrainColor = [0.2, 0.6, 0.2, 1.0]; // #339933
const SNOW: TerrainColor = [1.0, 1.0, 1.0, 1.0];

/// Default color mapper for `TerrainClass`
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicColorMapper;

impl ColorMapper<TerrainClass> for BasicColorMapper {
    fn map_color(&self, terrain: &TerrainClass) -> TerrainColor {
        match terrain {
            TerrainClass::DeepWater => DEEP_WATER,
            TerrainClass::Sand => SAND,
            TerrainClass::Grass => GRASS,
            TerrainClass::Snow => SNOW,
        }
    }
}

/// Color mapper with one configurable color per terrain class
#[derive(Debug, Clone, PartialEq)]
pub struct CustomColorMapper {
    pub deep_water: TerrainColor,
    pub sand: TerrainColor,
    pub grass: TerrainColor,
    pub snow: TerrainColor,
}

impl Default for CustomColorMapper {
    fn default() -> Self {
        Self {
            deep_water: DEEP_WATER,
            sand: SAND,
            grass: GRASS,
            snow: SNOW,
        }
    }
}

impl ColorMapper<TerrainClass> for CustomColorMapper {
    fn map_color(&self, terrain: &TerrainClass) -> TerrainColor {
        match terrain {
            TerrainClass::DeepWater => self.deep_water,
            TerrainClass::Sand => self.sand,
            TerrainClass::Grass => self.grass,
            TerrainClass::Snow => self.snow,
        }
    }
}
