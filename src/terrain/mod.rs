//! Height sampling and terrain classification of faces
//!
//! The diagram itself carries no attributes. Callers that want a map-like
//! rendering sample a height field once per face, at its site, and classify
//! the result.

pub mod colors;

pub use colors::{BasicColorMapper, ColorMapper, CustomColorMapper, TerrainColor};

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::diagram::{Diagram, FaceId};
use crate::error::{Result, VoronoiError};

/// Height thresholds separating the terrain classes
pub const DEEP_WATER_LIMIT: f64 = 0.1;
pub const SAND_LIMIT: f64 = 0.5;
pub const GRASS_LIMIT: f64 = 0.8;

/// Terrain class of a face, derived from its height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerrainClass {
    /// Height below 0.1
    #[default]
    DeepWater,
    /// Sand and rock, below 0.5
    Sand,
    /// Below 0.8
    Grass,
    Snow,
}

impl TerrainClass {
    pub fn from_height(height: f64) -> Self {
        if height < DEEP_WATER_LIMIT {
            TerrainClass::DeepWater
        } else if height < SAND_LIMIT {
            TerrainClass::Sand
        } else if height < GRASS_LIMIT {
            TerrainClass::Grass
        } else {
            TerrainClass::Snow
        }
    }

    pub fn is_water(&self) -> bool {
        matches!(self, TerrainClass::DeepWater)
    }

    pub fn is_land(&self) -> bool {
        !self.is_water()
    }
}

/// Anything that yields a height for a point of the plane
pub trait HeightSampler {
    fn sample(&self, position: DVec2) -> f64;
}

impl<F> HeightSampler for F
where
    F: Fn(DVec2) -> f64,
{
    fn sample(&self, position: DVec2) -> f64 {
        self(position)
    }
}

/// Height field stored as a row-major grid of unit cells starting at the origin
///
/// Points outside the grid read the nearest border cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridHeightSampler {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl GridHeightSampler {
    /// Wrap `values` as a `width` x `height` grid, row by row
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the grid is empty or `values` has the wrong length.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "height grid must not be empty, got {}x{}",
                width, height
            )));
        }
        if values.len() != width * height {
            return Err(VoronoiError::InvalidConfig(format!(
                "height grid of {}x{} needs {} values, got {}",
                width,
                height,
                width * height,
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Build a grid by evaluating `f(x, y)` at every cell
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f64) -> Result<Self> {
        let values = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::new(width, height, values)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value of the cell at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.width && y < self.height).then(|| self.values[y * self.width + x])
    }
}

impl HeightSampler for GridHeightSampler {
    fn sample(&self, position: DVec2) -> f64 {
        let cell = |v: f64, len: usize| {
            if v.is_nan() || v < 0.0 {
                0
            } else {
                (v.floor() as usize).min(len - 1)
            }
        };
        let x = cell(position.x, self.width);
        let y = cell(position.y, self.height);
        self.values[y * self.width + x]
    }
}

/// Height and class of one face
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceAttributes {
    pub face: FaceId,
    pub height: f64,
    pub terrain: TerrainClass,
}

/// Sample `sampler` at every face site and classify the result
///
/// Returns one entry per face, in face order.
pub fn assign_attributes<S: HeightSampler + ?Sized>(diagram: &Diagram, sampler: &S) -> Vec<FaceAttributes> {
    diagram
        .faces()
        .iter()
        .map(|face| {
            let height = sampler.sample(face.site());
            FaceAttributes {
                face: face.id,
                height,
                terrain: TerrainClass::from_height(height),
            }
        })
        .collect()
}
