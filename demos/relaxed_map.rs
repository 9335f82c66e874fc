//! Example: relaxed tessellation with terrain classes
//!
//! Generates seeded sites, smooths them with Lloyd relaxation and colors the
//! faces from a simple height function.

use std::collections::HashMap;

use fortune_voronoi::*;

fn main() -> Result<()> {
    println!("Relaxed Map Example");
    println!("===================\n");

    let config = DiagramConfigBuilder::new()
        .seed(42)
        .site_count(400)?
        .lloyd_iterations(5)?
        .build()?;

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Sites: {}", config.site_count);
    println!("  Lloyd Iterations: {}", config.lloyd_iterations);
    println!();

    let tessellation = VoronoiTessellation::generate(config)?;
    println!("Generated {} faces\n", tessellation.face_count());

    // A single island: high in the middle, falling off towards the border
    let center = tessellation.bounds().center();
    let reach = tessellation.bounds().width() * 0.5;
    let island = move |p: DVec2| 1.0 - p.distance(center) / reach;

    let attributes = tessellation.attributes(&island);
    let mut counts: HashMap<TerrainClass, usize> = HashMap::new();
    for attr in &attributes {
        *counts.entry(attr.terrain).or_insert(0) += 1;
    }

    let mapper = BasicColorMapper;
    println!("Terrain:");
    for terrain in [
        TerrainClass::DeepWater,
        TerrainClass::Sand,
        TerrainClass::Grass,
        TerrainClass::Snow,
    ] {
        let color = mapper.map_color(&terrain);
        println!(
            "  {:10} {:4} faces  rgb({:.2}, {:.2}, {:.2})",
            format!("{:?}", terrain),
            counts.get(&terrain).copied().unwrap_or(0),
            color[0],
            color[1],
            color[2]
        );
    }

    let total_neighbors: usize = tessellation.faces().iter().map(Face::neighbor_count).sum();
    println!(
        "\nAverage neighbors per face: {:.2}",
        total_neighbors as f64 / tessellation.face_count() as f64
    );

    let ring = tessellation.find_faces_within_hops(0, 2);
    println!("Faces within 2 hops of face 0: {}", ring.len());
    Ok(())
}
