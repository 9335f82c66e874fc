//! Example: Voronoi diagram of a handful of sites
//!
//! Runs the sweep, clips the result to a box and prints the faces.

use fortune_voronoi::*;

fn main() -> Result<()> {
    println!("Fortune Voronoi Example");
    println!("=======================\n");

    let sites = [
        DVec2::new(120.0, 80.0),
        DVec2::new(400.0, 350.0),
        DVec2::new(600.0, 90.0),
        DVec2::new(250.0, 560.0),
        DVec2::new(520.0, 610.0),
        DVec2::new(90.0, 380.0),
    ];

    let mut processor = FortuneProcessor::with_sites(sites)?;
    processor.compute()?;

    let diagram = processor.diagram();
    println!("Sweep finished:");
    println!("  Vertices: {}", diagram.vertices().len());
    println!("  Edges: {}", diagram.edges().len());
    for vertex in diagram.vertices() {
        println!(
            "  Vertex ({:.2}, {:.2}) with {} edges",
            vertex.position.x,
            vertex.position.y,
            vertex.incident_edges.len()
        );
    }
    println!();

    let bounds = BoundingBox::default();
    processor.bind_to_box(bounds)?;
    processor.link_faces()?;

    let diagram = processor.diagram();
    let dropped = diagram.edges().iter().filter(|e| e.is_dropped()).count();
    println!("Clipped to {}x{} ({} edges dropped)", bounds.width(), bounds.height(), dropped);
    println!();

    for face in diagram.faces() {
        let site = face.site();
        println!(
            "  Face {}: site=({:.0}, {:.0}), corners={}, area={:.1}, neighbors={:?}",
            face.id,
            site.x,
            site.y,
            face.as_polygon().len(),
            face.area(),
            face.neighbors
        );
    }

    let total: f64 = diagram.faces().iter().map(Face::area).sum();
    println!("\nTotal area {:.1} of {:.1}", total, bounds.width() * bounds.height());
    Ok(())
}
