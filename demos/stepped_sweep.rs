//! Example: step through the sweep one event at a time
//!
//! Prints what each event does and the partial edges traced so far, the way
//! an animation would draw them between frames.

use fortune_voronoi::*;

fn main() -> Result<()> {
    println!("Stepped Sweep Example\n");

    let bounds = BoundingBox::default();
    let sites = random_sites(12, &bounds, 7);
    let mut processor = FortuneProcessor::with_sites(sites)?;

    let mut step = 0;
    while let Some(event) = processor.step()? {
        step += 1;
        let sweep_y = processor.sweep_y();
        match event.kind {
            EventKind::Site(site) => {
                println!("{:>3}: site {} at y={:.2}", step, site, sweep_y);
            }
            EventKind::Circle { center, .. } => {
                println!(
                    "{:>3}: circle at y={:.2}, vertex ({:.2}, {:.2})",
                    step, sweep_y, center.x, center.y
                );
            }
        }

        // Draw slightly below the event so fresh arcs have some width
        let edges = processor.edges_at(sweep_y - 1.0);
        let beach = processor.beach_line_points(bounds.max_x, sweep_y - 1.0);
        println!(
            "     {} arcs, {} partial edges, {} beach points, {} events pending",
            processor.beach_line().len(),
            edges.len(),
            beach.len(),
            processor.pending_events()
        );
    }

    processor.bind_to_box(bounds)?;
    println!(
        "\nDone: {} vertices, {} edges",
        processor.diagram().vertices().len(),
        processor.diagram().edges().len()
    );
    Ok(())
}
