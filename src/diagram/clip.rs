//! Clipping the diagram to a rectangle
//!
//! Every edge is clipped in parametric form with Liang-Barsky. Rays and lines
//! carry infinite parameter bounds, which the four box constraints cut down
//! to a finite interval.

use glam::DVec2;

use crate::config::BoundingBox;
use crate::error::{Result, VoronoiError};

use super::{Diagram, EdgeState, ParametricLine};

/// Slack for deciding whether a point lies on or inside the box
const BOX_TOLERANCE: f64 = 1e-7;

/// Parameter interval of `line` inside `bounds`, or `None` if it misses
fn clip_line(line: &ParametricLine, bounds: &BoundingBox) -> Option<(f64, f64)> {
    let ParametricLine {
        origin: o,
        direction: d,
        ..
    } = *line;

    if d == DVec2::ZERO {
        let t = line.t_min.max(0.0).min(line.t_max);
        return bounds.contains(o, 0.0).then_some((t, t));
    }

    let constraints = [
        (-d.x, o.x - bounds.min_x),
        (d.x, bounds.max_x - o.x),
        (-d.y, o.y - bounds.min_y),
        (d.y, bounds.max_y - o.y),
    ];

    let (mut t0, mut t1) = (line.t_min, line.t_max);
    for (p, q) in constraints {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

impl Diagram {
    /// Clip every edge to `bounds` and close the faces along the box
    ///
    /// Edges entirely outside the box become `Dropped`; every other edge ends
    /// up `Closed` with both endpoints inside the box. Points where an edge
    /// meets the box become corners of both faces the edge separates, and
    /// each box corner goes to the face whose site is nearest. Corners outside
    /// the box are discarded.
    ///
    /// # Errors
    ///
    /// `UnexpectedClipMiss` if an edge with a known endpoint inside the box is
    /// rejected, which can only come from an inconsistent diagram.
    pub fn bind_to_box(&mut self, bounds: BoundingBox) -> Result<()> {
        for face in &mut self.faces {
            face.retain_corners(|c| bounds.contains(*c, BOX_TOLERANCE));
        }

        let mut dropped = 0usize;
        for index in 0..self.edges.len() {
            let edge = &self.edges[index];
            let Some(line) = edge.parametric() else {
                continue;
            };

            let Some((t0, t1)) = clip_line(&line, &bounds) else {
                let anchored_inside = [edge.start(), edge.end()]
                    .into_iter()
                    .flatten()
                    .any(|p| bounds.contains(p, -BOX_TOLERANCE));
                if anchored_inside {
                    return Err(VoronoiError::UnexpectedClipMiss(index));
                }
                log::debug!("edge {} lies outside the box and is dropped", index);
                self.edges[index].state = EdgeState::Dropped;
                dropped += 1;
                continue;
            };

            let start = bounds.clamp(line.at(t0));
            let end = bounds.clamp(line.at(t1));
            let (left, right) = (edge.left, edge.right);

            let edge = &mut self.edges[index];
            edge.state = EdgeState::Closed { start, end };
            let mut new_corners = Vec::with_capacity(2);
            if t0 != line.t_min {
                edge.start_vertex = None;
                new_corners.push(start);
            }
            if t1 != line.t_max {
                edge.end_vertex = None;
                new_corners.push(end);
            }
            for corner in new_corners {
                self.faces[left].add_corner(corner);
                self.faces[right].add_corner(corner);
            }
        }

        for corner in bounds.corners() {
            let nearest = self
                .faces
                .iter()
                .min_by(|a, b| {
                    a.site()
                        .distance_squared(corner)
                        .total_cmp(&b.site().distance_squared(corner))
                })
                .map(|face| face.id);
            if let Some(id) = nearest {
                self.faces[id].add_corner(corner);
            }
        }

        log::debug!(
            "clipped {} edges to [{}, {}] x [{}, {}], {} dropped",
            self.edges.len(),
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y,
            dropped
        );
        self.bounds = Some(bounds);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap()
    }

    #[test]
    fn test_clip_line_ray() {
        let ray = ParametricLine {
            origin: DVec2::new(5.0, 5.0),
            direction: DVec2::new(1.0, 0.0),
            t_min: 0.0,
            t_max: f64::INFINITY,
        };
        assert_eq!(clip_line(&ray, &unit_box()), Some((0.0, 5.0)));
    }

    #[test]
    fn test_clip_line_full_line() {
        let line = ParametricLine {
            origin: DVec2::new(5.0, 20.0),
            direction: DVec2::new(0.0, -1.0),
            t_min: f64::NEG_INFINITY,
            t_max: f64::INFINITY,
        };
        assert_eq!(clip_line(&line, &unit_box()), Some((10.0, 20.0)));
    }

    #[test]
    fn test_clip_line_misses() {
        let ray = ParametricLine {
            origin: DVec2::new(15.0, 5.0),
            direction: DVec2::new(1.0, 0.0),
            t_min: 0.0,
            t_max: f64::INFINITY,
        };
        assert_eq!(clip_line(&ray, &unit_box()), None);

        let parallel_outside = ParametricLine {
            origin: DVec2::new(-1.0, 0.0),
            direction: DVec2::new(0.0, 1.0),
            t_min: f64::NEG_INFINITY,
            t_max: f64::INFINITY,
        };
        assert_eq!(clip_line(&parallel_outside, &unit_box()), None);
    }

    #[test]
    fn test_single_face_gets_box_corners() {
        let mut diagram = Diagram::new();
        diagram.add_face(DVec2::new(3.0, 3.0));
        diagram.bind_to_box(unit_box()).unwrap();

        let polygon = diagram.faces()[0].as_polygon();
        assert_eq!(polygon.len(), 4);
        assert!((diagram.faces()[0].area() - 100.0).abs() < 1e-9);
        assert_eq!(diagram.bounds(), Some(unit_box()));
    }

    #[test]
    fn test_bind_to_box_splits_square() {
        let mut diagram = Diagram::new();
        diagram.add_face(DVec2::new(2.0, 5.0));
        diagram.add_face(DVec2::new(8.0, 5.0));
        diagram.add_edge(
            0,
            1,
            EdgeState::Unbounded {
                anchor: DVec2::new(5.0, 5.0),
                direction: DVec2::new(0.0, -1.0),
            },
        );
        diagram.bind_to_box(unit_box()).unwrap();

        let edge = &diagram.edges()[0];
        let [start, end] = edge.segment().unwrap();
        assert_eq!(start, DVec2::new(5.0, 10.0));
        assert_eq!(end, DVec2::new(5.0, 0.0));

        for face in diagram.faces() {
            assert_eq!(face.corners().len(), 4);
            assert!((face.area() - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bind_to_box_drops_outside_edges() {
        let mut diagram = Diagram::new();
        diagram.add_face(DVec2::new(20.0, 20.0));
        diagram.add_face(DVec2::new(30.0, 20.0));
        diagram.add_edge(
            0,
            1,
            EdgeState::Closed {
                start: DVec2::new(25.0, 15.0),
                end: DVec2::new(25.0, 25.0),
            },
        );
        diagram.bind_to_box(unit_box()).unwrap();
        assert!(diagram.edges()[0].is_dropped());
        assert_eq!(diagram.live_edges().count(), 0);
    }

    #[test]
    fn test_bind_to_box_trims_closed_edge() {
        let mut diagram = Diagram::new();
        diagram.add_face(DVec2::new(5.0, 2.0));
        diagram.add_face(DVec2::new(5.0, 8.0));
        let vertex = diagram.add_vertex(DVec2::new(5.0, 5.0));
        let edge = diagram.add_edge(
            0,
            1,
            EdgeState::Open {
                start: DVec2::new(-5.0, 5.0),
                direction: DVec2::new(1.0, 0.0),
            },
        );
        diagram.close_edge(edge, vertex).unwrap();
        diagram.bind_to_box(unit_box()).unwrap();

        let clipped = diagram.edge(edge).unwrap();
        assert_eq!(clipped.segment(), Some([DVec2::new(0.0, 5.0), DVec2::new(5.0, 5.0)]));
        assert_eq!(clipped.end_vertex, Some(vertex));
        assert!(diagram.faces()[0].corners().contains(&DVec2::new(0.0, 5.0)));
    }
}
