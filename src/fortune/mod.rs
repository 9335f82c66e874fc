//! Fortune's sweep-line algorithm
//!
//! The processor owns the event queue, the beach line and the diagram being
//! built. It can run to completion in one call or advance one event at a time,
//! with the intermediate beach line observable between steps.

pub mod beach_line;
pub mod event;

pub use beach_line::{Arc, ArcId, BeachLine};
pub use event::{Event, EventId, EventKind, EventQueue, EventState};

use glam::DVec2;
use std::collections::HashMap;

use crate::config::BoundingBox;
use crate::diagram::{Diagram, EdgeState, SiteId};
use crate::error::{Result, VoronoiError};
use crate::geometry::{bisector_direction, circumcircle, orientation, Orientation, EPSILON};

/// Drives the sweep over one site set
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::{BoundingBox, DVec2, FortuneProcessor};
///
/// let mut processor = FortuneProcessor::new();
/// processor.add_site(DVec2::new(100.0, 300.0)).unwrap();
/// processor.add_site(DVec2::new(400.0, 500.0)).unwrap();
/// processor.add_site(DVec2::new(250.0, 100.0)).unwrap();
///
/// processor.compute().unwrap();
/// processor.bind_to_box(BoundingBox::default()).unwrap();
///
/// for face in processor.diagram().faces() {
///     println!("face {}: {:?}", face.id, face.as_polygon());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FortuneProcessor {
    queue: EventQueue,
    beach_line: BeachLine,
    diagram: Diagram,
    sites: Vec<DVec2>,
    site_lookup: HashMap<(u64, u64), SiteId>,
    sweep_y: f64,
    started: bool,
}

/// Bit pattern key of a site, with -0.0 folded into 0.0
fn site_key(p: DVec2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

impl FortuneProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor and register every site of `sites`
    pub fn with_sites(sites: impl IntoIterator<Item = DVec2>) -> Result<Self> {
        let mut processor = Self::new();
        for site in sites {
            processor.add_site(site)?;
        }
        Ok(processor)
    }

    /// Register one input site and queue its site event
    ///
    /// A site equal to an already registered one is ignored and the existing
    /// id is returned.
    ///
    /// # Errors
    ///
    /// `SweepAlreadyStarted` once the first event has been processed, and
    /// `InvalidSite` for NaN or infinite coordinates.
    pub fn add_site(&mut self, site: DVec2) -> Result<SiteId> {
        if self.started {
            return Err(VoronoiError::SweepAlreadyStarted);
        }
        if !site.is_finite() {
            return Err(VoronoiError::InvalidSite {
                x: site.x,
                y: site.y,
            });
        }

        let key = site_key(site);
        if let Some(&existing) = self.site_lookup.get(&key) {
            log::warn!(
                "ignoring duplicate site ({}, {}), already registered as {}",
                site.x,
                site.y,
                existing
            );
            return Ok(existing);
        }

        let id = self.diagram.add_face(site);
        self.sites.push(site);
        self.site_lookup.insert(key, id);
        self.queue.insert(Event::site(id, site));
        Ok(id)
    }

    /// Process every remaining event
    pub fn compute(&mut self) -> Result<()> {
        let mut processed = 0usize;
        while self.step()?.is_some() {
            processed += 1;
        }
        log::debug!(
            "sweep finished after {} events: {} vertices, {} edges, {} faces",
            processed,
            self.diagram.vertices().len(),
            self.diagram.edges().len(),
            self.diagram.faces().len()
        );
        Ok(())
    }

    /// Pop and process exactly one event
    ///
    /// Returns the processed event, or `None` once the sweep is done.
    pub fn step(&mut self) -> Result<Option<Event>> {
        let Some((id, event)) = self.queue.pop() else {
            return Ok(None);
        };
        self.started = true;
        self.sweep_y = event.y;

        match event.kind {
            EventKind::Site(site) => {
                log::trace!("site event {} at ({}, {})", site, event.x, event.y);
                self.handle_site_event(site)?;
            }
            EventKind::Circle { arc, center } => {
                log::trace!(
                    "circle event for arc {} at ({}, {}), center ({}, {})",
                    arc.0,
                    event.x,
                    event.y,
                    center.x,
                    center.y
                );
                self.handle_circle_event(id, arc, center)?;
            }
        }
        Ok(Some(event))
    }

    /// Whether no pending event remains
    #[inline]
    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending events
    #[inline]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Height of the last processed event
    #[inline]
    pub fn sweep_y(&self) -> f64 {
        self.sweep_y
    }

    /// Whether the next pending event lies at or above height `y`
    ///
    /// Animated callers lower a visual sweep line gradually and call `step`
    /// whenever this turns true.
    pub fn peek_is_at_or_above(&self, y: f64) -> bool {
        self.queue.peek().is_some_and(|event| event.y >= y)
    }

    /// Input sites in registration order
    #[inline]
    pub fn sites(&self) -> &[DVec2] {
        &self.sites
    }

    #[inline]
    pub fn beach_line(&self) -> &BeachLine {
        &self.beach_line
    }

    #[inline]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }

    fn handle_site_event(&mut self, site: SiteId) -> Result<()> {
        let position = self.sites[site];

        if self.beach_line.is_empty() {
            let head = self.beach_line.allocate(Arc::new(site, position));
            self.beach_line.set_head(head);
            return Ok(());
        }

        let arc_above = self
            .beach_line
            .find_arc_above_x(position.x, self.sweep_y)
            .ok_or(VoronoiError::NoArcAbove {
                x: position.x,
                y: position.y,
            })?;

        if let Some(stale) = self.beach_line.arc_mut(arc_above).circle_event.take() {
            self.queue.invalidate(stale);
        }

        let above = self.beach_line.arc(arc_above).clone();
        if above.focus.y == position.y {
            // Both sites sit on the sweep line: the arcs are vertical rays
            // and their boundary is the full bisector line.
            let inserted = self.beach_line.insert_after(arc_above, site, position);
            let edge = self.diagram.add_edge(
                above.site,
                site,
                EdgeState::Unbounded {
                    anchor: DVec2::new((above.focus.x + position.x) * 0.5, position.y),
                    direction: bisector_direction(above.focus, position),
                },
            );
            self.beach_line.arc_mut(inserted).right_edge = above.right_edge;
            self.beach_line.arc_mut(arc_above).right_edge = Some(edge);
            self.beach_line.arc_mut(inserted).left_edge = Some(edge);

            self.check_circle_event(arc_above);
            self.check_circle_event(inserted);
            return Ok(());
        }

        let start = DVec2::new(position.x, above.evaluate(position.x, self.sweep_y));
        let (left, middle, right) = self.beach_line.split(arc_above, site, position);

        let left_edge = self.diagram.add_edge(
            above.site,
            site,
            EdgeState::Open {
                start,
                direction: bisector_direction(above.focus, position),
            },
        );
        let right_edge = self.diagram.add_edge(
            site,
            above.site,
            EdgeState::Open {
                start,
                direction: bisector_direction(position, above.focus),
            },
        );
        self.diagram.set_twins(left_edge, right_edge);

        self.beach_line.arc_mut(left).right_edge = Some(left_edge);
        self.beach_line.arc_mut(middle).left_edge = Some(left_edge);
        self.beach_line.arc_mut(middle).right_edge = Some(right_edge);
        self.beach_line.arc_mut(right).left_edge = Some(right_edge);

        self.check_circle_event(left);
        self.check_circle_event(right);
        Ok(())
    }

    fn handle_circle_event(&mut self, id: EventId, arc: ArcId, center: DVec2) -> Result<()> {
        let collapsing = self.beach_line.arc(arc).clone();
        if !collapsing.linked || collapsing.circle_event != Some(id) {
            log::trace!("discarding stale circle event {}", id.0);
            return Ok(());
        }

        let vertex = self.diagram.add_vertex(center);
        for edge in [collapsing.left_edge, collapsing.right_edge].into_iter().flatten() {
            self.diagram.close_edge(edge, vertex)?;
        }

        let (prev, next) = self.beach_line.remove(arc);
        for neighbour in [prev, next].into_iter().flatten() {
            if let Some(stale) = self.beach_line.arc_mut(neighbour).circle_event.take() {
                self.queue.invalidate(stale);
            }
        }

        let (Some(prev), Some(next)) = (prev, next) else {
            return Ok(());
        };
        let (left, right) = (self.beach_line.arc(prev), self.beach_line.arc(next));
        let edge = self.diagram.add_edge(
            left.site,
            right.site,
            EdgeState::Open {
                start: center,
                direction: bisector_direction(left.focus, right.focus),
            },
        );
        self.diagram.attach_start(edge, vertex);
        self.beach_line.arc_mut(prev).right_edge = Some(edge);
        self.beach_line.arc_mut(next).left_edge = Some(edge);

        self.check_circle_event(prev);
        self.check_circle_event(next);
        Ok(())
    }

    /// Predict the collapse of `arc` between its two neighbours
    ///
    /// No event is queued when a neighbour is missing, the three foci are
    /// collinear or turn counter-clockwise (the breakpoints diverge), or the
    /// bottom of the circle lies above the sweep line already.
    fn check_circle_event(&mut self, arc: ArcId) {
        let current = self.beach_line.arc(arc);
        let (Some(prev), Some(next)) = (current.prev, current.next) else {
            return;
        };
        let a = self.beach_line.arc(prev).focus;
        let b = current.focus;
        let c = self.beach_line.arc(next).focus;

        if orientation(a, b, c) != Orientation::Clockwise {
            return;
        }
        let Some(circle) = circumcircle(a, b, c) else {
            return;
        };

        let event_y = circle.bottom();
        if event_y > self.sweep_y + EPSILON {
            log::debug!(
                "circle for arc {} bottoms out at {} above the sweep line {}",
                arc.0,
                event_y,
                self.sweep_y
            );
            return;
        }

        if let Some(stale) = self.beach_line.arc_mut(arc).circle_event.take() {
            self.queue.invalidate(stale);
        }
        let id = self.queue.insert(Event::circle(arc, circle.center, event_y));
        self.beach_line.arc_mut(arc).circle_event = Some(id);
    }

    /// Sample the beach line at unit x steps over `[0, max_x]` for a sweep at `sweep_y`
    pub fn beach_line_points(&self, max_x: f64, sweep_y: f64) -> Vec<DVec2> {
        self.beach_line.points(max_x, sweep_y)
    }

    /// Segments to draw for a sweep line at `sweep_y`
    ///
    /// Closed edges as they are, plus every edge still traced by a breakpoint
    /// from its start to where that breakpoint sits at `sweep_y`.
    pub fn edges_at(&self, sweep_y: f64) -> Vec<[DVec2; 2]> {
        let mut segments: Vec<[DVec2; 2]> = self
            .diagram
            .edges()
            .iter()
            .filter_map(|edge| edge.segment())
            .collect();

        for arc in self.beach_line.iter() {
            let Some(edge) = self.beach_line.arc(arc).right_edge else {
                continue;
            };
            let Some(breakpoint) = self.beach_line.breakpoint(arc, sweep_y) else {
                continue;
            };
            let origin = match self.diagram.edges()[edge.0].state() {
                EdgeState::Open { start, .. } => start,
                EdgeState::Unbounded { anchor, .. } => anchor,
                _ => continue,
            };
            segments.push([origin, breakpoint]);
        }
        segments
    }

    /// Clip the finished diagram to `bounds`
    ///
    /// # Errors
    ///
    /// `SweepIncomplete` while events are pending, or whatever the clipper
    /// reports.
    pub fn bind_to_box(&mut self, bounds: BoundingBox) -> Result<()> {
        self.ensure_done()?;
        self.diagram.bind_to_box(bounds)
    }

    /// Derive face adjacency from the finished diagram
    pub fn link_faces(&mut self) -> Result<()> {
        self.ensure_done()?;
        self.diagram.link_faces();
        Ok(())
    }

    /// Move every site to the centroid of its face; returns the largest move
    pub fn relax_faces(&mut self) -> f64 {
        self.diagram.relax_faces()
    }

    /// Current site of every face, in face order
    pub fn face_sites(&self) -> Vec<DVec2> {
        self.diagram.face_sites()
    }

    /// Drop all sites, events and results so the processor can be reused
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn ensure_done(&self) -> Result<()> {
        if self.is_done() {
            Ok(())
        } else {
            Err(VoronoiError::SweepIncomplete(self.queue.len()))
        }
    }
}
