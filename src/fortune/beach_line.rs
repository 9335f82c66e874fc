//! Beach line: the ordered sequence of parabolic arcs above the sweep line
//!
//! Arcs live in an arena and link to each other by [`ArcId`]. An arc that
//! disappears is unlinked but keeps its slot, so stale circle events that
//! still mention it can be recognised and dropped.

use glam::DVec2;

use crate::diagram::{EdgeId, SiteId};
use crate::geometry::{find_intersection, parabola_y};

use super::event::EventId;

/// Stable handle of an arc inside a [`BeachLine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArcId(pub usize);

/// One parabola segment of the beach line
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Site whose parabola this arc belongs to
    pub site: SiteId,
    /// Position of that site (the parabola focus)
    pub focus: DVec2,
    pub prev: Option<ArcId>,
    pub next: Option<ArcId>,
    /// Pending circle event that would remove this arc
    pub circle_event: Option<EventId>,
    /// Edge traced by the breakpoint with `prev`
    pub left_edge: Option<EdgeId>,
    /// Edge traced by the breakpoint with `next`
    pub right_edge: Option<EdgeId>,
    /// Whether the arc is still part of the beach line
    pub linked: bool,
}

impl Arc {
    pub fn new(site: SiteId, focus: DVec2) -> Self {
        Self {
            site,
            focus,
            prev: None,
            next: None,
            circle_event: None,
            left_edge: None,
            right_edge: None,
            linked: true,
        }
    }

    /// Height of this arc's parabola at `x` for a sweep line at `sweep_y`
    #[inline]
    pub fn evaluate(&self, x: f64, sweep_y: f64) -> f64 {
        parabola_y(self.focus, x, sweep_y)
    }
}

/// Doubly linked list of arcs ordered by x
#[derive(Debug, Clone, Default)]
pub struct BeachLine {
    arcs: Vec<Arc>,
    head: Option<ArcId>,
}

impl BeachLine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn head(&self) -> Option<ArcId> {
        self.head
    }

    #[inline]
    pub fn set_head(&mut self, arc: ArcId) {
        self.head = Some(arc);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub fn arc(&self, id: ArcId) -> &Arc {
        &self.arcs[id.0]
    }

    #[inline]
    pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc {
        &mut self.arcs[id.0]
    }

    /// Store a new, not yet linked arc
    pub fn allocate(&mut self, arc: Arc) -> ArcId {
        let id = ArcId(self.arcs.len());
        self.arcs.push(arc);
        id
    }

    /// Arcs in left-to-right order
    pub fn iter(&self) -> impl Iterator<Item = ArcId> + '_ {
        std::iter::successors(self.head, move |id| self.arcs[id.0].next)
    }

    /// Number of arcs currently on the beach line
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Find the arc directly above `x` for a sweep line at `sweep_y`
    ///
    /// Returns the first arc whose right breakpoint is at or beyond `x`, or
    /// the last arc if `x` lies right of every breakpoint. An exact tie goes to
    /// the left arc. `None` only when the beach line is empty.
    pub fn find_arc_above_x(&self, x: f64, sweep_y: f64) -> Option<ArcId> {
        let mut current = self.head?;
        while let Some(next) = self.arcs[current.0].next {
            let bp = find_intersection(self.arcs[current.0].focus, self.arcs[next.0].focus, sweep_y);
            if x <= bp {
                return Some(current);
            }
            current = next;
        }
        Some(current)
    }

    /// Replace `arc` by a left/middle/right triple, the middle one for `site`
    ///
    /// Left and right keep the original site and inherit its outer edges.
    pub fn split(&mut self, arc: ArcId, site: SiteId, focus: DVec2) -> (ArcId, ArcId, ArcId) {
        let old = self.arcs[arc.0].clone();

        let left = self.allocate(Arc {
            prev: old.prev,
            right_edge: None,
            circle_event: None,
            ..old.clone()
        });
        let middle = self.allocate(Arc::new(site, focus));
        let right = self.allocate(Arc {
            next: old.next,
            left_edge: None,
            circle_event: None,
            ..old
        });

        self.arcs[left.0].next = Some(middle);
        self.arcs[middle.0].prev = Some(left);
        self.arcs[middle.0].next = Some(right);
        self.arcs[right.0].prev = Some(middle);

        if let Some(prev) = self.arcs[left.0].prev {
            self.arcs[prev.0].next = Some(left);
        }
        if let Some(next) = self.arcs[right.0].next {
            self.arcs[next.0].prev = Some(right);
        }
        if self.head == Some(arc) {
            self.head = Some(left);
        }
        self.unlink_slot(arc);

        (left, middle, right)
    }

    /// Link a new arc for `site` immediately right of `arc`
    pub fn insert_after(&mut self, arc: ArcId, site: SiteId, focus: DVec2) -> ArcId {
        let next = self.arcs[arc.0].next;
        let inserted = self.allocate(Arc {
            prev: Some(arc),
            next,
            ..Arc::new(site, focus)
        });
        self.arcs[arc.0].next = Some(inserted);
        if let Some(next) = next {
            self.arcs[next.0].prev = Some(inserted);
        }
        inserted
    }

    /// Unlink `arc`, joining its neighbours; returns `(prev, next)`
    pub fn remove(&mut self, arc: ArcId) -> (Option<ArcId>, Option<ArcId>) {
        let Arc { prev, next, .. } = self.arcs[arc.0];
        if let Some(prev) = prev {
            self.arcs[prev.0].next = next;
        }
        if let Some(next) = next {
            self.arcs[next.0].prev = prev;
        }
        if self.head == Some(arc) {
            self.head = next;
        }
        self.unlink_slot(arc);
        (prev, next)
    }

    fn unlink_slot(&mut self, arc: ArcId) {
        let slot = &mut self.arcs[arc.0];
        slot.prev = None;
        slot.next = None;
        slot.linked = false;
    }

    /// Current position of the breakpoint between `arc` and its successor
    ///
    /// `None` if `arc` is last, or both foci sit on the sweep line (the
    /// breakpoint is then at infinity).
    pub fn breakpoint(&self, arc: ArcId, sweep_y: f64) -> Option<DVec2> {
        let left = &self.arcs[arc.0];
        let right = &self.arcs[left.next?.0];
        let x = find_intersection(left.focus, right.focus, sweep_y);
        let y = [left.evaluate(x, sweep_y), right.evaluate(x, sweep_y)]
            .into_iter()
            .find(|y| y.is_finite())?;
        Some(DVec2::new(x, y))
    }

    /// Sample the beach line at unit steps of x in `[0, max_x]`
    ///
    /// Samples over an arc whose focus is on the sweep line are skipped.
    pub fn points(&self, max_x: f64, sweep_y: f64) -> Vec<DVec2> {
        if self.is_empty() || !max_x.is_finite() || max_x < 0.0 {
            return Vec::new();
        }
        (0..=max_x.floor() as usize)
            .filter_map(|i| {
                let x = i as f64;
                let arc = self.find_arc_above_x(x, sweep_y)?;
                let y = self.arcs[arc.0].evaluate(x, sweep_y);
                y.is_finite().then(|| DVec2::new(x, y))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three arcs for sites at equal height, linked left to right
    fn three_arc_line() -> (BeachLine, [ArcId; 3]) {
        let mut line = BeachLine::new();
        let a = line.allocate(Arc::new(0, DVec2::new(100.0, 50.0)));
        line.set_head(a);
        let b = line.insert_after(a, 1, DVec2::new(200.0, 50.0));
        let c = line.insert_after(b, 2, DVec2::new(300.0, 50.0));
        (line, [a, b, c])
    }

    #[test]
    fn test_empty_beach_line() {
        let line = BeachLine::new();
        assert!(line.is_empty());
        assert_eq!(line.find_arc_above_x(0.0, 0.0), None);
        assert!(line.points(10.0, 0.0).is_empty());
    }

    #[test]
    fn test_single_arc() {
        let mut line = BeachLine::new();
        let a = line.allocate(Arc::new(0, DVec2::new(1.0, 2.0)));
        line.set_head(a);
        assert_eq!(line.find_arc_above_x(2.0, 3.0), Some(a));
        assert_eq!(line.len(), 1);
    }

    #[test]
    fn test_find_arc_left_middle_right() {
        let (line, [a, b, c]) = three_arc_line();
        let sweep = 0.0;

        assert_eq!(line.find_arc_above_x(120.0, sweep), Some(a));

        let bp1 = find_intersection(line.arc(a).focus, line.arc(b).focus, sweep);
        let bp2 = find_intersection(line.arc(b).focus, line.arc(c).focus, sweep);
        assert_eq!(line.find_arc_above_x((bp1 + bp2) / 2.0, sweep), Some(b));

        assert_eq!(line.find_arc_above_x(400.0, sweep), Some(c));
    }

    #[test]
    fn test_find_arc_on_breakpoint_returns_left() {
        let (line, [a, _, _]) = three_arc_line();
        assert_eq!(line.find_arc_above_x(150.0, 0.0), Some(a));
    }

    #[test]
    fn test_find_arc_just_right_of_breakpoint() {
        let (line, [a, b, _]) = three_arc_line();
        assert_eq!(line.find_arc_above_x(150.0 + 1e-10, 0.0), Some(b));
        assert_eq!(line.find_arc_above_x(150.0 - 1e-10, 0.0), Some(a));
    }

    #[test]
    fn test_split_links_triple() {
        let (mut line, [a, b, c]) = three_arc_line();
        let (left, middle, right) = line.split(b, 3, DVec2::new(210.0, 10.0));

        let order: Vec<ArcId> = line.iter().collect();
        assert_eq!(order, vec![a, left, middle, right, c]);
        assert_eq!(line.arc(left).site, 1);
        assert_eq!(line.arc(middle).site, 3);
        assert_eq!(line.arc(right).site, 1);
        assert_eq!(line.arc(a).next, Some(left));
        assert_eq!(line.arc(c).prev, Some(right));
        assert!(!line.arc(b).linked);
    }

    #[test]
    fn test_split_head_updates_head() {
        let mut line = BeachLine::new();
        let a = line.allocate(Arc::new(0, DVec2::new(0.0, 10.0)));
        line.set_head(a);
        let (left, _, _) = line.split(a, 1, DVec2::new(0.0, 5.0));
        assert_eq!(line.head(), Some(left));
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn test_remove_joins_neighbours() {
        let (mut line, [a, b, c]) = three_arc_line();
        assert_eq!(line.remove(b), (Some(a), Some(c)));
        assert_eq!(line.arc(a).next, Some(c));
        assert_eq!(line.arc(c).prev, Some(a));
        assert_eq!(line.len(), 2);

        assert_eq!(line.remove(a), (None, Some(c)));
        assert_eq!(line.head(), Some(c));
    }

    #[test]
    fn test_breakpoint_lies_on_both_parabolas() {
        let mut line = BeachLine::new();
        let a = line.allocate(Arc::new(0, DVec2::new(0.0, 10.0)));
        line.set_head(a);
        let (left, middle, _) = line.split(a, 1, DVec2::new(3.0, 4.0));

        let bp = line.breakpoint(left, 1.0).unwrap();
        let f_left = line.arc(left).focus;
        let f_mid = line.arc(middle).focus;
        assert!((bp.distance(f_left) - bp.distance(f_mid)).abs() < 1e-6);
        assert!(bp.x < f_mid.x);
    }

    #[test]
    fn test_points_follow_lower_envelope() {
        let (line, _) = three_arc_line();
        let points = line.points(400.0, 0.0);
        assert_eq!(points.len(), 401);
        for p in points {
            let lowest = [100.0, 200.0, 300.0]
                .iter()
                .map(|&fx| parabola_y(DVec2::new(fx, 50.0), p.x, 0.0))
                .fold(f64::INFINITY, f64::min);
            assert!((p.y - lowest).abs() < 1e-9);
        }
    }
}
