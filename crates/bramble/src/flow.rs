//! Flow layout for static and relative widgets.
//!
//! Widgets are placed left to right in rows no wider than the container's
//! content box. Rows after the first fill in under the previous row: a
//! widget slides right past a taller neighbour above it, or drops to sit
//! directly below a shorter one.

use std::mem;

use geom::{Expanse, LineSegment, Point, Rect};
use tracing::{trace, warn};

use crate::{Core, id::NodeId, scheduler, state::PositionMode};

/// A widget already placed in the current pass.
#[derive(Debug, Clone, Copy)]
struct Placed {
    /// The widget.
    id: NodeId,
    /// Its placed outer rectangle.
    rect: Rect,
}

/// Which row the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing above; place in sequence.
    FirstRow,
    /// Consult the previous row before placing.
    LaterRows,
}

/// Outcome of one placement attempt.
enum Step {
    /// The widget was placed here.
    Placed(Point),
    /// The cursor moved; try again.
    Retry,
}

/// Placement state for a single layout pass.
struct Flow {
    /// Content width available.
    width: i32,
    /// Widgets in the row above the cursor.
    previous: Vec<Placed>,
    /// Widgets in the cursor's row.
    current: Vec<Placed>,
    /// Row phase.
    phase: Phase,
    /// Where the next widget goes.
    cursor: Point,
}

impl Flow {
    /// An empty pass over a container of the given content width.
    fn new(width: i32) -> Self {
        Self {
            width,
            previous: Vec::new(),
            current: Vec::new(),
            phase: Phase::FirstRow,
            cursor: Point::zero(),
        }
    }

    /// Place a widget, giving up after `limit` attempts and falling back to
    /// the start of a fresh row below everything placed so far.
    fn place(&mut self, id: NodeId, size: Expanse, limit: usize) -> Point {
        for _ in 0..limit {
            if let Step::Placed(p) = self.step(id, size) {
                return p;
            }
        }
        warn!(?id, limit, "flow placement did not settle; placing below");
        let at = Point::new(0, self.lowest_edge());
        self.phase = Phase::LaterRows;
        self.commit(id, at, size)
    }

    /// Start a new row. The new row's top is the bottom of the first widget
    /// in the row just finished.
    fn wrap(&mut self) {
        self.previous = mem::take(&mut self.current);
        self.cursor.x = 0;
        if let Some(first) = self.previous.first() {
            self.cursor.y = first.rect.bottom();
        }
        self.phase = Phase::LaterRows;
    }

    /// Record a placement and advance the cursor past it.
    fn commit(&mut self, id: NodeId, at: Point, size: Expanse) -> Point {
        self.current.push(Placed {
            id,
            rect: Rect::from_parts(at, size),
        });
        self.cursor = Point::new(at.x.saturating_add(size.w), at.y);
        at
    }

    /// The lowest bottom edge of anything placed, or the cursor row.
    fn lowest_edge(&self) -> i32 {
        self.previous
            .iter()
            .chain(&self.current)
            .map(|p| p.rect.bottom())
            .fold(self.cursor.y, i32::max)
    }

    /// One placement attempt.
    fn step(&mut self, id: NodeId, size: Expanse) -> Step {
        if size.w > self.width {
            // Wider than the container: takes a row of its own.
            if !self.current.is_empty() {
                self.wrap();
            }
            let at = self.commit(id, Point::new(0, self.cursor.y), size);
            self.wrap();
            return Step::Placed(at);
        }
        if i64::from(self.cursor.x) + i64::from(size.w) > i64::from(self.width) {
            self.wrap();
            return Step::Retry;
        }
        if self.phase == Phase::FirstRow {
            return Step::Placed(self.commit(id, self.cursor, size));
        }

        let span = LineSegment::new(self.cursor.x, size.w);
        let overlay: Vec<Placed> = self
            .previous
            .iter()
            .filter(|p| p.rect.hextent().overlaps(&span))
            .copied()
            .collect();
        let Some(blocker) = overlay
            .iter()
            .copied()
            .reduce(|a, b| if b.rect.bottom() > a.rect.bottom() { b } else { a })
        else {
            return Step::Placed(self.commit(id, self.cursor, size));
        };

        let bottom = i64::from(blocker.rect.bottom());
        if 2 * bottom > 2 * i64::from(self.cursor.y) + i64::from(size.h) {
            // The widget above reaches past our midline: slide right of it.
            for p in &overlay {
                self.current.push(*p);
                if p.id == blocker.id {
                    break;
                }
            }
            self.cursor.x = blocker.rect.right();
            return Step::Retry;
        }
        self.cursor.y = blocker.rect.bottom();
        Step::Placed(self.commit(id, self.cursor, size))
    }
}

/// Run flow layout over a container's visible static and relative children,
/// earliest-shown first. Relative widgets are shifted by their offset after
/// placement.
pub(crate) fn layout(core: &mut Core, container: NodeId) {
    let Some(node) = core.nodes.get(container) else {
        return;
    };
    let width = if container == core.root {
        core.config.screen().w
    } else {
        node.content_size().w
    };
    let candidates: Vec<(NodeId, Expanse, PositionMode, Point)> = node
        .children
        .iter()
        .rev()
        .filter_map(|c| {
            core.nodes
                .get(*c)
                .filter(|n| n.visible && n.position.is_flow())
                .map(|n| (*c, n.size, n.position, n.offset))
        })
        .collect();
    if candidates.is_empty() {
        return;
    }
    trace!(?container, width, count = candidates.len(), "flow layout");

    let limit = core.config.flow_pass_limit;
    let mut flow = Flow::new(width);
    for (id, size, mode, offset) in candidates {
        let at = flow.place(id, size, limit);
        let pos = match mode {
            PositionMode::Relative => at + offset,
            _ => at,
        };
        scheduler::exec_move(core, id, pos);
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn run(width: i32, sizes: &[(i32, i32)]) -> Vec<Point> {
        let mut flow = Flow::new(width);
        ids(sizes.len())
            .into_iter()
            .zip(sizes)
            .map(|(id, (w, h))| flow.place(id, Expanse::new(*w, *h), 64))
            .collect()
    }

    #[test]
    fn first_row_then_wrap() {
        assert_eq!(
            run(1000, &[(400, 30), (400, 30), (400, 30)]),
            vec![Point::new(0, 0), Point::new(400, 0), Point::new(0, 30)]
        );
    }

    #[test]
    fn exact_fit_stays_on_row() {
        assert_eq!(
            run(100, &[(50, 10), (50, 10), (1, 1)]),
            vec![Point::new(0, 0), Point::new(50, 0), Point::new(0, 10)]
        );
    }

    #[test]
    fn oversize_takes_own_row() {
        assert_eq!(
            run(100, &[(40, 10), (150, 20), (40, 10)]),
            vec![Point::new(0, 0), Point::new(0, 10), Point::new(0, 30)]
        );
    }

    #[test]
    fn slides_past_tall_neighbour() {
        // The second row starts under the first widget. The fifth widget
        // would sit under the tall one, which reaches past its midline, so
        // it moves right and drops under the short one instead.
        assert_eq!(
            run(150, &[(50, 20), (50, 100), (50, 20), (50, 20), (50, 20)]),
            vec![
                Point::new(0, 0),
                Point::new(50, 0),
                Point::new(100, 0),
                Point::new(0, 20),
                Point::new(100, 20),
            ]
        );
    }

    #[test]
    fn even_row_wraps_at_its_bottom() {
        assert_eq!(
            run(100, &[(50, 20), (50, 20), (50, 20)]),
            vec![Point::new(0, 0), Point::new(50, 0), Point::new(0, 20)]
        );
    }

    #[test]
    fn drops_under_short_neighbour() {
        // The fourth widget's row starts at y=20, but the neighbour above it
        // ends at y=30, short of the midline at y=40. The row continues from
        // that neighbour's bottom edge instead.
        assert_eq!(
            run(100, &[(50, 20), (50, 30), (50, 40), (50, 40), (50, 10)]),
            vec![
                Point::new(0, 0),
                Point::new(50, 0),
                Point::new(0, 20),
                Point::new(50, 30),
                Point::new(0, 60),
            ]
        );
    }

    #[test]
    fn zero_width_container_terminates() {
        let placed = run(0, &[(10, 10), (10, 10)]);
        assert_eq!(placed, vec![Point::new(0, 0), Point::new(0, 10)]);
    }
}
