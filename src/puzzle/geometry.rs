//! Line-of-sight and crossing geometry between islands

use super::Island;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Direction a bridge runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// An unordered island pair that can legally host a bridge.
///
/// Stored canonically with `a < b`. Orientation is recovered from the
/// endpoint coordinates rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateEdge {
    pub a: usize,
    pub b: usize,
}

impl CandidateEdge {
    pub fn new(i: usize, j: usize) -> Self {
        Self {
            a: i.min(j),
            b: i.max(j),
        }
    }

    /// The endpoint that is not `island`, if `island` is an endpoint at all
    #[inline]
    pub fn other(&self, island: usize) -> Option<usize> {
        if island == self.a {
            Some(self.b)
        } else if island == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn orientation(&self, islands: &[Island]) -> Orientation {
        if islands[self.a].y == islands[self.b].y {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// The segment this edge occupies on the grid
    pub fn segment(&self, islands: &[Island]) -> Segment {
        Segment::between(&islands[self.a], &islands[self.b])
    }
}

/// An axis-aligned segment with a fixed coordinate and an inclusive span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub orientation: Orientation,
    /// `y` for horizontal segments, `x` for vertical ones
    pub fixed: usize,
    pub low: usize,
    pub high: usize,
}

impl Segment {
    /// Segment between two islands; callers must pass axis-aligned islands
    pub fn between(first: &Island, second: &Island) -> Self {
        if first.y == second.y {
            Self {
                orientation: Orientation::Horizontal,
                fixed: first.y,
                low: first.x.min(second.x),
                high: first.x.max(second.x),
            }
        } else {
            Self {
                orientation: Orientation::Vertical,
                fixed: first.x,
                low: first.y.min(second.y),
                high: first.y.max(second.y),
            }
        }
    }

    /// Strict interior crossing of a horizontal and a vertical segment.
    ///
    /// Segments that share an endpoint, or run in the same direction, never cross.
    pub fn crosses(&self, other: &Segment) -> bool {
        let (horizontal, vertical) = match (self.orientation, other.orientation) {
            (Orientation::Horizontal, Orientation::Vertical) => (self, other),
            (Orientation::Vertical, Orientation::Horizontal) => (other, self),
            _ => return false,
        };

        horizontal.low < vertical.fixed
            && vertical.fixed < horizontal.high
            && vertical.low < horizontal.fixed
            && horizontal.fixed < vertical.high
    }
}

/// Whether some third island sits strictly between `i` and `j` on their shared line
pub fn is_blocked(islands: &[Island], i: usize, j: usize) -> bool {
    let (first, second) = (&islands[i], &islands[j]);

    if first.y == second.y {
        let (low, high) = (first.x.min(second.x), first.x.max(second.x));
        islands
            .iter()
            .any(|k| k.y == first.y && low < k.x && k.x < high)
    } else if first.x == second.x {
        let (low, high) = (first.y.min(second.y), first.y.max(second.y));
        islands
            .iter()
            .any(|k| k.x == first.x && low < k.y && k.y < high)
    } else {
        false
    }
}

/// Whether islands `i` and `j` share a row or column with a clear line between them
pub fn is_connectable(islands: &[Island], i: usize, j: usize) -> bool {
    if i == j {
        return false;
    }
    let (first, second) = (&islands[i], &islands[j]);
    let aligned = (first.x == second.x) != (first.y == second.y);
    aligned && !is_blocked(islands, i, j)
}

/// Every connectable island pair, each once, in `(a, b)` lexicographic order
pub fn candidate_edges(islands: &[Island]) -> Vec<CandidateEdge> {
    (0..islands.len())
        .tuple_combinations()
        .filter(|&(i, j)| is_connectable(islands, i, j))
        .map(|(i, j)| CandidateEdge::new(i, j))
        .collect()
}

/// Index pairs `(e1, e2)` with `e1 < e2` whose segments cross
pub fn crossing_pairs(islands: &[Island], edges: &[CandidateEdge]) -> Vec<(usize, usize)> {
    let segments: Vec<Segment> = edges.iter().map(|edge| edge.segment(islands)).collect();

    (0..edges.len())
        .tuple_combinations()
        .filter(|&(e1, e2)| segments[e1].crosses(&segments[e2]))
        .collect()
}

/// Indices of the candidate edges touching each island
pub fn incidence(island_count: usize, edges: &[CandidateEdge]) -> Vec<Vec<usize>> {
    let mut incident = vec![Vec::new(); island_count];
    for (index, edge) in edges.iter().enumerate() {
        incident[edge.a].push(index);
        incident[edge.b].push(index);
    }
    incident
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn islands(points: &[(usize, usize)]) -> Vec<Island> {
        points.iter().map(|&(x, y)| Island::new(x, y, 1)).collect()
    }

    fn scenario_a() -> Vec<Island> {
        [[0, 0, 4], [0, 2, 2], [1, 0, 3], [1, 1, 4], [1, 2, 1], [3, 1, 3], [3, 2, 1]]
            .iter()
            .map(|&[x, y, r]| Island::new(x, y, r as u8))
            .collect()
    }

    #[test]
    fn test_candidate_edges_scenario_a() {
        let edges = candidate_edges(&scenario_a());
        let pairs: Vec<(usize, usize)> = edges.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(
            pairs,
            vec![(0, 1), (0, 2), (1, 4), (2, 3), (3, 4), (3, 5), (4, 6), (5, 6)]
        );
    }

    #[test]
    fn test_blocking_island() {
        let row = islands(&[(0, 0), (2, 0), (4, 0)]);
        assert!(is_blocked(&row, 0, 2));
        assert!(!is_connectable(&row, 0, 2));
        assert!(is_connectable(&row, 0, 1));
        assert!(is_connectable(&row, 1, 2));

        let column = islands(&[(1, 0), (1, 3), (1, 1)]);
        assert!(is_blocked(&column, 0, 1));
        assert_eq!(candidate_edges(&column).len(), 2);
    }

    #[test]
    fn test_diagonal_not_connectable() {
        let pair = islands(&[(0, 0), (1, 1)]);
        assert!(!is_connectable(&pair, 0, 1));
        assert!(candidate_edges(&pair).is_empty());
    }

    #[test]
    fn test_orientation_and_other() {
        let points = islands(&[(0, 0), (3, 0), (0, 2)]);
        let horizontal = CandidateEdge::new(1, 0);
        assert_eq!((horizontal.a, horizontal.b), (0, 1));
        assert_eq!(horizontal.orientation(&points), Orientation::Horizontal);
        assert_eq!(CandidateEdge::new(0, 2).orientation(&points), Orientation::Vertical);
        assert_eq!(horizontal.other(0), Some(1));
        assert_eq!(horizontal.other(2), None);
    }

    #[test]
    fn test_crossing_interior_only() {
        // plus sign: (0,1)-(2,1) horizontal, (1,0)-(1,2) vertical
        let plus = islands(&[(0, 1), (2, 1), (1, 0), (1, 2)]);
        let edges = vec![CandidateEdge::new(0, 1), CandidateEdge::new(2, 3)];
        assert_eq!(crossing_pairs(&plus, &edges), vec![(0, 1)]);

        // L shape sharing the corner island never crosses
        let corner = islands(&[(0, 0), (2, 0), (0, 2)]);
        let edges = vec![CandidateEdge::new(0, 1), CandidateEdge::new(0, 2)];
        assert!(crossing_pairs(&corner, &edges).is_empty());

        // T junction: vertical edge ends on the horizontal line
        let tee = islands(&[(0, 0), (4, 0), (2, 1), (2, 3)]);
        let edges = vec![CandidateEdge::new(0, 1), CandidateEdge::new(2, 3)];
        assert!(crossing_pairs(&tee, &edges).is_empty());
    }

    #[test]
    fn test_parallel_segments_never_cross() {
        let rows = islands(&[(0, 0), (3, 0), (0, 1), (3, 1)]);
        let a = CandidateEdge::new(0, 1).segment(&rows);
        let b = CandidateEdge::new(2, 3).segment(&rows);
        assert!(!a.crosses(&b));
        assert!(!a.crosses(&a));
    }

    #[test]
    fn test_incidence() {
        let points = scenario_a();
        let edges = candidate_edges(&points);
        let incident = incidence(points.len(), &edges);
        assert_eq!(incident[0], vec![0, 1]);
        assert_eq!(incident[3], vec![3, 4, 5]);
        assert_eq!(incident.iter().map(Vec::len).sum::<usize>(), 2 * edges.len());
    }

    fn distinct_points() -> impl Strategy<Value = Vec<Island>> {
        proptest::collection::hash_set((0usize..6, 0usize..6), 0..14).prop_map(|set| {
            let mut points: Vec<_> = set.into_iter().collect();
            points.sort();
            points.into_iter().map(|(x, y)| Island::new(x, y, 1)).collect()
        })
    }

    proptest! {
        #[test]
        fn candidate_edges_are_aligned_and_clear(points in distinct_points()) {
            let edges = candidate_edges(&points);
            for edge in &edges {
                prop_assert!(edge.a < edge.b);
                let (p, q) = (&points[edge.a], &points[edge.b]);
                prop_assert!((p.x == q.x) != (p.y == q.y));
                prop_assert!(!is_blocked(&points, edge.a, edge.b));
            }
        }

        #[test]
        fn candidate_edges_are_complete(points in distinct_points()) {
            let edges = candidate_edges(&points);
            let mut expected = 0;
            for i in 0..points.len() {
                for j in (i + 1)..points.len() {
                    if is_connectable(&points, i, j) {
                        expected += 1;
                        prop_assert!(edges.contains(&CandidateEdge::new(i, j)));
                    }
                }
            }
            prop_assert_eq!(edges.len(), expected);
        }

        #[test]
        fn crossing_is_symmetric(points in distinct_points()) {
            let edges = candidate_edges(&points);
            for (e1, e2) in crossing_pairs(&points, &edges) {
                let s1 = edges[e1].segment(&points);
                let s2 = edges[e2].segment(&points);
                prop_assert!(s2.crosses(&s1));
                prop_assert_ne!(s1.orientation, s2.orientation);
            }
        }
    }
}
