use std::collections::{HashMap, HashSet};

use super::edges::{Corner, UnitEdge};

/// A chain of corners assembled from unit edges.
#[derive(Debug, Clone, Default)]
pub struct Stitched {
    /// Corners in traversal order, without a duplicated closing corner.
    pub corners: Vec<Corner>,
    /// Whether the chain returned to its first corner.
    pub closed: bool,
    /// Edges never reached from the first edge.
    pub unused: usize,
    /// Whether the chain passes through some corner more than once.
    pub pinched: bool,
}

/// Stitches unit edges into one loop starting from the first edge.
///
/// At each step the chain's last corner is matched against the start of a
/// remaining edge. Where several edges leave the same corner (regions that
/// touch themselves diagonally) the sharpest right turn is taken so the
/// walk keeps following the same boundary, and the chain is marked
/// `pinched`. Stops when the loop closes or no edge continues it.
pub fn stitch_loop(edges: &[UnitEdge]) -> Stitched {
    let Some(first) = edges.first() else {
        return Stitched::default();
    };

    let mut outgoing: HashMap<Corner, Vec<usize>> = HashMap::new();
    for (i, e) in edges.iter().enumerate() {
        outgoing.entry(e.start).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    used[0] = true;
    let mut corners = vec![first.start, first.end];
    let mut incoming = direction(first);
    let mut closed = false;

    loop {
        let Some(&current) = corners.last() else {
            break;
        };
        if current == corners[0] && corners.len() > 1 {
            corners.pop();
            closed = true;
            break;
        }
        let next = outgoing.get(&current).and_then(|candidates| {
            candidates
                .iter()
                .copied()
                .filter(|&i| !used[i])
                .min_by_key(|&i| turn_rank(incoming, direction(&edges[i])))
        });
        let Some(next) = next else {
            break;
        };
        used[next] = true;
        incoming = direction(&edges[next]);
        corners.push(edges[next].end);
    }

    let mut visited = HashSet::with_capacity(corners.len());
    let pinched = !corners.iter().all(|c| visited.insert(*c));

    Stitched {
        corners,
        closed,
        unused: used.iter().filter(|u| !**u).count(),
        pinched,
    }
}

/// Drops corners lying on a straight run between their neighbors.
///
/// Unit edges always leave intermediate corners along long sides; this
/// reduces a chain to its true turning points. Closed chains are treated
/// cyclically.
pub fn remove_collinear(corners: &[Corner], closed: bool) -> Vec<Corner> {
    let n = corners.len();
    if n < 3 {
        return corners.to_vec();
    }

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let interior = closed || (i > 0 && i < n - 1);
        if interior {
            let prev = corners[(i + n - 1) % n];
            let next = corners[(i + 1) % n];
            if is_straight(prev, corners[i], next) {
                continue;
            }
        }
        kept.push(corners[i]);
    }
    kept
}

type Step = (i64, i64);

#[allow(clippy::cast_possible_wrap)]
fn delta(a: Corner, b: Corner) -> Step {
    (b.0 as i64 - a.0 as i64, b.1 as i64 - a.1 as i64)
}

fn direction(edge: &UnitEdge) -> Step {
    delta(edge.start, edge.end)
}

fn is_straight(prev: Corner, curr: Corner, next: Corner) -> bool {
    let a = delta(prev, curr);
    let b = delta(curr, next);
    a.0 * b.1 - a.1 * b.0 == 0 && a.0 * b.0 + a.1 * b.1 > 0
}

/// Orders turns right < straight < left < reverse.
fn turn_rank(incoming: Step, outgoing: Step) -> u8 {
    let cross = incoming.0 * outgoing.1 - incoming.1 * outgoing.0;
    let dot = incoming.0 * outgoing.0 + incoming.1 * outgoing.1;
    match (cross.signum(), dot.signum()) {
        (-1, _) => 0,
        (0, 1) => 1,
        (1, _) => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_edges() -> Vec<UnitEdge> {
        vec![
            UnitEdge { start: (0, 0), end: (1, 0) },
            UnitEdge { start: (1, 1), end: (0, 1) },
            UnitEdge { start: (1, 0), end: (1, 1) },
            UnitEdge { start: (0, 1), end: (0, 0) },
        ]
    }

    #[test]
    fn unordered_edges_close_into_loop() {
        let stitched = stitch_loop(&square_edges());
        assert!(stitched.closed);
        assert_eq!(stitched.unused, 0);
        assert_eq!(stitched.corners, vec![(0, 0), (1, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn missing_edge_stops_gracefully() {
        let mut edges = square_edges();
        edges.remove(2);
        let stitched = stitch_loop(&edges);
        assert!(!stitched.closed);
        assert_eq!(stitched.corners, vec![(0, 0), (1, 0)]);
        assert_eq!(stitched.unused, 2);
    }

    #[test]
    fn corner_touch_marks_chain_pinched() {
        // Two unit squares meeting only at (1, 1).
        let edges = vec![
            UnitEdge { start: (0, 0), end: (1, 0) },
            UnitEdge { start: (1, 0), end: (1, 1) },
            UnitEdge { start: (1, 1), end: (0, 1) },
            UnitEdge { start: (0, 1), end: (0, 0) },
            UnitEdge { start: (1, 1), end: (2, 1) },
            UnitEdge { start: (2, 1), end: (2, 2) },
            UnitEdge { start: (2, 2), end: (1, 2) },
            UnitEdge { start: (1, 2), end: (1, 1) },
        ];
        let stitched = stitch_loop(&edges);
        assert!(stitched.closed);
        assert_eq!(stitched.unused, 0);
        assert!(stitched.pinched);
        assert!(!stitch_loop(&square_edges()).pinched);
    }

    #[test]
    fn collinear_corners_removed_cyclically() {
        let corners = vec![(1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 0)];
        assert_eq!(
            remove_collinear(&corners, true),
            vec![(2, 0), (2, 1), (0, 1), (0, 0)]
        );
    }

    #[test]
    fn open_chain_keeps_endpoints() {
        let corners = vec![(0, 0), (1, 0), (2, 0)];
        assert_eq!(remove_collinear(&corners, false), vec![(0, 0), (2, 0)]);
    }

    #[test]
    fn right_turn_ranks_first() {
        let north = (0, 1);
        assert_eq!(turn_rank(north, (1, 0)), 0);
        assert_eq!(turn_rank(north, (0, 1)), 1);
        assert_eq!(turn_rank(north, (-1, 0)), 2);
        assert_eq!(turn_rank(north, (0, -1)), 3);
    }
}
