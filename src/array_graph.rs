//! Builds a [`WeightedDigraph`] over a 2D matrix of symbols via a square
//! window and stride (spec C6).

use std::hash::Hash;

use crate::graph::WeightedDigraph;
use crate::symbol::Symbol;

/// Builds the proximity graph of a rectangular matrix `data`.
///
/// For every visited cell `(y, x)`, stepped by `stride` over
/// `[0, height) x [0, width)`, every neighbour `(y', x')` in the square
/// window `[y - w/2, y + w/2) x [x - w/2, x + w/2)` (clamped to the matrix
/// bounds, half-window via integer division, left-inclusive/right-exclusive)
/// is visited. The cell is never its own neighbour: `(y, x) == (y', x')` is
/// excluded, but same-row and same-column neighbours otherwise participate
/// normally. Each visit increments the directed edge from the singleton
/// symbol at `(y, x)` to the singleton symbol at `(y', x')` by `1`.
///
/// `data` rows are assumed rectangular (every row has the same length as
/// `data[0]`); a ragged matrix truncates extra columns in longer rows.
///
/// # Panics
/// Never panics. `window == 0` and `stride == 0` are rejected by every
/// public builder before this function is reached (see [`crate::builder`]);
/// defensively, `window == 0` yields an empty window per cell (no edges),
/// and `stride == 0` is treated as `1` to guarantee termination.
pub fn build<T: Clone + Eq + Hash>(data: &[Vec<T>], window: usize, stride: usize) -> WeightedDigraph<T> {
    let mut graph = WeightedDigraph::new();
    let height = data.len();
    if height == 0 {
        return graph;
    }
    let width = data[0].len();
    if width == 0 {
        return graph;
    }

    let half = window / 2;
    let stride = stride.max(1);

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            visit_cell(data, &mut graph, y, x, half, height, width);
            x += stride;
        }
        y += stride;
    }

    graph
}

fn visit_cell<T: Clone + Eq + Hash>(
    data: &[Vec<T>],
    graph: &mut WeightedDigraph<T>,
    y: usize,
    x: usize,
    half: usize,
    height: usize,
    width: usize,
) {
    let y_lo = y.saturating_sub(half);
    let y_hi = (y + half).min(height);
    let x_lo = x.saturating_sub(half);
    let x_hi = (x + half).min(width);

    let here = Symbol::singleton(data[y][x].clone());
    for ny in y_lo..y_hi {
        for nx in x_lo..x_hi {
            if ny == y && nx == x {
                continue;
            }
            let there = Symbol::singleton(data[ny][nx].clone());
            graph.increment_edge(here.clone(), there, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::symbol::Symbol;

    fn grid(rows: &[&str]) -> Vec<Vec<char>> {
        rows.iter().map(|r| r.chars().collect()).collect()
    }

    #[test]
    fn excludes_only_the_cell_itself() {
        let data = grid(&["ab", "cd"]);
        let graph = build(&data, 2, 1);
        let a = Symbol::singleton('a');
        // with window 2, half = 1, so (0,0)'s window is rows [0,1) x
        // cols [0,1): only itself, which is excluded, so no outgoing edges.
        assert_eq!(graph.neighbors_out(&a).count(), 0);
    }

    #[test]
    fn same_row_and_column_neighbours_participate() {
        let data = grid(&["abc", "def", "ghi"]);
        let graph = build(&data, 3, 1);
        let center = Symbol::singleton('e');
        // window 3, half = 1: (1,1)'s window spans rows/cols [0,3), i.e.
        // the full 3x3 grid minus itself: 8 neighbours, including same-row
        // ('d', 'f') and same-column ('b', 'h') cells.
        let neighbours: std::collections::HashSet<_> = graph.neighbors_out(&center).map(|(s, _)| s.clone()).collect();
        assert_eq!(neighbours.len(), 8);
        assert!(neighbours.contains(&Symbol::singleton('d')));
        assert!(neighbours.contains(&Symbol::singleton('b')));
    }

    #[test]
    fn stride_skips_intermediate_cells() {
        let data = grid(&["abcd", "efgh", "ijkl", "mnop"]);
        let graph = build(&data, 2, 2);
        // only cells (0,0), (0,2), (2,0), (2,2) are visited as centers.
        assert!(graph.nodes().any(|s| s == &Symbol::singleton('a')));
    }

    #[test]
    fn empty_matrix_yields_empty_graph() {
        let data: Vec<Vec<char>> = Vec::new();
        let graph = build(&data, 2, 1);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn zero_stride_terminates_and_behaves_like_stride_one() {
        let data = grid(&["ab", "cd"]);
        let graph = build(&data, 2, 0);
        assert!(graph.node_count() > 0);
    }
}
