use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;

/// Uniform-grid spatial hash for the broad phase.
///
/// Bodies are binned by position; every body also lands in the 8 neighboring
/// cells, so a pair straddling a cell boundary still shares a bucket. Cells
/// live in a `BTreeMap` and pairs come out of an ordered set, which keeps
/// candidate enumeration deterministic across runs.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: BTreeMap<(i32, i32), Vec<u32>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: BTreeMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    fn cell(&self, position: Vec2) -> (i32, i32) {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Bins `index` into the cell containing `position` and its 8 neighbors.
    pub fn insert(&mut self, index: u32, position: Vec2) {
        let (cell_x, cell_y) = self.cell(position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                self.cells
                    .entry((cell_x + dx, cell_y + dy))
                    .or_default()
                    .push(index);
            }
        }
    }

    /// Unordered candidate pairs `(a, b)` with `a < b`, each reported once
    /// even when the two bodies share several cells.
    pub fn candidate_pairs(&self) -> Vec<(u32, u32)> {
        let mut pairs = BTreeSet::new();
        for bucket in self.cells.values() {
            for (i, &a) in bucket.iter().enumerate() {
                for &b in &bucket[i + 1..] {
                    pairs.insert(if a < b { (a, b) } else { (b, a) });
                }
            }
        }
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bodies_in_one_cell_pair_up() {
        let mut grid = SpatialGrid::new(64.0);
        grid.insert(0, Vec2::new(10.0, 10.0));
        grid.insert(1, Vec2::new(20.0, 20.0));
        assert_eq!(grid.candidate_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn neighbor_insertion_catches_cross_boundary_pairs() {
        let mut grid = SpatialGrid::new(64.0);
        // Either side of the x = 64 cell boundary.
        grid.insert(0, Vec2::new(63.0, 0.0));
        grid.insert(1, Vec2::new(65.0, 0.0));
        assert_eq!(grid.candidate_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn distant_bodies_never_pair() {
        let mut grid = SpatialGrid::new(64.0);
        grid.insert(0, Vec2::ZERO);
        grid.insert(1, Vec2::new(200.0, 200.0));
        assert!(grid.candidate_pairs().is_empty());
    }

    #[test]
    fn shared_cells_deduplicate() {
        let mut grid = SpatialGrid::new(64.0);
        // Same cell: the pair shows up in all 9 buckets but only once here.
        grid.insert(3, Vec2::new(1.0, 1.0));
        grid.insert(7, Vec2::new(2.0, 2.0));
        assert_eq!(grid.candidate_pairs(), vec![(3, 7)]);
    }

    #[test]
    fn negative_coordinates_bin_by_floor() {
        let mut grid = SpatialGrid::new(64.0);
        grid.insert(0, Vec2::new(-1.0, -1.0));
        grid.insert(1, Vec2::new(1.0, 1.0));
        assert_eq!(grid.candidate_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn enumeration_is_deterministic() {
        let build = || {
            let mut grid = SpatialGrid::new(64.0);
            for i in 0..20u32 {
                grid.insert(i, Vec2::new(i as f32 * 17.0, (i % 5) as f32 * 13.0));
            }
            grid.candidate_pairs()
        };
        assert_eq!(build(), build());
    }
}
