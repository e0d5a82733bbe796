//! Grid Topology
//!
//! Row-major lattice addressing and Moore-neighbourhood lookup.

use crate::error::BeachError;

/// Grid cell as `(row, col)`
pub type Coord = (usize, usize);

/// Neighbour offsets in tentacle creation order
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Most tentacles a single octopus can have
pub const MAX_TENTACLES: usize = MOORE_OFFSETS.len();

/// Fixed `width x height` lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, BeachError> {
        // The tentacle count must fit as well as the cell count
        let fits = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(MAX_TENTACLES))
            .is_some();
        if width == 0 || height == 0 || !fits {
            return Err(BeachError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Row-major index of a cell, `None` when out of bounds.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.contains(row, col).then(|| row * self.width + col)
    }

    /// Like [`Grid::index`] but reports the offending coordinate.
    pub fn checked_index(&self, (row, col): Coord) -> Result<usize, BeachError> {
        self.index(row, col).ok_or(BeachError::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
        })
    }

    pub fn coord(&self, index: usize) -> Coord {
        (index / self.width, index % self.width)
    }

    /// In-bounds Moore neighbours of a cell, as indices.
    pub fn neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = usize> + '_ {
        MOORE_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.index(r, c)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_dimensions() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(BeachError::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(Grid::new(4, 0).is_err());
    }

    #[test]
    fn test_rejects_dimensions_that_overflow() {
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(BeachError::InvalidDimensions { width: usize::MAX, height: 2 })
        ));
        assert!(Grid::new(usize::MAX / 8 + 1, 1).is_err());
        assert!(Grid::new(usize::MAX / 16, 2).is_ok());
    }

    #[test]
    fn test_index_and_coord_roundtrip_on_non_square_grid() {
        let grid = Grid::new(5, 3).unwrap();

        assert_eq!(grid.len(), 15);
        assert_eq!(grid.index(2, 4), Some(14));
        assert_eq!(grid.coord(14), (2, 4));
        assert_eq!(grid.coord(7), (1, 2));
        assert_eq!(grid.index(3, 0), None);
        assert_eq!(grid.index(0, 5), None);
    }

    #[test]
    fn test_checked_index_reports_coordinate() {
        let grid = Grid::new(2, 2).unwrap();
        match grid.checked_index((2, 1)) {
            Err(BeachError::OutOfBounds { row, col, .. }) => assert_eq!((row, col), (2, 1)),
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_neighbour_counts() {
        let grid = Grid::new(4, 3).unwrap();

        assert_eq!(grid.neighbours(1, 1).count(), 8);
        assert_eq!(grid.neighbours(0, 0).count(), 3);
        assert_eq!(grid.neighbours(2, 3).count(), 3);
        assert_eq!(grid.neighbours(0, 2).count(), 5);
        assert_eq!(grid.neighbours(1, 0).count(), 5);
    }

    #[test]
    fn test_neighbour_order() {
        let grid = Grid::new(3, 3).unwrap();
        let around_centre: Vec<_> = grid.neighbours(1, 1).collect();
        assert_eq!(around_centre, vec![0, 1, 2, 3, 5, 6, 7, 8]);

        let around_corner: Vec<_> = grid.neighbours(0, 0).collect();
        assert_eq!(around_corner, vec![1, 3, 4]);
    }

    #[test]
    fn test_single_row_grid() {
        let grid = Grid::new(4, 1).unwrap();
        assert_eq!(grid.neighbours(0, 0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(grid.neighbours(0, 2).collect::<Vec<_>>(), vec![1, 3]);
    }
}
