use ndarray::Array2;

/// Single coordinate axis used for board rows, columns and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts a flat row-major index back into coordinates for a board `cols` wide.
pub(crate) const fn from_flat_index(index: usize, cols: Coord) -> Coord2 {
    let cols = cols as usize;
    ((index / cols) as Coord, (index % cols) as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

/// `(d_row, d_col)` offsets of the eight neighbours, in row-major order:
/// the row above left to right, then left and right, then the row below.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets `coords` by `delta`, or `None` when that leaves the `bounds` grid.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = coords.0.checked_add_signed(delta.0).filter(|&row| row < bounds.0)?;
    let col = coords.1.checked_add_signed(delta.1).filter(|&col| col < bounds.1)?;
    Some((row, col))
}

/// Iterates the up-to-eight in-bounds neighbours of a cell in row-major order,
/// without wraparound.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            deltas: DISPLACEMENTS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.deltas.find_map(|&delta| apply_delta(center, delta, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (3, 3)).count(), 3);
        assert_eq!(NeighborIter::new((2, 2), (3, 3)).count(), 3);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let mut iter = NeighborIter::new((1, 1), (3, 3));
        assert_eq!(iter.next(), Some((0, 0)));
        assert_eq!(iter.count(), 7);
    }

    #[test]
    fn single_row_never_wraps() {
        let neighbors: [Option<Coord2>; 3] = {
            let mut iter = NeighborIter::new((0, 0), (1, 4));
            [iter.next(), iter.next(), iter.next()]
        };
        assert_eq!(neighbors, [Some((0, 1)), None, None]);
    }

    #[test]
    fn neighbors_come_in_row_major_order() {
        let neighbors: Vec<Coord2> = NeighborIter::new((1, 1), (3, 3)).collect();
        assert_eq!(
            neighbors,
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn flat_index_is_row_major() {
        assert_eq!(from_flat_index(0, 4), (0, 0));
        assert_eq!(from_flat_index(5, 4), (1, 1));
        assert_eq!(from_flat_index(11, 4), (2, 3));
    }
}
