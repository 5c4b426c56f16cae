/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for pair counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(col, row)`.
pub type Coord2 = (Coord, Coord);

/// Symbol held by a cell, `1..=pair_count`. Exactly two cells share each value.
pub type PairValue = u16;

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

/// Row-major position of a cell, `row * cols + col`.
pub trait ToLinearIndex {
    fn to_linear_index(self, size: Coord2) -> usize;
}

impl ToLinearIndex for Coord2 {
    fn to_linear_index(self, (cols, _rows): Coord2) -> usize {
        let (col, row) = self;
        usize::from(row) * usize::from(cols) + usize::from(col)
    }
}

/// Inverse of [`ToLinearIndex`], `None` when `index` is past the last cell.
pub fn coords_from_linear_index(index: usize, (cols, rows): Coord2) -> Option<Coord2> {
    if cols == 0 {
        return None;
    }
    let col = index % usize::from(cols);
    let row = index / usize::from(cols);
    if row >= usize::from(rows) {
        return None;
    }
    Some((col.try_into().ok()?, row.try_into().ok()?))
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every cell of a grid in row-major order.
pub fn iter_cells((cols, rows): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (col, row)))
}
