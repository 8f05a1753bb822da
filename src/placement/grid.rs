use std::collections::{HashMap, HashSet};

use super::Rect;

/// Spatial index for fast overlap queries against already-committed label
/// rectangles. Built up incrementally over one placement pass and discarded
/// with it.
///
/// The grid is conservative: `query` returns every entry whose rectangle
/// touches a cell the query rectangle touches, so callers re-check exact
/// intersection themselves.
pub(crate) struct LabelGrid {
    cell: f64,
    /// Maps grid cell (ix, iy) to indices into the committed-rectangle list.
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl LabelGrid {
    pub(crate) fn new(cell: f64) -> Self {
        Self {
            cell: cell.max(16.0),
            cells: HashMap::new(),
        }
    }

    fn cell_range(&self, rect: &Rect) -> (i64, i64, i64, i64) {
        let x0 = (rect.0 / self.cell).floor() as i64;
        let y0 = (rect.1 / self.cell).floor() as i64;
        let x1 = ((rect.0 + rect.2) / self.cell).floor() as i64;
        let y1 = ((rect.1 + rect.3) / self.cell).floor() as i64;
        (x0, y0, x1, y1)
    }

    /// Register the committed rectangle stored at `idx`.
    pub(crate) fn insert(&mut self, idx: usize, rect: &Rect) {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        for ix in x0..=x1 {
            for iy in y0..=y1 {
                self.cells.entry((ix, iy)).or_default().push(idx);
            }
        }
    }

    /// Indices of committed rectangles that could overlap `rect`, deduped.
    pub(crate) fn query(&self, rect: &Rect) -> impl Iterator<Item = usize> + '_ {
        let (x0, y0, x1, y1) = self.cell_range(rect);
        let mut seen = HashSet::new();
        (x0..=x1)
            .flat_map(move |ix| (y0..=y1).map(move |iy| (ix, iy)))
            .flat_map(move |key| {
                self.cells
                    .get(&key)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .copied()
            })
            .filter(move |idx| seen.insert(*idx))
    }
}
