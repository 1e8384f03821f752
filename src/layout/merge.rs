/// Axis along which merged boxes are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeDirection {
    /// Boxes in one row, joined left to right.
    Width,
    /// Boxes in one column, joined front to back.
    Depth,
}

/// A recorded merge of adjacent boxes into one.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedBoxInfo {
    /// Grid group id assigned to the merged cells.
    pub group: u32,
    /// Leftmost (width merge) or topmost (depth merge) box index.
    pub primary_index: usize,
    /// Remaining merged box indices, ascending.
    pub secondary_indices: Vec<usize>,
    pub direction: MergeDirection,
    /// Nominal size of the merged box.
    pub width: f64,
    pub depth: f64,
}

impl CombinedBoxInfo {
    /// All box indices in the merge, primary first.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        let mut all = Vec::with_capacity(self.secondary_indices.len() + 1);
        all.push(self.primary_index);
        all.extend_from_slice(&self.secondary_indices);
        all
    }

    /// Returns `true` if `index` is part of this merge.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.primary_index == index || self.secondary_indices.contains(&index)
    }
}

/// Determines whether the selected boxes form one contiguous run.
///
/// Indices are row-major over `cols` columns and must be below
/// `box_count`. Valid selections have at least two boxes, all in one row
/// or all in one column, with no gaps once sorted.
#[must_use]
pub fn merge_direction(selected: &[usize], cols: usize, box_count: usize) -> Option<MergeDirection> {
    if selected.len() < 2 || cols == 0 || selected.iter().any(|&i| i >= box_count) {
        return None;
    }

    let positions: Vec<(usize, usize)> = selected.iter().map(|&i| (i / cols, i % cols)).collect();
    let (row0, col0) = positions[0];

    if positions.iter().all(|&(r, _)| r == row0) {
        let mut columns: Vec<usize> = positions.iter().map(|&(_, c)| c).collect();
        columns.sort_unstable();
        return is_contiguous(&columns).then_some(MergeDirection::Width);
    }
    if positions.iter().all(|&(_, c)| c == col0) {
        let mut rows: Vec<usize> = positions.iter().map(|&(r, _)| r).collect();
        rows.sort_unstable();
        return is_contiguous(&rows).then_some(MergeDirection::Depth);
    }
    None
}

/// Returns `true` if the selected boxes can be merged.
#[must_use]
pub fn can_merge(selected: &[usize], cols: usize, box_count: usize) -> bool {
    merge_direction(selected, cols, box_count).is_some()
}

fn is_contiguous(sorted: &[usize]) -> bool {
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}
