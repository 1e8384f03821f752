mod merge;
mod partition;

pub use merge::{can_merge, merge_direction, CombinedBoxInfo, MergeDirection};
pub use partition::{AxisLayout, Segment};

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{LayoutError, Result};
use crate::generator::BoxParams;
use crate::grid::{Grid, UNGROUPED};

/// A total footprint partitioned into a grid of boxes, plus the merges
/// recorded on top of it.
///
/// Boxes are indexed row-major: `index = row * cols + col`, with columns
/// along the width axis and rows along the depth axis. The grid is the
/// single source of truth for cell membership; every merged box owns a
/// group id that its cells carry.
///
/// Mutations build the new grid and merge table first and swap both in
/// at the end, so a failed call leaves the layout untouched.
#[derive(Debug, Clone)]
pub struct BoxLayout {
    widths: AxisLayout,
    depths: AxisLayout,
    grid: Grid,
    combined: BTreeMap<u32, CombinedBoxInfo>,
    next_group: u32,
}

impl BoxLayout {
    /// Partitions the footprint into boxes no larger than the max sizes.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDimensions` if any length is not
    /// positive and finite.
    pub fn partition(
        total_width: f64,
        total_depth: f64,
        max_box_width: f64,
        max_box_depth: f64,
    ) -> Result<Self> {
        let widths = AxisLayout::partition(total_width, max_box_width)?;
        let depths = AxisLayout::partition(total_depth, max_box_depth)?;
        let grid = Grid::from_sizes(&widths.sizes(), &depths.sizes());
        debug!(
            cols = widths.len(),
            rows = depths.len(),
            width = widths.total(),
            depth = depths.total(),
            "partitioned footprint into boxes"
        );
        Ok(Self {
            widths,
            depths,
            grid,
            combined: BTreeMap::new(),
            next_group: UNGROUPED + 1,
        })
    }

    /// Partitions the footprint described by `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid.
    pub fn from_params(params: &BoxParams) -> Result<Self> {
        params.validate()?;
        let (max_w, max_d) = params.axis_limits();
        Self::partition(params.total_width, params.total_depth, max_w, max_d)
    }

    /// Replaces the partition, dropping all merges and hidden flags.
    ///
    /// # Errors
    ///
    /// Returns an error if any length is invalid; the layout is unchanged then.
    pub fn repartition(
        &mut self,
        total_width: f64,
        total_depth: f64,
        max_box_width: f64,
        max_box_depth: f64,
    ) -> Result<()> {
        *self = Self::partition(total_width, total_depth, max_box_width, max_box_depth)?;
        Ok(())
    }

    /// The cell grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Width-axis segments (one per column).
    #[must_use]
    pub fn widths(&self) -> &AxisLayout {
        &self.widths
    }

    /// Depth-axis segments (one per row).
    #[must_use]
    pub fn depths(&self) -> &AxisLayout {
        &self.depths
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.widths.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.depths.len()
    }

    /// Number of unmerged boxes the footprint was partitioned into.
    #[must_use]
    pub fn box_count(&self) -> usize {
        self.cols() * self.rows()
    }

    /// Row-major index of `(row, col)`.
    #[must_use]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols() + col
    }

    /// `(row, col)` of a box index.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::IndexOutOfRange` for an unknown index.
    pub fn position_of(&self, index: usize) -> Result<(usize, usize)> {
        let count = self.box_count();
        if index >= count {
            return Err(LayoutError::IndexOutOfRange { index, count }.into());
        }
        Ok((index / self.cols(), index % self.cols()))
    }

    /// World rectangle `(x, y, width, depth)` of an unmerged box.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::IndexOutOfRange` for an unknown index.
    pub fn box_rect(&self, index: usize) -> Result<(f64, f64, f64, f64)> {
        let (row, col) = self.position_of(index)?;
        let w = self.widths.segments[col];
        let d = self.depths.segments[row];
        Ok((w.offset, d.offset, w.size, d.size))
    }

    /// Returns `true` if the selection forms one contiguous row or column run.
    #[must_use]
    pub fn can_merge(&self, selected: &[usize]) -> bool {
        can_merge(selected, self.cols(), self.box_count())
    }

    /// Merges the selected boxes into one.
    ///
    /// The lowest index becomes the primary box. Any earlier merge that
    /// shares a box with the selection is dissolved first.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NotMergeable` if the selection is not one
    /// contiguous run; the layout is unchanged then.
    pub fn merge(&mut self, selected: &[usize]) -> Result<CombinedBoxInfo> {
        let Some(direction) = merge_direction(selected, self.cols(), self.box_count()) else {
            return Err(LayoutError::NotMergeable(format!(
                "{selected:?} is not a contiguous row or column run"
            ))
            .into());
        };

        let mut indices = selected.to_vec();
        indices.sort_unstable();
        let primary_index = indices[0];
        let (row, col) = self.position_of(primary_index)?;

        let (width, depth) = match direction {
            MergeDirection::Width => (
                indices
                    .iter()
                    .map(|&i| self.widths.segments[i % self.cols()].size)
                    .sum::<f64>(),
                self.depths.segments[row].size,
            ),
            MergeDirection::Depth => (
                self.widths.segments[col].size,
                indices
                    .iter()
                    .map(|&i| self.depths.segments[i / self.cols()].size)
                    .sum::<f64>(),
            ),
        };

        let mut grid = self.grid.clone();
        let mut combined = self.combined.clone();
        let stale: Vec<u32> = combined
            .values()
            .filter(|info| indices.iter().any(|&i| info.contains(i)))
            .map(|info| info.group)
            .collect();
        for group in stale {
            if let Some(info) = combined.remove(&group) {
                self.assign_group(&mut grid, &info.indices(), UNGROUPED)?;
                debug!(group, primary = info.primary_index, "dissolved overlapping merge");
            }
        }

        let group = self.next_group;
        self.assign_group(&mut grid, &indices, group)?;
        let info = CombinedBoxInfo {
            group,
            primary_index,
            secondary_indices: indices[1..].to_vec(),
            direction,
            width,
            depth,
        };
        combined.insert(group, info.clone());

        self.grid = grid;
        self.combined = combined;
        self.next_group += 1;
        debug!(group, primary = primary_index, ?direction, width, depth, "merged boxes");
        Ok(info)
    }

    /// Dissolves the merge containing `index`, returning it if one existed.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::IndexOutOfRange` for an unknown index.
    pub fn split(&mut self, index: usize) -> Result<Option<CombinedBoxInfo>> {
        self.position_of(index)?;
        let Some(group) = self.combined_for(index).map(|info| info.group) else {
            return Ok(None);
        };

        let mut grid = self.grid.clone();
        let mut combined = self.combined.clone();
        let removed = combined.remove(&group);
        if let Some(info) = &removed {
            self.assign_group(&mut grid, &info.indices(), UNGROUPED)?;
            debug!(group, primary = info.primary_index, "split merged box");
        }
        self.grid = grid;
        self.combined = combined;
        Ok(removed)
    }

    /// Dissolves every merge.
    pub fn reset_merges(&mut self) {
        let mut grid = self.grid.clone();
        for (row, col, _) in self.grid.iter() {
            if let Ok(cell) = grid.cell_mut(row, col) {
                cell.group = UNGROUPED;
            }
        }
        self.grid = grid;
        self.combined = BTreeMap::new();
    }

    /// All recorded merges, ordered by group id.
    pub fn combined_boxes(&self) -> impl Iterator<Item = &CombinedBoxInfo> {
        self.combined.values()
    }

    /// The merge containing `index`, if any.
    #[must_use]
    pub fn combined_for(&self, index: usize) -> Option<&CombinedBoxInfo> {
        let (row, col) = self.position_of(index).ok()?;
        let group = self.grid.cell(row, col)?.group;
        self.combined.get(&group)
    }

    /// Hides or shows a box.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::IndexOutOfRange` for an unknown index.
    pub fn set_hidden(&mut self, index: usize, hidden: bool) -> Result<()> {
        let (row, col) = self.position_of(index)?;
        self.grid.cell_mut(row, col)?.visible = !hidden;
        Ok(())
    }

    /// Indices of all hidden boxes, ascending.
    #[must_use]
    pub fn hidden_indices(&self) -> Vec<usize> {
        self.grid
            .iter()
            .filter(|(_, _, cell)| !cell.visible)
            .map(|(row, col, _)| self.index_of(row, col))
            .collect()
    }

    fn assign_group(&self, grid: &mut Grid, indices: &[usize], group: u32) -> Result<()> {
        for &i in indices {
            let (row, col) = self.position_of(i)?;
            grid.cell_mut(row, col)?.group = group;
        }
        Ok(())
    }
}
