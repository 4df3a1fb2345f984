//! Rendering options and configuration.

use std::ops::RangeInclusive;

/// Options for rendering notebooks to HTML.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Render cells on the rayon thread pool (output order is unchanged)
    pub parallel: bool,

    /// Syntax-highlight code cells and fenced code in markdown
    pub highlight: bool,

    /// Cell selection
    pub cell_selection: CellSelection,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel cell rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel cell rendering.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable syntax highlighting.
    pub fn with_highlighting(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Set cell selection.
    pub fn with_cells(mut self, selection: CellSelection) -> Self {
        self.cell_selection = selection;
        self
    }

    /// Set specific cell range.
    pub fn with_cell_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.cell_selection = CellSelection::Range(range);
        self
    }

    /// Set specific cells.
    pub fn with_cell_list(mut self, cells: Vec<usize>) -> Self {
        self.cell_selection = CellSelection::Cells(cells);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            highlight: true,
            cell_selection: CellSelection::All,
        }
    }
}

/// Cell selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellSelection {
    /// Render all cells
    #[default]
    All,
    /// Render a range of cells (inclusive, 1-indexed)
    Range(RangeInclusive<usize>),
    /// Render specific cells (1-indexed)
    Cells(Vec<usize>),
    /// Render several ranges (1-indexed); sorted, non-overlapping and
    /// non-adjacent when built by [`CellSelection::parse`]
    Ranges(Vec<RangeInclusive<usize>>),
}

impl CellSelection {
    /// Check if a cell number should be included.
    pub fn includes(&self, cell: usize) -> bool {
        match self {
            CellSelection::All => true,
            CellSelection::Range(range) => range.contains(&cell),
            CellSelection::Cells(cells) => cells.contains(&cell),
            CellSelection::Ranges(ranges) => {
                let slot = ranges.partition_point(|r| *r.end() < cell);
                ranges.get(slot).is_some_and(|r| r.contains(&cell))
            }
        }
    }

    /// Parse a cell selection string (e.g., "1-10", "1,3,5,7-10").
    ///
    /// Comma lists are kept as merged ranges and never expanded cell by cell.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(CellSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: usize = start.trim().parse().map_err(|_| "Invalid start cell")?;
                let end: usize = end.trim().parse().map_err(|_| "Invalid end cell")?;
                return Ok(CellSelection::Range(start..=end));
            }
        }

        let mut parts: Vec<(usize, usize)> = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let (start, end) = match part.split_once('-') {
                Some((start, end)) => (
                    start.trim().parse::<usize>().map_err(|_| "Invalid cell number")?,
                    end.trim().parse::<usize>().map_err(|_| "Invalid cell number")?,
                ),
                None => {
                    let c: usize = part.parse().map_err(|_| "Invalid cell number")?;
                    (c, c)
                }
            };
            if start <= end {
                parts.push((start, end));
            }
        }

        parts.sort_unstable();
        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(parts.len());
        for (start, end) in parts {
            match merged.last_mut() {
                Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }

        Ok(CellSelection::Ranges(
            merged.into_iter().map(|(start, end)| start..=end).collect(),
        ))
    }
}
