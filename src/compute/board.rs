//! Simulation board and the Game of Life step rule.

use super::Grid;

/// The simulation surface a construct is embedded in for evaluation.
///
/// One board is allocated per fitness evaluation and discarded afterward;
/// boards are never shared between evaluations. Alongside the cell grid it
/// carries a per-cell visit counter accumulating how many steps each cell
/// spent alive, and a spare buffer so stepping needs no per-step allocation.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Grid,
    visit_counts: Vec<u32>,
    next: Vec<bool>,
}

impl Board {
    /// Create an all-dead board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Grid::empty(width, height),
            visit_counts: vec![0; width * height],
            next: vec![false; width * height],
        }
    }

    /// Board width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    /// Board height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Current cell state.
    #[inline]
    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    /// Per-cell alive-step counters.
    #[inline]
    pub fn visit_counts(&self) -> &[u32] {
        &self.visit_counts
    }

    /// Sum of all visit counters.
    pub fn total_visits(&self) -> u64 {
        self.visit_counts.iter().map(|&v| u64::from(v)).sum()
    }

    /// Copy `pattern` onto the board at the given offset.
    ///
    /// The pattern must fit within the board; the fitness evaluator checks
    /// this against the configuration before any board exists.
    pub fn place(&mut self, pattern: &Grid, x_offset: usize, y_offset: usize) {
        debug_assert!(x_offset + pattern.width() <= self.width());
        debug_assert!(y_offset + pattern.height() <= self.height());
        for y in 0..pattern.height() {
            for x in 0..pattern.width() {
                self.cells.set(x + x_offset, y + y_offset, pattern.get(x, y));
            }
        }
    }

    /// Copy `pattern` onto the approximate center of the board.
    pub fn place_centered(&mut self, pattern: &Grid) {
        let x_offset = (self.width() - pattern.width()) / 2;
        let y_offset = (self.height() - pattern.height()) / 2;
        self.place(pattern, x_offset, y_offset);
    }

    /// Apply one synchronous Game of Life step.
    ///
    /// Visit counters are bumped for every cell alive before the step. The
    /// next state is computed entirely from the pre-step snapshot (neighbor
    /// counts never observe this step's writes), then swapped in. Cells
    /// outside the board count as dead; edges do not wrap.
    pub fn step(&mut self) {
        let width = self.width();
        let height = self.height();
        let current = self.cells.cells();

        for (count, &alive) in self.visit_counts.iter_mut().zip(current) {
            *count += u32::from(alive);
        }

        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                let neighbors = alive_neighbors(current, width, height, x, y);
                self.next[idx] = match neighbors {
                    0 | 1 => false,
                    2 => current[idx],
                    3 => true,
                    _ => false,
                };
            }
        }

        self.cells.cells_mut().copy_from_slice(&self.next);
    }
}

/// Count alive cells in the Moore neighborhood of (x, y).
#[inline]
fn alive_neighbors(cells: &[bool], width: usize, height: usize, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height {
                count += u8::from(cells[ny as usize * width + nx as usize]);
            }
        }
    }
    count
}
