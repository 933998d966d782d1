//! Binary cell grids and the constructs built from them.

use std::fmt;

use rand::Rng;

/// A fixed-size 2D binary cell buffer with bounded (non-wrapping) edges.
///
/// Cells are stored row-major; `cells.len() == width * height` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a grid where each cell is independently alive with
    /// `alive_probability`.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Self {
        let cells = (0..width * height)
            .map(|_| rng.gen_bool(alive_probability))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Copy this grid, independently flipping each cell's state with
    /// `flip_probability`.
    pub fn mutated<R: Rng + ?Sized>(&self, flip_probability: f64, rng: &mut R) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|&alive| {
                if rng.gen_bool(flip_probability) {
                    !alive
                } else {
                    alive
                }
            })
            .collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Convert (x, y) coordinates to flat index.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get the cell at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.idx(x, y)]
    }

    /// Set the cell at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let idx = self.idx(x, y);
        self.cells[idx] = alive;
    }

    /// View the raw cell buffer.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Mutable view of the raw cell buffer.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Number of alive cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.get(x, y) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// A candidate seed pattern under evolutionary search.
///
/// Constructs are never mutated after creation; mutation copies the parent's
/// grid into a new child. Parents retained across generations are shared by
/// reference, which is safe precisely because of that immutability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construct {
    /// The seed pattern.
    pub grid: Grid,
    /// Whether this construct came from mutation rather than fresh
    /// randomization.
    pub is_child: bool,
}

impl Construct {
    /// Create a freshly randomized construct.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Self {
        Self {
            grid: Grid::random(width, height, alive_probability, rng),
            is_child: false,
        }
    }

    /// Create a mutated child of `parent`.
    pub fn child_of<R: Rng + ?Sized>(
        parent: &Construct,
        flip_probability: f64,
        rng: &mut R,
    ) -> Self {
        Self {
            grid: parent.grid.mutated(flip_probability, rng),
            is_child: true,
        }
    }
}
