use std::cmp;

use log::info;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::MazeError;
use crate::grid::Grid;
use crate::grid_traits::MazeGrid;
use crate::navigation::Navigator;
use crate::units::{ColumnsCount, RowsCount};

/// Starting conditions and difficulty scaling for a run of levels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LevelConfig {
    pub columns: ColumnsCount,
    pub rows: RowsCount,
    /// Each completed level multiplies both dimensions by this, growing by at least one cell.
    pub growth_factor: f64,
    /// Seed for a reproducible run, otherwise the random source is seeded from the OS.
    pub seed: Option<u64>,
}

impl LevelConfig {
    pub fn square(size: usize) -> LevelConfig {
        LevelConfig {
            columns: ColumnsCount(size),
            rows: RowsCount(size),
            ..LevelConfig::default()
        }
    }
}

impl Default for LevelConfig {
    fn default() -> LevelConfig {
        LevelConfig {
            columns: ColumnsCount(20),
            rows: RowsCount(20),
            growth_factor: 1.2,
            seed: None,
        }
    }
}

/// `floor(length * factor)`, but always at least one longer.
pub fn grow(length: usize, factor: f64) -> usize {
    let scaled = (length as f64 * factor).floor();
    // `as` saturates, and NaN becomes 0 so falls back to the minimum growth.
    cmp::max(scaled as usize, length.saturating_add(1))
}

/// Owns the current maze and the player in it, and swaps in a bigger maze each time the goal is reached.
#[derive(Debug)]
pub struct LevelController<G: MazeGrid = Grid> {
    config: LevelConfig,
    grid: G,
    navigator: Navigator,
    score: u32,
    rng: XorShiftRng,
}

impl<G: MazeGrid> LevelController<G> {
    pub fn new(config: LevelConfig) -> Result<LevelController<G>, MazeError> {
        let mut rng = match config.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        };
        let grid = G::generate(config.columns, config.rows, &mut rng)?;
        let navigator = Navigator::new(&grid);
        Ok(LevelController {
            config,
            grid,
            navigator,
            score: 0,
            rng,
        })
    }

    #[inline]
    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &G {
        &self.grid
    }

    #[inline]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[inline]
    pub fn position(&self) -> Cartesian2DCoordinate {
        self.navigator.position()
    }

    /// Completed levels.
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn dimensions(&self) -> (ColumnsCount, RowsCount) {
        self.grid.dimensions()
    }

    pub fn try_move(&mut self, direction: CompassPrimary) -> Result<bool, MazeError> {
        self.navigator.try_move(&self.grid, direction)
    }

    #[inline]
    pub fn at_goal(&self) -> bool {
        self.navigator.at_goal()
    }

    /// Moves on to the next level if the player is standing on the goal.
    pub fn regenerate_if_goal_reached(&mut self) -> Result<bool, MazeError> {
        if self.navigator.at_goal() {
            self.on_goal_reached()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Scores the level and replaces the maze with a bigger one, putting the player back at the start.
    ///
    /// The new maze is built before anything is replaced, so on error the current level is left as it was.
    pub fn on_goal_reached(&mut self) -> Result<(), MazeError> {
        let (ColumnsCount(columns), RowsCount(rows)) = self.grid.dimensions();
        let next_columns = ColumnsCount(grow(columns, self.config.growth_factor));
        let next_rows = RowsCount(grow(rows, self.config.growth_factor));

        let grid = G::generate(next_columns, next_rows, &mut self.rng)?;
        let navigator = Navigator::new(&grid);

        self.grid = grid;
        self.navigator = navigator;
        self.score += 1;
        info!("Level {} complete, next maze is {}x{}", self.score, next_columns.0, next_rows.0);
        Ok(())
    }
}
