#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt::Debug;
use std::mem;
use std::ops::Index;

/// A fixed-size rectangular grid of tiles that remembers which cells changed
/// since the last time the change log was drained.
#[derive(Clone, Debug)]
pub struct TileGrid<T>
where
    T: Copy + PartialEq,
{
    width: u32,
    height: u32,
    tile_size: u32,
    cells: Vec<T>,
    changed: Vec<Loc>,
}

impl<T> TileGrid<T>
where
    T: Copy + PartialEq + Debug,
{
    /// Every cell starts out as `fill` and is logged as changed, so the first
    /// drain repaints the whole grid.
    pub fn new(width: u32, height: u32, tile_size: u32, fill: T) -> Self {
        assert!(width > 0 && height > 0);
        let mut result = Self {
            width,
            height,
            tile_size,
            cells: vec![fill; width as usize * height as usize],
            changed: Vec::with_capacity(width as usize * height as usize),
        };
        result.mark_all_changed();
        result
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &T> + Clone {
        self.cells.iter()
    }

    pub fn in_bounds(&self, loc: Loc) -> bool {
        loc.grid_index(self.width, self.height).is_some()
    }

    /// Panics if `loc` is out of bounds; check with [`TileGrid::in_bounds`] first.
    pub fn get(&self, loc: Loc) -> T {
        self[loc]
    }

    /// Panics if `loc` is out of bounds. Only logs the cell when the tile
    /// actually changes.
    pub fn set(&mut self, loc: Loc, tile: T) {
        let index = self.index_or_panic(loc);
        if self.cells[index] != tile {
            self.cells[index] = tile;
            self.changed.push(loc);
        }
    }

    pub fn clear(&mut self, tile: T) {
        self.cells.fill(tile);
        self.mark_all_changed();
    }

    pub fn changed(&self) -> &[Loc] {
        &self.changed
    }

    pub fn drain_changed(&mut self) -> Vec<Loc> {
        mem::take(&mut self.changed)
    }

    fn mark_all_changed(&mut self) {
        for row in 0..self.height as i32 {
            for col in 0..self.width as i32 {
                self.changed.push(Loc::new(col, row));
            }
        }
    }

    fn index_or_panic(&self, loc: Loc) -> usize {
        loc.grid_index(self.width, self.height)
            .unwrap_or_else(|| panic!("Grid location {}, {} out of bounds", loc.col, loc.row))
    }
}

impl<T> Index<Loc> for TileGrid<T>
where
    T: Copy + PartialEq + Debug,
{
    type Output = T;

    fn index(&self, loc: Loc) -> &Self::Output {
        &self.cells[self.index_or_panic(loc)]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub col: i32,
    pub row: i32,
}

impl Loc {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The neighboring location one cell away. May be out of bounds.
    pub fn step(self, direction: Direction) -> Loc {
        match direction {
            Direction::Left => Loc::new(self.col - 1, self.row),
            Direction::Right => Loc::new(self.col + 1, self.row),
            Direction::Up => Loc::new(self.col, self.row - 1),
            Direction::Down => Loc::new(self.col, self.row + 1),
        }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.col >= 0 && self.row >= 0 && (self.col as u32) < width && (self.row as u32) < height
        {
            Some(self.row as usize * width as usize + self.col as usize)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// The random decisions a simulation needs. Everything random in a turn goes
/// through one `Dice` so a seeded or scripted one makes the turn reproducible.
pub trait Dice {
    /// Uniform draw from `low..=high`.
    fn roll(&mut self, low: u32, high: u32) -> u32;

    fn one_in(&mut self, n: u32) -> bool {
        self.roll(1, n) == 1
    }

    fn shuffle<T>(&mut self, items: &mut [T]);

    fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut directions = Direction::ALL;
        self.shuffle(&mut directions);
        directions
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_in_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for Random {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        self.next_in_range(low..=high)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_marks_every_cell_changed() {
        let grid = TileGrid::new(4, 3, 16, 0u8);
        assert_eq!(grid.num_cells(), 12);
        assert_eq!(grid.changed().len(), 12);
        assert!(grid.cells_iter().all(|&tile| tile == 0));
    }

    #[test]
    fn set_logs_only_real_changes() {
        let mut grid = TileGrid::new(5, 5, 16, 0u8);
        grid.drain_changed();

        grid.set(Loc::new(1, 2), 0);
        assert!(grid.changed().is_empty());

        grid.set(Loc::new(1, 2), 7);
        grid.set(Loc::new(1, 2), 7);
        assert_eq!(grid.get(Loc::new(1, 2)), 7);
        assert_eq!(grid.drain_changed(), vec![Loc::new(1, 2)]);
        assert!(grid.changed().is_empty());
    }

    #[test]
    fn grid_is_row_major() {
        let mut grid = TileGrid::new(3, 2, 1, 0u8);
        grid.set(Loc::new(2, 0), 1);
        grid.set(Loc::new(0, 1), 2);
        let cells: Vec<u8> = grid.cells_iter().copied().collect();
        assert_eq!(cells, vec![0, 0, 1, 2, 0, 0]);
    }

    #[test]
    fn clear_fills_and_marks_everything() {
        let mut grid = TileGrid::new(3, 3, 16, 1u8);
        grid.set(Loc::new(0, 0), 4);
        grid.drain_changed();

        grid.clear(2);
        assert!(grid.cells_iter().all(|&tile| tile == 2));
        assert_eq!(grid.drain_changed().len(), 9);
    }

    #[test]
    fn bounds() {
        let grid = TileGrid::new(10, 5, 16, 0u8);
        assert!(grid.in_bounds(Loc::new(0, 0)));
        assert!(grid.in_bounds(Loc::new(9, 4)));
        assert!(!grid.in_bounds(Loc::new(10, 4)));
        assert!(!grid.in_bounds(Loc::new(9, 5)));
        assert!(!grid.in_bounds(Loc::new(-1, 0)));
        assert!(!grid.in_bounds(Loc::new(0, -1)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let grid = TileGrid::new(2, 2, 16, 0u8);
        grid.get(Loc::new(2, 0));
    }

    #[test]
    fn step_moves_one_cell_on_one_axis() {
        let loc = Loc::new(3, 3);
        assert_eq!(loc.step(Direction::Left), Loc::new(2, 3));
        assert_eq!(loc.step(Direction::Right), Loc::new(4, 3));
        assert_eq!(loc.step(Direction::Up), Loc::new(3, 2));
        assert_eq!(loc.step(Direction::Down), Loc::new(3, 4));
        assert_eq!(Loc::new(0, 0).step(Direction::Left), Loc::new(-1, 0));
    }

    #[test]
    fn shuffled_directions_is_a_permutation() {
        let mut rand = Random::from_seed(7);
        for _ in 0..50 {
            let directions = rand.shuffled_directions();
            for direction in Direction::ALL {
                assert_eq!(directions.iter().filter(|&&d| d == direction).count(), 1);
            }
        }
    }

    #[test]
    fn shuffled_directions_has_no_favorite() {
        let mut rand = Random::from_seed(11);
        let mut firsts = [0u32; 4];
        for _ in 0..4000 {
            let first = rand.shuffled_directions()[0];
            let slot = Direction::ALL.iter().position(|&d| d == first).unwrap();
            firsts[slot] += 1;
        }
        assert!(firsts.iter().all(|&count| count > 800), "{firsts:?}");
    }

    #[test]
    fn roll_is_inclusive() {
        let mut rand = Random::from_seed(3);
        let mut seen = [false; 4];
        for _ in 0..500 {
            let value = rand.roll(7, 10);
            assert!((7..=10).contains(&value));
            seen[(value - 7) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn seeded_random_repeats() {
        let mut a = Random::from_seed(42);
        let mut b = Random::from_seed(42);
        for _ in 0..20 {
            assert_eq!(a.roll(0, 1000), b.roll(0, 1000));
        }
    }
}
