#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod narrative;
mod population;
mod rabbit;
mod tile;

pub use narrative::Narrative;
pub use population::{Population, RabbitId, TurnOutcome, INITIAL_POPULATION, POPULATION_LIMIT};
pub use rabbit::{Colour, Gender, Rabbit, ADULT_AGE, NAMES};
pub use tile::Tile;
pub use tile_grid::{Dice, Direction, Loc, Random, TileGrid};
