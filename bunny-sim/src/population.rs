use crate::narrative::{self, Narrative};
use crate::rabbit::{Colour, Gender, Rabbit};
use crate::tile::Tile;
use log::{debug, info, warn};
use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;
use std::mem;
use tile_grid::{Dice, Loc, Random, TileGrid};

/// Above this many rabbits a food shortage culls the population to half of it.
pub const POPULATION_LIMIT: usize = 1000;
pub const INITIAL_POPULATION: usize = 5;

const INFECTED_LIFESPAN: (u32, u32) = (7, 10);
const LIFESPAN: (u32, u32) = (10, 12);

new_key_type! {
    /// Stable handle for a live rabbit.
    pub struct RabbitId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Continuing,
    /// Nobody is left; the turn did nothing.
    Finished,
}

/// The rabbits living on a tile grid, and the rules that move them from one
/// turn to the next.
///
/// Each live rabbit occupies exactly one cell and no two share a cell. The
/// grid always shows `floor` on empty cells and a tile derived from the
/// occupant otherwise.
pub struct Population<N, D = Random>
where
    N: Narrative,
    D: Dice,
{
    rabbits: SlotMap<RabbitId, Rabbit>,
    order: Vec<RabbitId>,
    by_loc: HashMap<Loc, RabbitId>,
    grid: TileGrid<Tile>,
    floor: Tile,
    narrative: N,
    dice: D,
}

impl<N, D> Population<N, D>
where
    N: Narrative,
    D: Dice,
{
    /// Starts out empty; call [`Population::spawn`] or [`Population::reset`]
    /// to add rabbits.
    pub fn new(grid: TileGrid<Tile>, floor: Tile, narrative: N, dice: D) -> Self {
        Self {
            rabbits: SlotMap::with_key(),
            order: vec![],
            by_loc: HashMap::new(),
            grid,
            floor,
            narrative,
            dice,
        }
    }

    pub fn len(&self) -> usize {
        self.rabbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rabbits.is_empty()
    }

    pub fn get(&self, id: RabbitId) -> Option<&Rabbit> {
        self.rabbits.get(id)
    }

    /// Live rabbits in the order turns process them.
    pub fn rabbits(&self) -> impl Iterator<Item = (RabbitId, &Rabbit)> + '_ {
        self.order.iter().map(|&id| (id, &self.rabbits[id]))
    }

    pub fn occupant(&self, loc: Loc) -> Option<RabbitId> {
        self.by_loc.get(&loc).copied()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Loc, RabbitId)> + '_ {
        self.by_loc.iter().map(|(&loc, &id)| (loc, id))
    }

    pub fn grid(&self) -> &TileGrid<Tile> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid<Tile> {
        &mut self.grid
    }

    pub fn floor_tile(&self) -> Tile {
        self.floor
    }

    pub fn narrative(&self) -> &N {
        &self.narrative
    }

    pub fn narrative_mut(&mut self) -> &mut N {
        &mut self.narrative
    }

    pub fn spawn(&mut self, count: usize) {
        let free = self.grid.num_cells() - self.rabbits.len();
        if count > free {
            warn!("Asked to spawn {count} rabbits but only {free} cells are free");
        }

        for _ in 0..count.min(free) {
            let loc = self.random_free_loc();
            let rabbit = Rabbit::spawn(loc, &mut self.dice);
            self.add(rabbit);
        }
    }

    pub fn next_turn(&mut self) -> TurnOutcome {
        if self.rabbits.is_empty() {
            return TurnOutcome::Finished;
        }

        let mut breedable_males = 0;
        let mut breedable_females: Vec<(Loc, Colour)> = vec![];
        let mut deaths = 0;

        let order = mem::take(&mut self.order);
        let mut survivors = Vec::with_capacity(order.len());
        for id in order {
            if self.dies_of_age(id) {
                self.die(id);
                deaths += 1;
                continue;
            }

            self.wander(id);

            let rabbit = &self.rabbits[id];
            if rabbit.infected() {
                let loc = rabbit.loc();
                self.spread_infection(loc);
            }

            let rabbit = &mut self.rabbits[id];
            rabbit.grow(1);
            if !rabbit.infected() && rabbit.is_adult() {
                match rabbit.gender() {
                    Gender::Male => breedable_males += 1,
                    Gender::Female => breedable_females.push((rabbit.loc(), rabbit.colour())),
                }
            }

            survivors.push(id);
        }
        self.order = survivors;

        let mut births = 0;
        if breedable_males > 0 {
            for (mother_loc, colour) in breedable_females {
                if self.give_birth(mother_loc, colour) {
                    births += 1;
                }
            }
            self.write_roster();
        }

        if self.rabbits.len() > POPULATION_LIMIT {
            self.cull_overcrowding();
        }

        debug!(
            "Turn done: {births} born, {deaths} died, {} alive",
            self.rabbits.len()
        );
        TurnOutcome::Continuing
    }

    pub fn reset(&mut self) {
        self.rabbits.clear();
        self.order.clear();
        self.by_loc.clear();
        self.grid.clear(self.floor);
        self.spawn(INITIAL_POPULATION);
    }

    fn random_free_loc(&mut self) -> Loc {
        loop {
            let loc = Loc::new(
                self.dice.roll(0, self.grid.width() - 1) as i32,
                self.dice.roll(0, self.grid.height() - 1) as i32,
            );
            if !self.by_loc.contains_key(&loc) {
                return loc;
            }
        }
    }

    fn add(&mut self, rabbit: Rabbit) -> RabbitId {
        let loc = rabbit.loc();
        debug_assert!(self.grid.in_bounds(loc) && !self.by_loc.contains_key(&loc));

        Self::paint(&mut self.grid, &rabbit);
        self.narrative.write(&narrative::born(&rabbit));

        let id = self.rabbits.insert(rabbit);
        self.by_loc.insert(loc, id);
        self.order.push(id);
        id
    }

    /// Takes the rabbit off the grid and out of the index. The caller owns
    /// removing it from `order`.
    fn remove(&mut self, id: RabbitId) -> Option<Rabbit> {
        let rabbit = self.rabbits.remove(id)?;
        self.by_loc.remove(&rabbit.loc());
        self.grid.set(rabbit.loc(), self.floor);
        Some(rabbit)
    }

    fn paint(grid: &mut TileGrid<Tile>, rabbit: &Rabbit) {
        let tile = Tile::for_rabbit(rabbit.colour(), rabbit.age(), rabbit.infected());
        grid.set(rabbit.loc(), tile);
    }

    /// The lifespan is drawn afresh every turn, not fixed at birth.
    fn dies_of_age(&mut self, id: RabbitId) -> bool {
        let rabbit = &self.rabbits[id];
        let (low, high) = if rabbit.infected() {
            INFECTED_LIFESPAN
        } else {
            LIFESPAN
        };
        rabbit.age() >= self.dice.roll(low, high)
    }

    fn die(&mut self, id: RabbitId) {
        if let Some(rabbit) = self.remove(id) {
            self.narrative.write(&narrative::died(&rabbit));
        }
    }

    fn free_neighbor(&mut self, loc: Loc) -> Option<Loc> {
        self.dice
            .shuffled_directions()
            .into_iter()
            .map(|direction| loc.step(direction))
            .find(|neighbor| self.grid.in_bounds(*neighbor) && !self.by_loc.contains_key(neighbor))
    }

    fn wander(&mut self, id: RabbitId) {
        let from = self.rabbits[id].loc();
        let Some(to) = self.free_neighbor(from) else {
            return;
        };

        self.grid.set(from, self.floor);
        self.by_loc.remove(&from);
        self.by_loc.insert(to, id);

        let rabbit = &mut self.rabbits[id];
        rabbit.move_to(to);
        Self::paint(&mut self.grid, rabbit);
    }

    /// Infects at most one healthy neighbor.
    fn spread_infection(&mut self, from: Loc) {
        for direction in self.dice.shuffled_directions() {
            let Some(&id) = self.by_loc.get(&from.step(direction)) else {
                continue;
            };

            let victim = &mut self.rabbits[id];
            if !victim.infected() {
                victim.infect();
                Self::paint(&mut self.grid, victim);
                return;
            }
        }
    }

    fn give_birth(&mut self, mother_loc: Loc, colour: Colour) -> bool {
        let Some(loc) = self.free_neighbor(mother_loc) else {
            return false;
        };

        let newborn = Rabbit::born(loc, colour, &mut self.dice);
        let infected = newborn.infected();
        self.add(newborn);
        if infected {
            self.spread_infection(loc);
        }
        true
    }

    fn write_roster(&mut self) {
        let mut by_age: Vec<&Rabbit> = self.order.iter().map(|&id| &self.rabbits[id]).collect();
        by_age.sort_by_key(|rabbit| rabbit.age());
        let text = narrative::roster(by_age.into_iter());
        self.narrative.write(&text);
    }

    /// Cuts the population to exactly `POPULATION_LIMIT / 2`, choosing the
    /// survivors uniformly at random.
    fn cull_overcrowding(&mut self) {
        self.narrative.write(narrative::FOOD_SHORTAGE);

        let keep = POPULATION_LIMIT / 2;
        let mut culled: Vec<bool> = (0..self.order.len()).map(|i| i >= keep).collect();
        self.dice.shuffle(&mut culled);

        let order = mem::take(&mut self.order);
        let before = order.len();
        for (id, cull) in order.into_iter().zip(culled) {
            if cull {
                self.remove(id);
            } else {
                self.order.push(id);
            }
        }

        info!(
            "Food shortage: culled {} rabbits, {} remain",
            before - self.order.len(),
            self.order.len()
        );
    }
}
