use bunny_sim::{
    Gender, Loc, Population, Random, RabbitId, Tile, TileGrid, TurnOutcome, INITIAL_POPULATION,
    POPULATION_LIMIT,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn seeded_population(width: u32, height: u32, seed: u64) -> Population<String> {
    Population::new(
        TileGrid::new(width, height, 16, Tile::Floor),
        Tile::Floor,
        String::new(),
        Random::from_seed(seed),
    )
}

fn check_index(population: &Population<String>) {
    let indexed: HashMap<Loc, RabbitId> = population.occupied().collect();
    let live: HashMap<Loc, RabbitId> = population
        .rabbits()
        .map(|(id, rabbit)| (rabbit.loc(), id))
        .collect();
    assert_eq!(live.len(), population.len(), "two rabbits share a cell");
    assert_eq!(indexed, live);
}

fn check_grid(population: &Population<String>) {
    let grid = population.grid();
    for row in 0..grid.height() as i32 {
        for col in 0..grid.width() as i32 {
            let loc = Loc::new(col, row);
            let tile = grid.get(loc);
            match population.occupant(loc).and_then(|id| population.get(id)) {
                Some(rabbit) => {
                    assert_ne!(tile, population.floor_tile());
                    assert_eq!(tile == tile.mutant(), rabbit.infected());
                }
                None => assert_eq!(tile, population.floor_tile()),
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn turns_keep_index_grid_and_rabbits_in_step(seed in any::<u64>(), turns in 1usize..40) {
        let mut population = seeded_population(20, 20, seed);
        population.spawn(30);
        check_index(&population);
        check_grid(&population);

        for _ in 0..turns {
            let before: HashMap<RabbitId, (u32, bool)> = population
                .rabbits()
                .map(|(id, rabbit)| (id, (rabbit.age(), rabbit.infected())))
                .collect();

            population.next_turn();

            check_index(&population);
            check_grid(&population);
            for (id, rabbit) in population.rabbits() {
                if let Some(&(age, infected)) = before.get(&id) {
                    prop_assert_eq!(rabbit.age(), age + 1);
                    prop_assert!(rabbit.infected() || !infected);
                } else {
                    prop_assert_eq!(rabbit.age(), 0);
                }
            }
        }
    }

    #[test]
    fn reset_always_restores_the_initial_population(seed in any::<u64>(), turns in 0usize..10) {
        let mut population = seeded_population(15, 15, seed);
        population.spawn(60);
        for _ in 0..turns {
            population.next_turn();
        }

        population.reset();

        prop_assert_eq!(population.len(), INITIAL_POPULATION);
        check_index(&population);
        check_grid(&population);
    }
}

#[test]
fn same_seed_same_story() {
    let mut a = seeded_population(16, 16, 99);
    let mut b = seeded_population(16, 16, 99);
    a.spawn(20);
    b.spawn(20);
    for _ in 0..15 {
        a.next_turn();
        b.next_turn();
    }
    assert_eq!(a.narrative(), b.narrative());
    assert_eq!(
        a.grid().cells_iter().collect::<Vec<_>>(),
        b.grid().cells_iter().collect::<Vec<_>>()
    );
}

#[test]
fn population_runs_until_it_dies_out_or_settles() {
    let mut population = seeded_population(10, 10, 5);
    population.spawn(INITIAL_POPULATION);
    let mut finished = false;
    for _ in 0..200 {
        if population.next_turn() == TurnOutcome::Finished {
            finished = true;
            break;
        }
        assert!(population.len() <= 100);
    }
    if finished {
        assert!(population.is_empty());
        population.grid_mut().drain_changed();
        assert_eq!(population.next_turn(), TurnOutcome::Finished);
        assert!(population.grid().changed().is_empty());
    }
}

#[test]
fn overcrowding_is_culled_to_half_the_limit() {
    let mut population = seeded_population(60, 60, 31);
    population.spawn(1100);

    let mut shortages = 0;
    for _ in 0..10 {
        population.next_turn();

        let len = population.len();
        assert!(len <= POPULATION_LIMIT, "{len} alive");
        let count = population.narrative().matches("Food shortage occurred!").count();
        if count > shortages {
            shortages = count;
            assert_eq!(len, POPULATION_LIMIT / 2);
        }
        check_index(&population);
        check_grid(&population);
    }
    assert!(shortages > 0);

    let floor = population
        .grid()
        .cells_iter()
        .filter(|&&tile| tile == population.floor_tile())
        .count();
    assert_eq!(floor, 3600 - population.len());
}

#[test]
fn roster_follows_breedable_males() {
    let mut population = seeded_population(10, 10, 12);
    population.spawn(40);
    assert_eq!(population.narrative().matches("was born!").count(), 40);

    let mut rosters = 0;
    for _ in 0..10 {
        let any_male = population
            .rabbits()
            .any(|(_, rabbit)| rabbit.gender() == Gender::Male);
        let before: HashSet<RabbitId> = population.rabbits().map(|(id, _)| id).collect();
        population.narrative_mut().clear();

        population.next_turn();

        // A healthy adult male who lived through the turn was healthy and
        // adult when he took his step, so he unlocked breeding.
        let had_breeder = population.rabbits().any(|(id, rabbit)| {
            before.contains(&id)
                && rabbit.gender() == Gender::Male
                && rabbit.is_adult()
                && !rabbit.infected()
        });
        let roster = population.narrative().contains("Bunnies remaining: \n");
        if had_breeder {
            assert!(roster);
        }
        if !any_male {
            assert!(!roster);
        }
        if roster {
            rosters += 1;
            for (_, rabbit) in population.rabbits() {
                let entry = format!("at ({}, {})", rabbit.loc().col, rabbit.loc().row);
                assert!(population.narrative().contains(&entry));
            }
        }
    }
    assert!(rosters > 0);
}
