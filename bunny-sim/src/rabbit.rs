use std::fmt;
use tile_grid::{Dice, Loc};

/// Rabbits younger than this are juveniles: drawn small and unable to breed.
pub const ADULT_AGE: u32 = 2;

const MAX_SPAWN_AGE: u32 = 10;
const INFECTED_AT_BIRTH_ODDS: u32 = 100;

pub const NAMES: [&str; 40] = [
    "Thumper", "Clover", "Hazel", "Fiver", "Bigwig", "Blackberry", "Dandelion", "Pipkin",
    "Silver", "Holly", "Bluebell", "Strawberry", "Hyzenthlay", "Kehaar", "Cowslip", "Primrose",
    "Buttercup", "Nutmeg", "Pepper", "Biscuit", "Mochi", "Oreo", "Willow", "Juniper", "Basil",
    "Marigold", "Pumpkin", "Snowball", "Cinnamon", "Barley", "Thistle", "Bramble", "Poppy",
    "Sorrel", "Tansy", "Bilberry", "Flopsy", "Mopsy", "Cottontail", "Peter",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Brown,
    Black,
    Spotted,
}

impl Colour {
    pub const ALL: [Colour; 4] = [Colour::White, Colour::Brown, Colour::Black, Colour::Spotted];

    fn random(dice: &mut impl Dice) -> Self {
        Self::ALL[dice.roll(0, Self::ALL.len() as u32 - 1) as usize]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Colour::White => "white",
            Colour::Brown => "brown",
            Colour::Black => "black",
            Colour::Spotted => "spotted",
        })
    }
}

#[derive(Clone, Debug)]
pub struct Rabbit {
    gender: Gender,
    colour: Colour,
    age: u32,
    name: &'static str,
    infected: bool,
    loc: Loc,
}

impl Rabbit {
    /// A rabbit for the initial population: everything but the location is random.
    pub fn spawn(loc: Loc, dice: &mut impl Dice) -> Self {
        let gender = Self::random_gender(dice);
        let colour = Colour::random(dice);
        let age = dice.roll(0, MAX_SPAWN_AGE);
        Self {
            gender,
            colour,
            age,
            name: Self::random_name(dice),
            infected: dice.one_in(INFECTED_AT_BIRTH_ODDS),
            loc,
        }
    }

    /// A newborn takes its colour from its mother.
    pub fn born(loc: Loc, colour: Colour, dice: &mut impl Dice) -> Self {
        let gender = Self::random_gender(dice);
        Self {
            gender,
            colour,
            age: 0,
            name: Self::random_name(dice),
            infected: dice.one_in(INFECTED_AT_BIRTH_ODDS),
            loc,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_traits(loc: Loc, gender: Gender, colour: Colour, age: u32) -> Self {
        Self {
            gender,
            colour,
            age,
            name: NAMES[0],
            infected: false,
            loc,
        }
    }

    fn random_gender(dice: &mut impl Dice) -> Gender {
        if dice.roll(0, 1) == 0 {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    fn random_name(dice: &mut impl Dice) -> &'static str {
        NAMES[dice.roll(0, NAMES.len() as u32 - 1) as usize]
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn infected(&self) -> bool {
        self.infected
    }

    pub fn loc(&self) -> Loc {
        self.loc
    }

    pub fn is_adult(&self) -> bool {
        self.age >= ADULT_AGE
    }

    pub fn grow(&mut self, years: u32) {
        self.age += years;
    }

    pub fn infect(&mut self) {
        self.infected = true;
    }

    pub(crate) fn move_to(&mut self, loc: Loc) {
        self.loc = loc;
    }
}
