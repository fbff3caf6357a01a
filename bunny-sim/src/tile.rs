use crate::rabbit::{Colour, ADULT_AGE};

/// What a grid cell looks like. Unoccupied cells are `Floor`; an occupied
/// cell shows its rabbit's colour, age class and infection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tile {
    Floor = 0,
    WhiteJuvenile,
    WhiteAdult,
    WhiteJuvenileMutant,
    WhiteAdultMutant,
    BrownJuvenile,
    BrownAdult,
    BrownJuvenileMutant,
    BrownAdultMutant,
    BlackJuvenile,
    BlackAdult,
    BlackJuvenileMutant,
    BlackAdultMutant,
    SpottedJuvenile,
    SpottedAdult,
    SpottedJuvenileMutant,
    SpottedAdultMutant,
}

impl Tile {
    pub const ALL: [Tile; 17] = [
        Tile::Floor,
        Tile::WhiteJuvenile,
        Tile::WhiteAdult,
        Tile::WhiteJuvenileMutant,
        Tile::WhiteAdultMutant,
        Tile::BrownJuvenile,
        Tile::BrownAdult,
        Tile::BrownJuvenileMutant,
        Tile::BrownAdultMutant,
        Tile::BlackJuvenile,
        Tile::BlackAdult,
        Tile::BlackJuvenileMutant,
        Tile::BlackAdultMutant,
        Tile::SpottedJuvenile,
        Tile::SpottedAdult,
        Tile::SpottedJuvenileMutant,
        Tile::SpottedAdultMutant,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn for_rabbit(colour: Colour, age: u32, infected: bool) -> Tile {
        let base = Self::base(colour, age >= ADULT_AGE);
        if infected { base.mutant() } else { base }
    }

    fn base(colour: Colour, adult: bool) -> Tile {
        match (colour, adult) {
            (Colour::White, false) => Tile::WhiteJuvenile,
            (Colour::White, true) => Tile::WhiteAdult,
            (Colour::Brown, false) => Tile::BrownJuvenile,
            (Colour::Brown, true) => Tile::BrownAdult,
            (Colour::Black, false) => Tile::BlackJuvenile,
            (Colour::Black, true) => Tile::BlackAdult,
            (Colour::Spotted, false) => Tile::SpottedJuvenile,
            (Colour::Spotted, true) => Tile::SpottedAdult,
        }
    }

    /// The infected look of a rabbit tile. `Floor` and tiles that are already
    /// mutant map to themselves.
    pub fn mutant(self) -> Tile {
        match self {
            Tile::WhiteJuvenile => Tile::WhiteJuvenileMutant,
            Tile::WhiteAdult => Tile::WhiteAdultMutant,
            Tile::BrownJuvenile => Tile::BrownJuvenileMutant,
            Tile::BrownAdult => Tile::BrownAdultMutant,
            Tile::BlackJuvenile => Tile::BlackJuvenileMutant,
            Tile::BlackAdult => Tile::BlackAdultMutant,
            Tile::SpottedJuvenile => Tile::SpottedJuvenileMutant,
            Tile::SpottedAdult => Tile::SpottedAdultMutant,
            other => other,
        }
    }
}
