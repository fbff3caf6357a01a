use bunny_sim::Tile;

// Juveniles are paler than adults; mutants are tinted sickly green.
pub fn color_rgba(tile: Tile) -> [u8; 4] {
    match tile {
        Tile::Floor => [0x5c, 0x43, 0x27, 0xff],
        Tile::WhiteJuvenile => [0xff, 0xff, 0xff, 0xff],
        Tile::WhiteAdult => [0xdc, 0xdc, 0xdc, 0xff],
        Tile::WhiteJuvenileMutant => [0xd8, 0xff, 0xc8, 0xff],
        Tile::WhiteAdultMutant => [0xa8, 0xe0, 0x90, 0xff],
        Tile::BrownJuvenile => [0xc8, 0x96, 0x64, 0xff],
        Tile::BrownAdult => [0x96, 0x64, 0x32, 0xff],
        Tile::BrownJuvenileMutant => [0xa0, 0xb4, 0x50, 0xff],
        Tile::BrownAdultMutant => [0x6e, 0x8c, 0x28, 0xff],
        Tile::BlackJuvenile => [0x50, 0x50, 0x50, 0xff],
        Tile::BlackAdult => [0x14, 0x14, 0x14, 0xff],
        Tile::BlackJuvenileMutant => [0x3c, 0x64, 0x3c, 0xff],
        Tile::BlackAdultMutant => [0x1e, 0x46, 0x1e, 0xff],
        Tile::SpottedJuvenile => [0xe6, 0xc8, 0xa0, 0xff],
        Tile::SpottedAdult => [0xbe, 0x8c, 0x5a, 0xff],
        Tile::SpottedJuvenileMutant => [0xbe, 0xdc, 0x8c, 0xff],
        Tile::SpottedAdultMutant => [0x8c, 0xb4, 0x5a, 0xff],
    }
}
