use underdark_core::TileType;
use underdark_system_tilemap::GameTilemap;

const PLAYER_GLYPH: char = '@';

/// Character drawn for each tile type.
const fn glyph(tile: TileType) -> char {
    match tile {
        TileType::Void => '#',
        TileType::Entry => 'E',
        TileType::Exit => 'X',
        TileType::LockedExit => 'L',
        TileType::Gem => '*',
        TileType::HatchClosed => 'h',
        TileType::HatchDown => 'v',
        TileType::HatchUp => '^',
        TileType::Monster => 'M',
        TileType::SlenderDuck => 'S',
        TileType::DarkTar => '~',
        TileType::Empty => ' ',
        TileType::Path => '.',
    }
}

/// Draws the expanded grid one row per line, marking the player spawn.
pub(crate) fn render_tilemap(tilemap: &GameTilemap) -> String {
    let spawn_cell = tilemap.player_start().and_then(|start| {
        tilemap
            .tiles()
            .iter()
            .position(|&source| source == Some(start.tile))
    });
    let width = usize::from(tilemap.grid_size().get());

    let mut output = String::with_capacity(tilemap.tilemap().len() + width);
    for (row_index, row) in tilemap.rows().enumerate() {
        for (column, &tile) in row.iter().enumerate() {
            if spawn_cell == Some(row_index * width + column) {
                output.push(PLAYER_GLYPH);
            } else {
                output.push(glyph(tile));
            }
        }
        output.push('\n');
    }
    output
}
