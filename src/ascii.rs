use sprawl_chunk::ChunkData;
use sprawl_tiles::{Biome, RoadTile, TileKind, TileRegistry};

fn ground_glyph(b: Biome) -> char {
    match b {
        Biome::Desert => '.',
        Biome::Plains => ',',
        Biome::WildWest => '\'',
        Biome::Tundra => '_',
        Biome::Water => '~',
    }
}

fn tile_glyph(kind: TileKind) -> char {
    match kind {
        TileKind::Ground(b) => ground_glyph(b),
        TileKind::Decoration { .. } => '*',
        TileKind::Structure { .. } => 'B',
        TileKind::Road(RoadTile::Junction) => '+',
        TileKind::Road(RoadTile::CrosswalkHeight | RoadTile::CrosswalkWidth) => ':',
        TileKind::Road(r) if r.is_vertical_lane() => '|',
        TileKind::Road(_) => '=',
    }
}

/// One character per tile, north row first.
pub fn render_ascii(chunk: &ChunkData, tiles: &TileRegistry) -> String {
    let (w, h) = (chunk.terrain_layer.width(), chunk.terrain_layer.height());
    let mut out = String::with_capacity((w + 1) * h);
    for y in (0..h).rev() {
        for x in 0..w {
            let c = match chunk.terrain_layer.value(x, y) {
                Some(id) => tile_glyph(tiles.kind(id)),
                None => ground_glyph(chunk.biome_layer.value(x, y)),
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}
