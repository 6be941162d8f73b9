//! Chunk snapshots and the generation pipeline that fills them.
#![forbid(unsafe_code)]

pub mod overview;
mod road_rects;

use serde::Serialize;
use sprawl_geom::Grid;
use sprawl_tiles::TileRegistry;
use sprawl_world::decorations::place_decorations;
use sprawl_world::roads::RoadCollapser;
use sprawl_world::seed::{SALT_DECORATIONS, SALT_ROADS, SALT_STRUCTURES, stream_rng};
use sprawl_world::structures::place_structures;
use sprawl_world::water::trace_water;
use sprawl_world::{
    BiomeGrid, ChunkCoord, ChunkTiming, GenCtx, GenStage, ObjectKind, PlacementObject, RoadStats,
    TerrainGrid, World, WorldGenParams, WorldObject,
};

pub use road_rects::merge_road_rects;

/// One generated chunk. Immutable once returned.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChunkData {
    pub coord: ChunkCoord,
    pub biome_layer: BiomeGrid,
    pub terrain_layer: TerrainGrid,
    pub objects: Vec<PlacementObject>,
    /// `true` where movement is blocked.
    pub walkability: Grid<bool>,
    pub road_stats: RoadStats,
}

impl ChunkData {
    #[inline]
    pub fn size(&self) -> usize {
        self.biome_layer.width()
    }

    #[inline]
    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.walkability.value(x, y)
    }

    pub fn objects_of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &PlacementObject> {
        self.objects.iter().filter(move |o| o.kind == kind)
    }

    pub fn count_of_kind(&self, kind: ObjectKind) -> usize {
        self.objects_of_kind(kind).count()
    }

    /// Objects in world units, offset by the chunk origin.
    pub fn world_objects(&self, params: &WorldGenParams) -> Vec<WorldObject> {
        let unit = params.tile_world_size();
        let s = params.chunk_world_size();
        let origin = [self.coord.cx as f32 * s, self.coord.cy as f32 * s];
        self.objects
            .iter()
            .map(|o| WorldObject::from_placement(o, unit, origin))
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct ChunkGenerateResult {
    pub data: ChunkData,
    pub timing: ChunkTiming,
}

pub fn generate_chunk(world: &World, coord: ChunkCoord) -> ChunkGenerateResult {
    let mut ctx = world.make_gen_ctx();
    generate_chunk_with_ctx(world, coord, &mut ctx)
}

pub fn generate_chunk_with_ctx(world: &World, coord: ChunkCoord, ctx: &mut GenCtx) -> ChunkGenerateResult {
    let params = &*world.params;
    let tiles = &*world.tiles;
    let w = params.chunk_tiles();
    ctx.profiler.reset();

    ctx.profiler.begin_stage(GenStage::Biomes);
    let biomes = ctx.biomes.fill_chunk(coord);

    ctx.profiler.begin_stage(GenStage::Roads);
    let borders = ctx.edges.chunk_borders(coord);
    let mut terrain: TerrainGrid = Grid::new(w, w, None);
    let mut rng = stream_rng(world.seed, coord.cx, coord.cy, SALT_ROADS);
    let layout = RoadCollapser::new(params, tiles, &biomes, &borders).run(&mut terrain, &mut rng);
    if layout.stats.unreached > 0 || layout.stats.contradictions > 0 {
        log::debug!(
            target: "worldgen",
            "roads_incomplete coord={} unreached={} contradictions={}",
            coord,
            layout.stats.unreached,
            layout.stats.contradictions
        );
    }

    ctx.profiler.begin_stage(GenStage::Structures);
    let mut rng = stream_rng(world.seed, coord.cx, coord.cy, SALT_STRUCTURES);
    let structures = place_structures(&layout, &biomes, &mut terrain, params, tiles, &mut rng);

    ctx.profiler.begin_stage(GenStage::Decorations);
    let mut rng = stream_rng(world.seed, coord.cx, coord.cy, SALT_DECORATIONS);
    let decorations = place_decorations(&biomes, &mut terrain, params, tiles, &mut rng);

    ctx.profiler.begin_stage(GenStage::Water);
    let water = trace_water(&biomes);

    ctx.profiler.begin_stage(GenStage::Assemble);
    let mut objects = merge_road_rects(&terrain, tiles);
    objects.extend(structures);
    objects.extend(decorations);
    objects.extend(
        water
            .polygons
            .into_iter()
            .map(|p| PlacementObject::polygon(ObjectKind::Water, p)),
    );
    let walkability = walkability_mask(&biomes, &terrain, tiles);
    let timing = ctx.profiler.snapshot();

    log::debug!(
        target: "worldgen",
        "chunk_gen coord={} objects={} roads_collapsed={} water_regions={} total_us={}",
        coord,
        objects.len(),
        layout.stats.collapsed + layout.stats.seeded,
        water.regions,
        timing.total_us
    );

    ChunkGenerateResult {
        data: ChunkData {
            coord,
            biome_layer: biomes,
            terrain_layer: terrain,
            objects,
            walkability,
            road_stats: layout.stats,
        },
        timing,
    }
}

/// Water, decorations and structure footprints block; roads and bare ground do not.
pub fn walkability_mask(biomes: &BiomeGrid, terrain: &TerrainGrid, tiles: &TileRegistry) -> Grid<bool> {
    Grid::from_fn(biomes.width(), biomes.height(), |x, y| {
        !biomes.value(x, y).is_land() || terrain.value(x, y).is_some_and(|id| tiles.blocks_walk(id))
    })
}
