use std::sync::Arc;
use std::time::Duration;

use sprawl_chunk::generate_chunk;
use sprawl_runtime::ChunkStreamer;
use sprawl_world::{ChunkCoord, ObjectKind, World, WorldGenParams, WorldShape};

fn streamer(radius: i32, cache: usize) -> ChunkStreamer {
    let params = WorldGenParams {
        load_radius: radius,
        workers: 2,
        cache_capacity: cache,
        road_density: 0.4,
        ..WorldGenParams::default()
    };
    ChunkStreamer::new(Arc::new(World::new(9, params))).unwrap()
}

const WAIT: Duration = Duration::from_secs(120);

#[test]
fn loads_the_square_around_the_centre() {
    let mut s = streamer(1, 64);
    assert_eq!(s.set_center(ChunkCoord::new(0, 0)), 9);
    assert_eq!(s.set_center(ChunkCoord::new(0, 0)), 0);
    let ready = s.wait_idle(WAIT);
    assert_eq!(ready.len(), 9);
    let mut expected: Vec<ChunkCoord> = ChunkCoord::new(0, 0).square(1).collect();
    expected.sort_unstable();
    assert_eq!(s.loaded_coords(), expected);
    assert_eq!(s.pending_count(), 0);
}

#[test]
fn moving_reuses_cached_chunks() {
    let mut s = streamer(1, 64);
    s.set_center(ChunkCoord::new(0, 0));
    s.wait_idle(WAIT);
    // shift east: one new column of three
    assert_eq!(s.set_center(ChunkCoord::new(1, 0)), 3);
    s.wait_idle(WAIT);
    assert!(s.get(ChunkCoord::new(-1, 0)).is_none());
    // back west: the dropped column comes from the cache
    assert_eq!(s.set_center(ChunkCoord::new(0, 0)), 0);
    assert!(s.get(ChunkCoord::new(-1, 0)).is_some());
    assert!(s.cache_stats().hits >= 3);
}

#[test]
fn streamed_chunks_match_direct_generation() {
    let mut s = streamer(0, 8);
    let coord = ChunkCoord::new(-4, 7);
    s.set_center(coord);
    s.wait_idle(WAIT);
    let streamed = s.get(coord).cloned().unwrap();
    let direct = generate_chunk(s.world(), coord).data;
    assert_eq!(*streamed, direct);
    assert_eq!(*s.load_blocking(coord), direct);
}

#[test]
fn load_blocking_outside_window_only_caches() {
    let mut s = streamer(0, 8);
    s.set_center(ChunkCoord::new(0, 0));
    let far = ChunkCoord::new(10, 10);
    let chunk = s.load_blocking(far);
    assert_eq!(chunk.coord, far);
    assert!(s.get(far).is_none());
    assert!(s.is_cached(far));
}

#[test]
fn walk_window_and_objects_cover_loaded_chunks() {
    let mut s = streamer(1, 64);
    assert!(s.walk_window().is_none());
    s.set_center(ChunkCoord::new(2, -1));
    s.wait_idle(WAIT);
    let window = s.walk_window().unwrap();
    let w = s.world().chunk_tiles();
    assert_eq!(window.blocked.width(), 3 * w);
    let expected: usize = s
        .loaded_coords()
        .iter()
        .map(|c| s.get(*c).map_or(0, |d| d.walkability.count(|b| *b)))
        .sum();
    assert_eq!(window.blocked_count(), expected);

    let size = s.world().params.chunk_world_size();
    let [x0, y0] = s.world().chunk_world_origin(ChunkCoord::new(1, -2));
    for obj in s.objects_of_kind(ObjectKind::RoadVertical) {
        assert_eq!(obj.kind, ObjectKind::RoadVertical);
        let WorldShape::Rect(r) = obj.shape else {
            panic!("road without a rect");
        };
        assert!(r.x >= x0 && r.x + r.w <= x0 + 3.0 * size);
        assert!(r.y >= y0 && r.y + r.h <= y0 + 3.0 * size);
    }
    assert_eq!(s.chunk_of_world(x0 + 0.5, y0 + 0.5), ChunkCoord::new(1, -2));
}
