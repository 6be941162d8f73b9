//! Chunk streaming around a moving centre (generation pool, cache, walk window).
#![forbid(unsafe_code)]

mod chunk_cache;
mod walk;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use hashbrown::{HashMap, HashSet};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use sprawl_chunk::{ChunkData, generate_chunk};
use sprawl_world::{ChunkCoord, ChunkTiming, ObjectKind, World, WorldObject};

pub use chunk_cache::{ChunkCache, ChunkCacheStats};
pub use walk::{WalkWindow, stitch_walkability};

/// Result of one background generation job.
pub struct GenOut {
    pub coord: ChunkCoord,
    pub data: ChunkData,
    pub timing: ChunkTiming,
    pub t_total_ms: u32,
}

fn process_gen_job(world: &World, coord: ChunkCoord, tx: &Sender<GenOut>) {
    let t0 = Instant::now();
    let res = generate_chunk(world, coord);
    let t_total_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    let _ = tx.send(GenOut {
        coord,
        data: res.data,
        timing: res.timing,
        t_total_ms,
    });
}

/// Keeps the square of chunks around a centre chunk loaded. Generation runs
/// on a rayon pool; results come back through `poll`.
pub struct ChunkStreamer {
    world: Arc<World>,
    pool: Arc<ThreadPool>,
    res_tx: Sender<GenOut>,
    res_rx: Receiver<GenOut>,
    cache: ChunkCache,
    loaded: HashMap<ChunkCoord, Arc<ChunkData>>,
    pending: HashSet<ChunkCoord>,
    center: Option<ChunkCoord>,
    radius: i32,
    pub workers: usize,
}

impl ChunkStreamer {
    pub fn new(world: Arc<World>) -> Result<Self, ThreadPoolBuildError> {
        let workers = match world.params.workers {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
            n => n,
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sprawl-gen-{i}"))
            .build()?;
        let (res_tx, res_rx) = unbounded::<GenOut>();
        let cache = ChunkCache::new(world.params.cache_capacity);
        let radius = world.params.load_radius;
        log::info!(
            target: "runtime",
            "streamer_start workers={} radius={} cache_capacity={}",
            workers,
            radius,
            cache.capacity()
        );
        Ok(Self {
            world,
            pool: Arc::new(pool),
            res_tx,
            res_rx,
            cache,
            loaded: HashMap::new(),
            pending: HashSet::new(),
            center: None,
            radius,
            workers,
        })
    }

    #[inline]
    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    #[inline]
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn cache_stats(&self) -> ChunkCacheStats {
        self.cache.stats()
    }

    #[inline]
    pub fn is_cached(&self, coord: ChunkCoord) -> bool {
        self.cache.contains(coord)
    }

    #[inline]
    pub fn chunk_of_world(&self, x: f32, y: f32) -> ChunkCoord {
        self.world.chunk_of_world(x, y)
    }

    fn in_window(&self, coord: ChunkCoord) -> bool {
        self.center
            .is_some_and(|c| c.ring_distance(coord) <= self.radius)
    }

    /// Moves the window. Chunks leaving it are dropped from the loaded set
    /// but stay in the cache; missing chunks are taken from the cache or
    /// scheduled. Returns how many jobs were scheduled.
    pub fn set_center(&mut self, center: ChunkCoord) -> usize {
        if self.center == Some(center) {
            return 0;
        }
        self.center = Some(center);
        let radius = self.radius;
        let before = self.loaded.len();
        self.loaded.retain(|c, _| c.ring_distance(center) <= radius);
        let dropped = before - self.loaded.len();

        let mut scheduled = 0;
        let mut from_cache = 0;
        for coord in center.square(radius) {
            if self.loaded.contains_key(&coord) || self.pending.contains(&coord) {
                continue;
            }
            if let Some(chunk) = self.cache.get(coord) {
                self.loaded.insert(coord, chunk);
                from_cache += 1;
                continue;
            }
            self.schedule(coord);
            scheduled += 1;
        }
        log::debug!(
            target: "runtime",
            "set_center center={} scheduled={} from_cache={} dropped={}",
            center,
            scheduled,
            from_cache,
            dropped
        );
        scheduled
    }

    fn schedule(&mut self, coord: ChunkCoord) {
        self.pending.insert(coord);
        let world = Arc::clone(&self.world);
        let tx = self.res_tx.clone();
        self.pool.spawn(move || {
            process_gen_job(world.as_ref(), coord, &tx);
        });
    }

    /// Drains finished jobs without blocking. Returns the chunks that
    /// entered the loaded set.
    pub fn poll(&mut self) -> Vec<ChunkCoord> {
        let outs: Vec<GenOut> = self.res_rx.try_iter().collect();
        outs.into_iter().filter_map(|out| self.accept(out)).collect()
    }

    /// Blocks until nothing is pending or `timeout` elapses. Returns the
    /// chunks that entered the loaded set.
    pub fn wait_idle(&mut self, timeout: Duration) -> Vec<ChunkCoord> {
        let deadline = Instant::now() + timeout;
        let mut accepted = self.poll();
        while !self.pending.is_empty() {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.res_rx.recv_timeout(left) {
                Ok(out) => accepted.extend(self.accept(out)),
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!(target: "runtime", "wait_idle_timeout pending={}", self.pending.len());
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        accepted
    }

    fn accept(&mut self, out: GenOut) -> Option<ChunkCoord> {
        let GenOut {
            coord,
            data,
            timing,
            t_total_ms,
        } = out;
        self.pending.remove(&coord);
        log::debug!(
            target: "runtime",
            "chunk_ready coord={} ms={} gen_us={} objects={}",
            coord,
            t_total_ms,
            timing.total_us,
            data.objects.len()
        );
        let chunk = Arc::new(data);
        self.cache.insert(Arc::clone(&chunk));
        if self.in_window(coord) {
            self.loaded.insert(coord, chunk);
            Some(coord)
        } else {
            None
        }
    }

    /// Returns the chunk, generating it on the calling thread if neither
    /// loaded nor cached.
    pub fn load_blocking(&mut self, coord: ChunkCoord) -> Arc<ChunkData> {
        if let Some(chunk) = self.loaded.get(&coord) {
            return Arc::clone(chunk);
        }
        let chunk = match self.cache.get(coord) {
            Some(chunk) => chunk,
            None => {
                let chunk = Arc::new(generate_chunk(&self.world, coord).data);
                self.cache.insert(Arc::clone(&chunk));
                chunk
            }
        };
        if self.in_window(coord) {
            self.loaded.insert(coord, Arc::clone(&chunk));
        }
        chunk
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Arc<ChunkData>> {
        self.loaded.get(&coord)
    }

    /// Loaded coordinates, sorted.
    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.loaded.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Walk mask over the current window; `None` before the first `set_center`.
    pub fn walk_window(&self) -> Option<WalkWindow> {
        let center = self.center?;
        Some(stitch_walkability(
            center,
            self.radius,
            self.world.chunk_tiles(),
            |c| self.loaded.get(&c).map(|a| a.as_ref()),
        ))
    }

    /// World-space objects of one kind over every loaded chunk, in chunk order.
    pub fn objects_of_kind(&self, kind: ObjectKind) -> Vec<WorldObject> {
        let params = &self.world.params;
        let unit = params.tile_world_size();
        let mut out = Vec::new();
        for coord in self.loaded_coords() {
            let Some(chunk) = self.loaded.get(&coord) else {
                continue;
            };
            let origin = self.world.chunk_world_origin(coord);
            out.extend(
                chunk
                    .objects_of_kind(kind)
                    .map(|o| WorldObject::from_placement(o, unit, origin)),
            );
        }
        out
    }
}
