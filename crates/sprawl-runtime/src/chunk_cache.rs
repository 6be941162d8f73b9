use std::sync::Arc;

use hashbrown::HashMap;
use sprawl_chunk::ChunkData;
use sprawl_world::ChunkCoord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

struct Slot {
    chunk: Arc<ChunkData>,
    last_used: u64,
}

/// Capacity-bounded LRU of generated chunks, owned by the streamer. Chunks
/// are pure functions of the world, so an evicted chunk is generated again.
pub struct ChunkCache {
    slots: HashMap<ChunkCoord, Slot>,
    capacity: usize,
    clock: u64,
    stats: ChunkCacheStats,
}

impl ChunkCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: HashMap::new(),
            capacity,
            clock: 0,
            stats: ChunkCacheStats::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.slots.contains_key(&coord)
    }

    /// Marks the chunk as most recently used.
    pub fn get(&mut self, coord: ChunkCoord) -> Option<Arc<ChunkData>> {
        self.clock += 1;
        match self.slots.get_mut(&coord) {
            Some(slot) => {
                slot.last_used = self.clock;
                self.stats.hits += 1;
                Some(Arc::clone(&slot.chunk))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, chunk: Arc<ChunkData>) {
        self.clock += 1;
        self.slots.insert(
            chunk.coord,
            Slot {
                chunk,
                last_used: self.clock,
            },
        );
        while self.slots.len() > self.capacity {
            let Some(oldest) = self
                .slots
                .iter()
                .min_by_key(|(_, s)| s.last_used)
                .map(|(c, _)| *c)
            else {
                break;
            };
            self.slots.remove(&oldest);
            self.stats.evictions += 1;
        }
    }

    pub fn stats(&self) -> ChunkCacheStats {
        ChunkCacheStats {
            entries: self.slots.len(),
            ..self.stats
        }
    }
}
