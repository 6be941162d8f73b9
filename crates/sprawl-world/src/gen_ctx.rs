use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use sprawl_tiles::TileRegistry;

use crate::biome::BiomeField;
use crate::edges::EdgeSampler;
use crate::worldgen::WorldGenParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenStage {
    Biomes,
    Roads,
    Structures,
    Decorations,
    Water,
    Assemble,
}

pub const GEN_STAGE_COUNT: usize = 6;
pub const GEN_STAGE_LABELS: [&str; GEN_STAGE_COUNT] =
    ["biomes", "roads", "structures", "decorations", "water", "assemble"];

impl GenStage {
    pub const ALL: [GenStage; GEN_STAGE_COUNT] = [
        GenStage::Biomes,
        GenStage::Roads,
        GenStage::Structures,
        GenStage::Decorations,
        GenStage::Water,
        GenStage::Assemble,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            GenStage::Biomes => 0,
            GenStage::Roads => 1,
            GenStage::Structures => 2,
            GenStage::Decorations => 3,
            GenStage::Water => 4,
            GenStage::Assemble => 5,
        }
    }

    #[inline]
    pub const fn label(self) -> &'static str {
        GEN_STAGE_LABELS[self.index()]
    }
}

/// Per-stage wall time of one chunk, in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChunkTiming {
    pub stage_us: [u64; GEN_STAGE_COUNT],
    pub total_us: u64,
}

impl ChunkTiming {
    #[inline]
    pub fn stage(&self, stage: GenStage) -> Duration {
        Duration::from_micros(self.stage_us[stage.index()])
    }

    pub fn accumulate(&mut self, other: &ChunkTiming) {
        for (a, b) in self.stage_us.iter_mut().zip(other.stage_us.iter()) {
            *a += *b;
        }
        self.total_us += other.total_us;
    }
}

#[derive(Debug)]
pub struct GenProfiler {
    started: Instant,
    current: Option<(GenStage, Instant)>,
    stage_us: [u64; GEN_STAGE_COUNT],
}

impl Default for GenProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl GenProfiler {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            current: None,
            stage_us: [0; GEN_STAGE_COUNT],
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Closes the running stage, if any, and opens `stage`.
    pub fn begin_stage(&mut self, stage: GenStage) {
        self.end_stage();
        self.current = Some((stage, Instant::now()));
    }

    pub fn end_stage(&mut self) {
        if let Some((stage, t0)) = self.current.take() {
            self.record_stage_duration(stage, t0.elapsed());
        }
    }

    #[inline]
    pub fn record_stage_duration(&mut self, stage: GenStage, elapsed: Duration) {
        self.stage_us[stage.index()] += elapsed.as_micros() as u64;
    }

    pub fn snapshot(&mut self) -> ChunkTiming {
        self.end_stage();
        ChunkTiming {
            stage_us: self.stage_us,
            total_us: self.started.elapsed().as_micros() as u64,
        }
    }
}

/// Per-call generation state. Built fresh for every chunk so calls never
/// share mutable state.
pub struct GenCtx {
    pub seed: i64,
    pub biomes: BiomeField,
    pub edges: EdgeSampler,
    pub params: Arc<WorldGenParams>,
    pub tiles: Arc<TileRegistry>,
    pub profiler: GenProfiler,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_closes_open_stage() {
        let mut p = GenProfiler::new();
        p.record_stage_duration(GenStage::Roads, Duration::from_micros(250));
        p.begin_stage(GenStage::Water);
        std::thread::sleep(Duration::from_millis(2));
        let t = p.snapshot();
        assert_eq!(t.stage(GenStage::Roads), Duration::from_micros(250));
        assert!(t.stage(GenStage::Water) >= Duration::from_millis(2));
        assert!(t.total_us >= t.stage_us[GenStage::Water.index()]);
    }

    #[test]
    fn accumulate_sums_per_stage() {
        let mut sum = ChunkTiming::default();
        let mut one = ChunkTiming::default();
        one.stage_us[GenStage::Roads.index()] = 30;
        one.total_us = 50;
        sum.accumulate(&one);
        sum.accumulate(&one);
        assert_eq!(sum.stage(GenStage::Roads), Duration::from_micros(60));
        assert_eq!(sum.stage(GenStage::Water), Duration::ZERO);
        assert_eq!(sum.total_us, 100);
    }

    #[test]
    fn labels_follow_stage_order() {
        for s in GenStage::ALL {
            assert_eq!(GEN_STAGE_LABELS[s.index()], s.label());
        }
    }
}
