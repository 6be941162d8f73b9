use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Per-stream salts. Each generation stage draws from its own stream so
/// adding draws in one stage never shifts another.
pub const SALT_EDGE: u32 = 0x5EA7_0001;
pub const SALT_ROADS: u32 = 0x5EA7_0002;
pub const SALT_STRUCTURES: u32 = 0x5EA7_0003;
pub const SALT_DECORATIONS: u32 = 0x5EA7_0004;

#[inline]
pub fn hash2(ix: i32, iy: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iy as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Folds a world seed into the 32 bits `fastnoise-lite` takes.
#[inline]
pub fn noise_seed(world_seed: i64) -> i32 {
    (world_seed ^ (world_seed >> 32)) as i32
}

/// 64-bit stream seed for `(world seed, x, y, salt)`. Both halves of the
/// world seed reach both halves of the result.
pub fn stream_seed(world_seed: i64, x: i32, y: i32, salt: u32) -> u64 {
    let low = world_seed as u32;
    let high = (world_seed >> 32) as u32;
    let s = low ^ salt;
    let lo = hash2(x, y, s.wrapping_add(0x9E37_79B9) ^ high.rotate_left(7));
    let hi = hash2(y, x, s.rotate_left(13) ^ 0x632B_E5AB ^ high.wrapping_mul(0x9E37_79B9));
    (u64::from(hi) << 32) | u64::from(lo)
}

pub fn stream_rng(world_seed: i64, x: i32, y: i32, salt: u32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(stream_seed(world_seed, x, y, salt))
}
