// Redstone Engine Constants - SINGLE SOURCE OF TRUTH
//
// Numeric constants shared by world storage, the update scheduler and the
// redstone blocks. Do NOT redefine these anywhere else in the codebase!

/// Core world constants
pub mod core {
    /// Chunks are 16×16×16 cubes of blocks
    pub const CHUNK_SIZE: u32 = 16;
    pub const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
    pub const BLOCKS_PER_CHUNK: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

    /// Maximum light level for both sky and block light
    pub const MAX_LIGHT_LEVEL: u8 = 15;
}

/// Redstone signal constants
pub mod redstone {
    /// Strongest signal a component can carry
    pub const MAX_SIGNAL_STRENGTH: u8 = 15;
    /// Number of distinct signal strengths (0..=MAX_SIGNAL_STRENGTH)
    pub const SIGNAL_STRENGTH_COUNT: usize = MAX_SIGNAL_STRENGTH as usize + 1;
    /// Manhattan radius of the neighborhood re-queued when a signal block changes
    pub const UPDATE_RADIUS: i32 = 2;
    /// Block light emitted by a lit redstone torch
    pub const TORCH_LIGHT_EMISSION: u8 = 7;
    /// Block light emitted by a plain torch
    pub const PLAIN_TORCH_LIGHT_EMISSION: u8 = 14;
}

/// Block update scheduling constants (all delays in world ticks)
pub mod updates {
    pub const LIGHTING_DELAY: u64 = 0;
    pub const UPDATE_NOTIFY_DELAY: u64 = 0;
    pub const REDSTONE_DELAY: u64 = 2;
    pub const REDSTONE_DUST_DELAY: u64 = 0;
    pub const GENERAL_DELAY: u64 = 1;

    /// Default cap on updates delivered during one world tick
    pub const DEFAULT_MAX_UPDATES_PER_TICK: usize = 65_536;
}

/// Save format constants
pub mod persistence {
    /// Magic bytes identifying chunk files
    pub const CHUNK_MAGIC: [u8; 4] = *b"RSCK";
    /// Version of the chunk format
    pub const CHUNK_FORMAT_VERSION: u32 = 1;
    /// Upper bound for length-prefixed strings in save streams
    pub const MAX_STRING_LENGTH: u32 = 4096;
    /// Upper bound for a chunk payload after decompression
    pub const MAX_CHUNK_DATA_SIZE: u64 = 64 * 1024 * 1024;
}
