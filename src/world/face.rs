use glam::IVec3;
use serde::{Deserialize, Serialize};

/// One of the six faces of a block, named by axis and sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockFace {
    NX, // -X
    PX, // +X
    NY, // -Y
    PY, // +Y
    NZ, // -Z
    PZ, // +Z
}

impl BlockFace {
    pub const ALL: [BlockFace; 6] = [
        BlockFace::NX,
        BlockFace::PX,
        BlockFace::NY,
        BlockFace::PY,
        BlockFace::NZ,
        BlockFace::PZ,
    ];

    /// The four compass directions, in the order redstone dust stores its edges
    pub const HORIZONTAL: [BlockFace; 4] = [
        BlockFace::NX,
        BlockFace::PX,
        BlockFace::NZ,
        BlockFace::PZ,
    ];

    pub fn offset(&self) -> IVec3 {
        match self {
            BlockFace::NX => IVec3::new(-1, 0, 0),
            BlockFace::PX => IVec3::new(1, 0, 0),
            BlockFace::NY => IVec3::new(0, -1, 0),
            BlockFace::PY => IVec3::new(0, 1, 0),
            BlockFace::NZ => IVec3::new(0, 0, -1),
            BlockFace::PZ => IVec3::new(0, 0, 1),
        }
    }

    pub fn opposite(&self) -> BlockFace {
        match self {
            BlockFace::NX => BlockFace::PX,
            BlockFace::PX => BlockFace::NX,
            BlockFace::NY => BlockFace::PY,
            BlockFace::PY => BlockFace::NY,
            BlockFace::NZ => BlockFace::PZ,
            BlockFace::PZ => BlockFace::NZ,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        !matches!(self, BlockFace::NY | BlockFace::PY)
    }

    /// Stable index, also used as the face bit in [`FaceFlags`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Short lowercase name used in descriptor names
    pub fn short_name(&self) -> &'static str {
        match self {
            BlockFace::NX => "nx",
            BlockFace::PX => "px",
            BlockFace::NY => "ny",
            BlockFace::PY => "py",
            BlockFace::NZ => "nz",
            BlockFace::PZ => "pz",
        }
    }
}

/// Per-face boolean flags packed into a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceFlags(u8);

impl FaceFlags {
    pub const NONE: FaceFlags = FaceFlags(0);
    pub const ALL: FaceFlags = FaceFlags(0b11_1111);

    pub fn with(self, face: BlockFace) -> Self {
        FaceFlags(self.0 | (1 << face.index()))
    }

    pub fn contains(&self, face: BlockFace) -> bool {
        self.0 & (1 << face.index()) != 0
    }
}

/// Coarse geometric shape of a block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    /// No collision or geometry (air)
    Empty,
    /// A full unit cube
    Full,
    /// Thin layer lying on the bottom face (dust, carpets)
    Flat,
    /// Small shape hugging one face of the cell (torches, ladders)
    Attached(BlockFace),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_faces_cancel() {
        for face in BlockFace::ALL {
            assert_eq!(face.opposite().opposite(), face);
            assert_eq!(face.offset() + face.opposite().offset(), IVec3::ZERO);
        }
    }

    #[test]
    fn test_horizontal_faces() {
        assert!(BlockFace::HORIZONTAL.iter().all(|f| f.is_horizontal()));
        assert!(!BlockFace::NY.is_horizontal());
        assert!(!BlockFace::PY.is_horizontal());
    }

    #[test]
    fn test_face_flags() {
        let flags = FaceFlags::NONE.with(BlockFace::PY).with(BlockFace::NX);
        assert!(flags.contains(BlockFace::PY));
        assert!(flags.contains(BlockFace::NX));
        assert!(!flags.contains(BlockFace::PZ));
        assert!(BlockFace::ALL.iter().all(|f| FaceFlags::ALL.contains(*f)));
    }
}
