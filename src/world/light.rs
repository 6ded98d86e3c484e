use crate::constants::core::MAX_LIGHT_LEVEL;

/// Light level (0-15) with separate sky and block light components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LightLevel {
    /// Skylight level (0-15)
    pub sky: u8,
    /// Block light level (0-15)
    pub block: u8,
}

impl LightLevel {
    pub fn new(sky: u8, block: u8) -> Self {
        Self {
            sky: sky.min(MAX_LIGHT_LEVEL),
            block: block.min(MAX_LIGHT_LEVEL),
        }
    }

    /// Get the maximum light level from either source
    pub fn max_light(&self) -> u8 {
        self.sky.max(self.block)
    }

    /// Create a dark light level
    pub fn dark() -> Self {
        Self { sky: 0, block: 0 }
    }

    /// Create a fully lit skylight level
    pub fn full_sky() -> Self {
        Self {
            sky: MAX_LIGHT_LEVEL,
            block: 0,
        }
    }

    /// Packed form: sky light in upper 4 bits, block light in lower 4 bits
    pub fn pack(&self) -> u8 {
        (self.sky << 4) | (self.block & 0x0F)
    }

    pub fn unpack(packed: u8) -> Self {
        Self {
            sky: (packed >> 4) & 0x0F,
            block: packed & 0x0F,
        }
    }
}

/// How a block kind interacts with light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightProperties {
    /// Block light emitted by the block (0-15)
    pub emission: u8,
    /// Whether light passes through the block
    pub transparent: bool,
}

impl LightProperties {
    pub const fn opaque() -> Self {
        Self {
            emission: 0,
            transparent: false,
        }
    }

    pub const fn transparent() -> Self {
        Self {
            emission: 0,
            transparent: true,
        }
    }

    pub fn emitting(self, emission: u8) -> Self {
        Self {
            emission: emission.min(MAX_LIGHT_LEVEL),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_level_clamps() {
        let light = LightLevel::new(20, 16);
        assert_eq!(light.sky, 15);
        assert_eq!(light.block, 15);
    }

    #[test]
    fn test_light_level_packing() {
        let light = LightLevel::new(12, 3);
        assert_eq!(LightLevel::unpack(light.pack()), light);
        assert_eq!(LightLevel::full_sky().pack(), 0xF0);
    }

    #[test]
    fn test_emission_clamps() {
        let props = LightProperties::transparent().emitting(40);
        assert_eq!(props.emission, 15);
        assert!(props.transparent);
    }
}
