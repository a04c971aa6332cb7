pub const PNG_HEADER: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Density assumed for images without a pHYs chunk.
/// 11811 pixels per metre is 300 DPI (rounded).
pub const DEFAULT_PIXELS_PER_METER: u32 = 11811;

pub const METERS_PER_INCH: f64 = 0.0254;

/// The unit specifier of a pHYs chunk.
///
/// http://www.libpng.org/pub/png/spec/1.2/PNG-Chunks.html#C.pHYs
///
///  0: unit is unknown, the two densities only define the pixel aspect ratio
///
///  1: unit is the metre
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum PhysUnit {
    Unspecified = 0,
    Meter = 1,
}

impl TryFrom<u8> for PhysUnit {
    /// The unit byte that is not a defined unit.
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            x if x == PhysUnit::Unspecified as u8 => Ok(PhysUnit::Unspecified),
            x if x == PhysUnit::Meter as u8 => Ok(PhysUnit::Meter),
            _ => Err(v),
        }
    }
}

pub fn pixels_per_meter_to_dpi(pixels_per_meter: u32) -> f64 {
    pixels_per_meter as f64 * METERS_PER_INCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_from_byte() {
        assert_eq!(PhysUnit::try_from(0), Ok(PhysUnit::Unspecified));
        assert_eq!(PhysUnit::try_from(1), Ok(PhysUnit::Meter));
        assert_eq!(PhysUnit::try_from(7), Err(7));
    }

    #[test]
    fn default_density_is_about_300_dpi() {
        let dpi = pixels_per_meter_to_dpi(DEFAULT_PIXELS_PER_METER);
        assert!((dpi - 300.0).abs() < 0.01, "{}", dpi);
        assert_eq!(pixels_per_meter_to_dpi(0), 0.0);
    }
}
