//! Box geometry

use super::{require_positive, unknown_field, ConfigGroup, FieldValue};
use crate::errors::ConfigurationError;
use crate::spatial::SixBoxRegion;
use crate::state::SixBoxSlice;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Surface areas, depths and horizontal length scales of the six boxes.
///
/// The surface boxes (north Atlantic, north Pacific, south) have a constant thickness of
/// `depth_high`. The two low-latitude boxes extend down to the pycnocline depth, which evolves
/// during a run. The deep box fills the rest of a basin of depth `depth_total` spanning the sum of
/// all surface areas.
///
/// # Default Values
///
/// A 3.6e14 m^2 ocean, split as in the four-box model of Gnanadesikan, Kelson & Sten (2018) with
/// the northern and low-latitude boxes divided into Atlantic and Pacific(/Indian) sectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxDimensions {
    /// Surface area of the North Atlantic box (m^2).
    /// Default: 0.25e14
    pub area_north_a: FloatValue,

    /// Surface area of the North Pacific box (m^2).
    /// Default: 0.35e14
    pub area_north_p: FloatValue,

    /// Surface area of the Southern Ocean box (m^2).
    /// Default: 1.0e14
    pub area_south: FloatValue,

    /// Surface area of the low-latitude Atlantic box (m^2).
    /// Default: 0.6e14
    pub area_low_a: FloatValue,

    /// Surface area of the low-latitude Pacific/Indian box (m^2).
    /// Default: 1.4e14
    pub area_low_pi: FloatValue,

    /// Thickness of the high-latitude surface boxes (m).
    /// Default: 100.0
    pub depth_high: FloatValue,

    /// Total depth of the ocean (m).
    /// Default: 4000.0
    pub depth_total: FloatValue,

    /// Zonal extent of the Atlantic sector of the Southern Ocean (m).
    /// Default: 1.0e7
    pub lx_south_a: FloatValue,

    /// Zonal extent of the Pacific/Indian sector of the Southern Ocean (m).
    /// Default: 2.0e7
    pub lx_south_pi: FloatValue,

    /// Meridional width of the Southern Ocean front (m).
    /// Default: 1.0e6
    pub ly_south: FloatValue,

    /// Zonal extent of the North Atlantic boundary (m).
    /// Default: 3.0e6
    pub lx_north_a: FloatValue,

    /// Zonal extent of the North Pacific boundary (m).
    /// Default: 5.0e6
    pub lx_north_p: FloatValue,

    /// Meridional width of the northern fronts (m).
    /// Default: 1.0e6
    pub ly_north: FloatValue,
}

impl Default for BoxDimensions {
    fn default() -> Self {
        Self {
            area_north_a: 0.25e14,
            area_north_p: 0.35e14,
            area_south: 1.0e14,
            area_low_a: 0.6e14,
            area_low_pi: 1.4e14,
            depth_high: 100.0,
            depth_total: 4000.0,
            lx_south_a: 1.0e7,
            lx_south_pi: 2.0e7,
            ly_south: 1.0e6,
            lx_north_a: 3.0e6,
            lx_north_p: 5.0e6,
            ly_north: 1.0e6,
        }
    }
}

float_fields!(
    BoxDimensions,
    [
        area_north_a,
        area_north_p,
        area_south,
        area_low_a,
        area_low_pi,
        depth_high,
        depth_total,
        lx_south_a,
        lx_south_pi,
        ly_south,
        lx_north_a,
        lx_north_p,
        ly_north,
    ]
);

impl BoxDimensions {
    /// Surface area of each box (m^2). The deep box spans the whole ocean.
    pub fn areas(&self) -> SixBoxSlice {
        SixBoxSlice::from_array([
            self.area_north_a,
            self.area_north_p,
            self.area_south,
            self.area_low_a,
            self.area_low_pi,
            self.total_area(),
        ])
    }

    /// Total ocean surface area (m^2)
    pub fn total_area(&self) -> FloatValue {
        self.area_north_a + self.area_north_p + self.area_south + self.area_low_a + self.area_low_pi
    }

    /// Total ocean volume (m^3)
    pub fn total_volume(&self) -> FloatValue {
        self.total_area() * self.depth_total
    }

    /// Box volumes (m^3) for the given pycnocline depths
    ///
    /// The deep volume is whatever the other boxes leave of the total, so it can become
    /// non-positive for unphysical depths. Callers check it.
    pub fn volumes(&self, d_low_a: FloatValue, d_low_pi: FloatValue) -> SixBoxSlice {
        let mut volumes = SixBoxSlice::zeros();
        volumes[SixBoxRegion::NorthA] = self.area_north_a * self.depth_high;
        volumes[SixBoxRegion::NorthP] = self.area_north_p * self.depth_high;
        volumes[SixBoxRegion::South] = self.area_south * self.depth_high;
        volumes[SixBoxRegion::LowA] = self.area_low_a * d_low_a;
        volumes[SixBoxRegion::LowPI] = self.area_low_pi * d_low_pi;

        let upper: FloatValue = SixBoxRegion::UPPER.iter().map(|r| volumes[*r]).sum();
        volumes[SixBoxRegion::Deep] = self.total_volume() - upper;
        volumes
    }
}

impl ConfigGroup for BoxDimensions {
    const GROUP_NAME: &'static str = "Box Dimensions";

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        self.float_fields()
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigurationError> {
        if self.set_float_field(name, value)? {
            Ok(())
        } else {
            Err(unknown_field(Self::GROUP_NAME, name))
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in self.float_fields() {
            require_positive(name, value.as_float(name)?)?;
        }
        if self.depth_total <= self.depth_high {
            return Err(ConfigurationError::new(
                "depth_total",
                format!(
                    "must be deeper than depth_high ({} <= {})",
                    self.depth_total, self.depth_high
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let dims = BoxDimensions::default();
        assert!(dims.validate().is_ok());
        assert!((dims.total_area() - 3.6e14).abs() / 3.6e14 < 1e-12);
    }

    #[test]
    fn test_zero_area_rejected() {
        let dims = BoxDimensions {
            area_south: 0.0,
            ..Default::default()
        };
        let err = dims.validate().unwrap_err();
        assert_eq!(err.field, "area_south");
    }

    #[test]
    fn test_negative_length_rejected() {
        let dims = BoxDimensions {
            ly_north: -1.0,
            ..Default::default()
        };
        assert_eq!(dims.validate().unwrap_err().field, "ly_north");
    }

    #[test]
    fn test_shallow_total_depth_rejected() {
        let dims = BoxDimensions {
            depth_total: 50.0,
            ..Default::default()
        };
        assert_eq!(dims.validate().unwrap_err().field, "depth_total");
    }

    #[test]
    fn test_volumes() {
        let dims = BoxDimensions::default();
        let volumes = dims.volumes(400.0, 500.0);

        assert_eq!(volumes[SixBoxRegion::NorthA], 0.25e14 * 100.0);
        assert_eq!(volumes[SixBoxRegion::LowA], 0.6e14 * 400.0);
        assert_eq!(volumes[SixBoxRegion::LowPI], 1.4e14 * 500.0);
        assert!(volumes[SixBoxRegion::Deep] > 0.0);
    }

    #[test]
    fn test_fields_order() {
        let dims = BoxDimensions::default();
        let keys: Vec<_> = dims.to_dict().keys().copied().collect();
        assert_eq!(keys.first(), Some(&"area_north_a"));
        assert_eq!(keys.last(), Some(&"ly_north"));
        assert_eq!(keys.len(), 13);
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"area_low_a": 0.5e14}"#;
        let dims: BoxDimensions = serde_json::from_str(json).expect("Partial deserialization failed");

        assert_eq!(dims.area_low_a, 0.5e14);
        assert_eq!(dims.depth_total, 4000.0);
    }
}
