//! Runtime tuning for carousel behaviour
//!
//! Every field is an `Option` override; accessors fall back to the compiled
//! constants when a value is not set. Hosts typically obtain these from
//! `folio-config` and hand them to [`crate::Carousel::new`].

use serde::{Deserialize, Serialize};

use crate::constants::{ambient, gesture, paging};
use crate::error::{CarouselError, Result};

/// Paging and gesture overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselTuning {
    /// Items rendered per page
    pub items_per_page: Option<usize>,
    /// Page slide / navigation lockout duration (ms)
    pub settle_ms: Option<u64>,
    /// Press-to-drag activation distance (px)
    pub activation_px: Option<f32>,
    /// Drag scale applied at the first/last page
    pub elastic_resistance: Option<f32>,
    /// Mouse/pen commit distance (px)
    pub mouse_page_threshold_px: Option<f32>,
    /// Touch commit distance (px)
    pub touch_distance_threshold_px: Option<f32>,
    /// Touch commit velocity (px/ms)
    pub touch_velocity_threshold: Option<f32>,
    /// Horizontal wheel commit delta (px)
    pub wheel_threshold_px: Option<f32>,
}

impl CarouselTuning {
    /// Items per page, default 4.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page.unwrap_or(paging::ITEMS_PER_PAGE)
    }

    /// Lockout duration (ms).
    pub fn settle_ms(&self) -> u64 {
        self.settle_ms.unwrap_or(paging::SETTLE_MS)
    }

    /// Movement before a press becomes a drag (px).
    pub fn activation_px(&self) -> f32 {
        self.activation_px.unwrap_or(gesture::ACTIVATION_PX)
    }

    /// Multiplier applied to travel past the first or last page.
    pub fn elastic_resistance(&self) -> f32 {
        self.elastic_resistance
            .unwrap_or(gesture::ELASTIC_RESISTANCE)
    }

    /// Mouse and pen travel needed to commit (px).
    pub fn mouse_page_threshold_px(&self) -> f32 {
        self.mouse_page_threshold_px
            .unwrap_or(gesture::MOUSE_PAGE_THRESHOLD_PX)
    }

    /// Touch travel needed without a flick (px).
    pub fn touch_distance_threshold_px(&self) -> f32 {
        self.touch_distance_threshold_px
            .unwrap_or(gesture::TOUCH_DISTANCE_THRESHOLD_PX)
    }

    /// Touch flick speed (px/ms).
    pub fn touch_velocity_threshold(&self) -> f32 {
        self.touch_velocity_threshold
            .unwrap_or(gesture::TOUCH_VELOCITY_THRESHOLD)
    }

    /// Horizontal wheel delta per page (px).
    pub fn wheel_threshold_px(&self) -> f32 {
        self.wheel_threshold_px
            .unwrap_or(gesture::WHEEL_THRESHOLD_PX)
    }

    /// Reject values the state machines cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.items_per_page() == 0 {
            return Err(CarouselError::InvalidConfiguration(
                "items_per_page must be greater than zero".into(),
            ));
        }
        let resistance = self.elastic_resistance();
        if !(0.0..=1.0).contains(&resistance) {
            return Err(CarouselError::InvalidConfiguration(format!(
                "elastic_resistance must be within 0.0..=1.0, got {resistance}"
            )));
        }
        for (name, value) in [
            ("activation_px", self.activation_px()),
            ("mouse_page_threshold_px", self.mouse_page_threshold_px()),
            (
                "touch_distance_threshold_px",
                self.touch_distance_threshold_px(),
            ),
            ("touch_velocity_threshold", self.touch_velocity_threshold()),
            ("wheel_threshold_px", self.wheel_threshold_px()),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CarouselError::InvalidConfiguration(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Ambient rotation overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientTuning {
    /// Disable ambient rotation entirely
    pub disabled: bool,
    /// Delay before the first rotation once visible (ms)
    pub startup_delay_ms: Option<u64>,
    /// Interval between rotations (ms)
    pub interval_ms: Option<u64>,
    /// Items need more sub-items than this to rotate
    pub min_sub_items: Option<usize>,
}

impl AmbientTuning {
    /// Delay before the first highlight (ms).
    pub fn startup_delay_ms(&self) -> u64 {
        self.startup_delay_ms.unwrap_or(ambient::STARTUP_DELAY_MS)
    }

    /// Spacing between highlights (ms).
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.unwrap_or(ambient::INTERVAL_MS)
    }

    /// Items need more sub-items than this to rotate.
    pub fn min_sub_items(&self) -> usize {
        self.min_sub_items.unwrap_or(ambient::MIN_SUB_ITEMS)
    }

    /// Reject a zero interval.
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms() == 0 {
            return Err(CarouselError::InvalidConfiguration(
                "ambient interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_fall_back_to_constants() {
        let tuning = CarouselTuning::default();
        assert_eq!(tuning.settle_ms(), 300);
        assert_eq!(tuning.activation_px(), 8.0);
        assert_eq!(tuning.elastic_resistance(), 0.3);
        assert_eq!(tuning.mouse_page_threshold_px(), 80.0);
        assert_eq!(tuning.touch_distance_threshold_px(), 60.0);
        assert_eq!(tuning.touch_velocity_threshold(), 0.5);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn zero_items_per_page_is_rejected() {
        let tuning = CarouselTuning {
            items_per_page: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(CarouselError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn partial_overrides_deserialize() {
        let tuning: CarouselTuning =
            serde_json::from_str(r#"{"settle_ms": 450}"#).unwrap();
        assert_eq!(tuning.settle_ms(), 450);
        assert_eq!(tuning.items_per_page(), 4);
    }
}
