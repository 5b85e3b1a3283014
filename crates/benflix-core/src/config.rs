//! Widget configuration
//!
//! The host firmware selects colour inversion and USB support at build time.
//! Those choices arrive here as cargo features and seed
//! [`StatusConfig::default`]; everything else can be overridden at runtime.

use embedded_graphics::pixelcolor::BinaryColor;
use serde::{Deserialize, Serialize};

use crate::error::StatusError;

/// Maximum length of the name label drawn under the status row.
pub const LABEL_CAPACITY: usize = 8;

pub const DEFAULT_LABEL: &str = "BEN";

/// Lit pixel on the memory LCD.
pub const WHITE: BinaryColor = BinaryColor::On;
/// Unlit pixel on the memory LCD.
pub const BLACK: BinaryColor = BinaryColor::Off;

/// How the battery readout is drawn in the top-left region.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatteryStyle {
    /// Centred percentage text only
    #[default]
    Percentage,
    /// Percentage text inside a battery outline
    Outlined,
    /// Battery outline with a proportional fill bar, no text
    Bar,
}

/// Where the rotation step gets its scratch copy of the canvas.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScratchStrategy {
    /// Per-call copy of the fixed-size canvas array. Cannot fail.
    #[default]
    Stack,
    /// Heap buffer sized from the canvas dimensions. Skips the rotation if
    /// the allocation fails.
    Heap,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    pub inverted: bool,
    pub usb_device_stack: bool,
    pub label: heapless::String<LABEL_CAPACITY>,
    pub battery_style: BatteryStyle,
    pub scratch: ScratchStrategy,
}

impl Default for StatusConfig {
    fn default() -> Self {
        let mut label = heapless::String::new();
        label.push_str(DEFAULT_LABEL).ok();

        Self {
            inverted: cfg!(feature = "inverted"),
            usb_device_stack: cfg!(feature = "usb"),
            label,
            battery_style: BatteryStyle::default(),
            scratch: ScratchStrategy::default(),
        }
    }
}

impl StatusConfig {
    pub fn with_label(mut self, label: &str) -> Result<Self, StatusError> {
        let mut new_label = heapless::String::new();
        new_label
            .push_str(label)
            .map_err(|_| StatusError::LabelTooLong)?;
        self.label = new_label;
        Ok(self)
    }

    pub fn with_battery_style(mut self, style: BatteryStyle) -> Self {
        self.battery_style = style;
        self
    }

    pub fn with_scratch(mut self, scratch: ScratchStrategy) -> Self {
        self.scratch = scratch;
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn with_usb_device_stack(mut self, enabled: bool) -> Self {
        self.usb_device_stack = enabled;
        self
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.inverted)
    }
}

/// Background/foreground pair used by every draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: BinaryColor,
    pub foreground: BinaryColor,
}

impl Palette {
    /// Black ink on a white panel.
    pub const NORMAL: Self = Self {
        background: WHITE,
        foreground: BLACK,
    };

    pub const INVERTED: Self = Self {
        background: BLACK,
        foreground: WHITE,
    };

    pub const fn new(inverted: bool) -> Self {
        if inverted {
            Self::INVERTED
        } else {
            Self::NORMAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label() {
        let config = StatusConfig::default();
        assert_eq!(config.label.as_str(), "BEN");
        assert_eq!(config.battery_style, BatteryStyle::Percentage);
        assert_eq!(config.scratch, ScratchStrategy::Stack);
    }

    #[test]
    fn test_label_too_long() {
        let result = StatusConfig::default().with_label("BENFLIX-LEFT");
        assert_eq!(result, Err(StatusError::LabelTooLong));
    }

    #[test]
    fn test_palette_inversion() {
        let normal = StatusConfig::default().with_inverted(false).palette();
        let inverted = StatusConfig::default().with_inverted(true).palette();

        assert_eq!(normal.background, WHITE);
        assert_eq!(normal.foreground, BLACK);
        assert_eq!(inverted.background, normal.foreground);
        assert_eq!(inverted.foreground, normal.background);
    }

    #[test]
    fn test_config_survives_postcard() {
        let config = StatusConfig::default()
            .with_label("L")
            .unwrap()
            .with_battery_style(BatteryStyle::Bar)
            .with_scratch(ScratchStrategy::Heap);

        let bytes = postcard::to_allocvec(&config).unwrap();
        let decoded: StatusConfig = postcard::from_bytes(&bytes).unwrap();

        assert_eq!(decoded, config);
    }
}
