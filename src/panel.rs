//! Panel geometry and the panel that owns its bus, backlight and touch
//! front end.

use log::debug;

use crate::bus::{Bus, FrameTiming};
use crate::error::ConfigError;
use crate::light::Light;
use crate::touch::Touch;

/// Bytes per RGB565 pixel
pub const BYTES_PER_PIXEL: usize = 2;

/// Frame memory and visible area, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    pub memory_width: u16,
    pub memory_height: u16,
    pub panel_width: u16,
    pub panel_height: u16,
    pub offset_x: u16,
    pub offset_y: u16,
}

impl PanelConfig {
    /// The visible area must be non-empty and lie inside the frame memory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fits = |offset: u16, size: u16, memory: u16| {
            size > 0 && u32::from(offset) + u32::from(size) <= u32::from(memory)
        };

        if !fits(self.offset_x, self.panel_width, self.memory_width)
            || !fits(self.offset_y, self.panel_height, self.memory_height)
        {
            return Err(ConfigError::GeometryOutOfBounds);
        }
        Ok(())
    }

    /// Number of visible pixels
    pub fn pixel_count(&self) -> usize {
        usize::from(self.panel_width) * usize::from(self.panel_height)
    }

    /// Bytes in one visible RGB565 line
    pub fn line_bytes(&self) -> usize {
        usize::from(self.panel_width) * BYTES_PER_PIXEL
    }
}

/// An RGB panel. A panel cannot exist without its bus; backlight and touch
/// are optional attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Panel {
    bus: Bus,
    config: PanelConfig,
    light: Option<Light>,
    touch: Option<Touch>,
}

impl Panel {
    /// Associates `bus` with a new panel whose geometry is still empty.
    pub fn new(bus: Bus) -> Self {
        debug!("panel: bus attached, pclk {}Hz", bus.config().freq_write);
        Self {
            bus,
            config: PanelConfig::default(),
            light: None,
            touch: None,
        }
    }

    pub fn set_config(&mut self, config: PanelConfig) {
        debug!(
            "panel: geometry {}x{} in {}x{} memory",
            config.panel_width, config.panel_height, config.memory_width, config.memory_height
        );
        self.config = config;
    }

    pub fn set_light(&mut self, light: Light) {
        debug!("panel: backlight attached on GPIO{}", light.config().pin_bl);
        self.light = Some(light);
    }

    pub fn set_touch(&mut self, touch: Touch) {
        debug!(
            "panel: touch attached at 0x{:02X}",
            u8::from(touch.config().i2c_addr)
        );
        self.touch = Some(touch);
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    pub fn touch(&self) -> Option<&Touch> {
        self.touch.as_ref()
    }

    /// LCD_CAM timing for this panel on its bus
    pub fn frame_timing(&self) -> FrameTiming {
        self.bus.config().frame_timing(&self.config)
    }

    /// Validates the bus, the geometry and the geometry against the bus
    /// timing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bus.config().validate()?;
        self.config.validate()?;
        self.frame_timing().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    #[test]
    fn test_new_panel_has_bus_but_no_geometry() {
        let panel = Panel::new(Bus::new(board::bus_config()));
        assert_eq!(panel.bus().config(), &board::bus_config());
        assert_eq!(panel.config(), &PanelConfig::default());
        assert!(panel.light().is_none());
        assert!(panel.touch().is_none());
        assert_eq!(panel.validate(), Err(ConfigError::GeometryOutOfBounds));
    }

    #[test]
    fn test_geometry_validated_against_bus() {
        let mut panel = Panel::new(Bus::new(board::bus_config()));
        panel.set_config(board::panel_config());
        assert_eq!(panel.validate(), Ok(()));

        // 4000 pixels wide still fits the memory but not the LCD_CAM line counter
        panel.set_config(PanelConfig {
            memory_width: 4000,
            panel_width: 4000,
            ..board::panel_config()
        });
        assert_eq!(panel.config().validate(), Ok(()));
        assert_eq!(panel.validate(), Err(ConfigError::TimingOutOfRange));
    }

    #[test]
    fn test_geometry_bounds() {
        let config = PanelConfig {
            offset_x: 1,
            ..board::panel_config()
        };
        assert_eq!(config.validate(), Err(ConfigError::GeometryOutOfBounds));

        let config = PanelConfig {
            memory_height: 479,
            ..board::panel_config()
        };
        assert_eq!(config.validate(), Err(ConfigError::GeometryOutOfBounds));

        let config = PanelConfig {
            memory_width: 1024,
            offset_x: 224,
            ..board::panel_config()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_pixel_count() {
        assert_eq!(board::panel_config().pixel_count(), 384_000);
    }

    #[test]
    fn test_line_bytes_follow_visible_width() {
        assert_eq!(board::panel_config().line_bytes(), 1600);

        let config = PanelConfig {
            panel_width: 480,
            ..board::panel_config()
        };
        assert_eq!(config.line_bytes(), 960);
    }
}
