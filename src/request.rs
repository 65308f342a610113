use std::path::PathBuf;

use crate::{
    chance::Chance,
    error::{PapergenError, PapergenResult},
};

/// Grid coloring decided for one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridColorMode {
    /// Use a fixed entry of the engine's standard grid palette.
    FixedPalette(u8),
    /// The engine picks a palette entry per rendered page.
    RandomPerRender,
    /// Monochrome grid; black/white rendering may trigger, so color is off
    /// the table entirely.
    ForcedMonochrome,
}

impl GridColorMode {
    /// Priority rule: any chance of black/white rendering forces a
    /// monochrome grid; otherwise the random-color toggle decides between a
    /// per-render pick and the fixed palette entry.
    pub fn resolve(random_bw: f64, random_grid_color: bool, standard: u8) -> Self {
        if random_bw > 0.0 {
            Self::ForcedMonochrome
        } else if random_grid_color {
            Self::RandomPerRender
        } else {
            Self::FixedPalette(standard)
        }
    }
}

/// Richness of the per-image JSON side-car.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidecarMode {
    /// No side-car is created or touched.
    Off,
    /// The engine writes the side-car; reconciliation only rewrites it.
    Basic,
    /// Reconciliation additionally merges the augmentation-category fields.
    Verbose,
}

impl SidecarMode {
    /// Maps the CLI's numeric `--store_config` flag.
    pub fn from_flag(v: u8) -> PapergenResult<Self> {
        match v {
            0 => Ok(Self::Off),
            1 => Ok(Self::Basic),
            2 => Ok(Self::Verbose),
            other => Err(PapergenError::config(format!(
                "store_config must be 0, 1 or 2, got {other}"
            ))),
        }
    }

    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

/// The fully-resolved bundle handed to the rendering engine for one input
/// record.
///
/// Exactly one of these exists per invocation. Every stochastic decision is
/// settled before this value is built, except the [`Chance`] descriptors,
/// which the engine samples at the point of use.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    /// Digitized signal file. Existence is the engine's problem.
    pub input_file: PathBuf,
    /// Record header file (leads, gains, sampling rate).
    pub header_file: PathBuf,
    /// Pixels per inch for the rendered page.
    pub resolution: u32,
    /// Whitespace around the plot, in inches.
    pub pad_inches: u32,
    /// Whether lead-name labels are drawn.
    pub add_lead_names: bool,
    /// Draw for the calibration (DC) pulse.
    pub add_dc_pulse: Chance,
    /// Draw for black/white rendering.
    pub add_bw: Chance,
    /// Draw for grid visibility.
    pub show_grid: Chance,
    /// Draw for the printed header text.
    pub add_print: Chance,
    pub grid_color: GridColorMode,
    /// Font asset for header and annotation text.
    pub font: PathBuf,
    pub full_mode: Vec<String>,
    pub columns: i32,
    /// Export bounding boxes for lead waveforms.
    pub lead_bbox: bool,
    /// Export bounding boxes for lead-name text.
    pub store_text_bbox: bool,
    pub mask_unplotted_samples: bool,
    pub sidecar: SidecarMode,
    pub seed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_color_rule_is_exhaustive() {
        assert_eq!(
            GridColorMode::resolve(0.0, false, 5),
            GridColorMode::FixedPalette(5)
        );
        assert_eq!(
            GridColorMode::resolve(0.0, true, 5),
            GridColorMode::RandomPerRender
        );
        // Any black/white probability wins over both color choices.
        assert_eq!(
            GridColorMode::resolve(0.01, false, 5),
            GridColorMode::ForcedMonochrome
        );
        assert_eq!(
            GridColorMode::resolve(1.0, true, 5),
            GridColorMode::ForcedMonochrome
        );
    }

    #[test]
    fn sidecar_mode_maps_cli_flag() {
        assert_eq!(SidecarMode::from_flag(0).unwrap(), SidecarMode::Off);
        assert_eq!(SidecarMode::from_flag(1).unwrap(), SidecarMode::Basic);
        assert_eq!(SidecarMode::from_flag(2).unwrap(), SidecarMode::Verbose);
        assert!(SidecarMode::from_flag(3).is_err());
    }

    #[test]
    fn only_off_disables_sidecars() {
        assert!(!SidecarMode::Off.is_enabled());
        assert!(SidecarMode::Basic.is_enabled());
        assert!(SidecarMode::Verbose.is_enabled());
    }
}
