use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    chance::Chance,
    error::{PapergenError, PapergenResult},
    request::{GridColorMode, RenderRequest, SidecarMode},
};

/// Raw, pre-resolution knobs as they arrive from the command line.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub input_file: PathBuf,
    pub header_file: PathBuf,
    pub resolution: u32,
    pub random_resolution: bool,
    pub pad_inches: u32,
    pub random_padding: bool,
    pub remove_lead_names: bool,
    pub calibration_pulse: f64,
    pub random_bw: f64,
    pub random_grid_present: f64,
    pub print_header: bool,
    pub random_print_header: f64,
    pub random_grid_color: bool,
    pub standard_grid_color: u8,
    pub font_dir: PathBuf,
    pub full_mode: Vec<String>,
    pub columns: i32,
    pub lead_bbox: bool,
    pub store_text_bbox: bool,
    pub mask_unplotted_samples: bool,
    pub sidecar: SidecarMode,
    pub seed: i64,
}

/// Stochastic configuration resolver.
///
/// Owns the random source for one invocation. The seed is applied once, at
/// construction; every later draw pulls from that state in a fixed order
/// (resolution, padding, font), so a fixed seed reproduces the complete
/// resolved request.
pub struct Resolver {
    rng: StdRng,
}

impl Resolver {
    pub fn with_seed(seed: i64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed as u64),
        }
    }

    /// Resolve one [`RenderRequest`] from raw options.
    ///
    /// Sampling bounds are taken at face value: `--random_resolution` with
    /// `resolution < 50` hits the RNG's empty-range panic rather than a
    /// local check, mirroring the fail-fast policy of the whole tool.
    pub fn resolve(&mut self, opts: &RenderOptions) -> PapergenResult<RenderRequest> {
        let resolution = if opts.random_resolution {
            self.rng.random_range(50..=opts.resolution)
        } else {
            opts.resolution
        };
        let pad_inches = if opts.random_padding {
            self.rng.random_range(0..=opts.pad_inches)
        } else {
            opts.pad_inches
        };

        // An explicit header request wins over the sampled toggle.
        let add_print = if opts.print_header {
            Chance::always()
        } else {
            Chance::new(opts.random_print_header)?
        };

        let font = self.pick_font(&opts.font_dir)?;

        Ok(RenderRequest {
            input_file: opts.input_file.clone(),
            header_file: opts.header_file.clone(),
            resolution,
            pad_inches,
            add_lead_names: !opts.remove_lead_names,
            add_dc_pulse: Chance::new(opts.calibration_pulse)?,
            add_bw: Chance::new(opts.random_bw)?,
            show_grid: Chance::new(opts.random_grid_present)?,
            add_print,
            grid_color: GridColorMode::resolve(
                opts.random_bw,
                opts.random_grid_color,
                opts.standard_grid_color,
            ),
            font,
            full_mode: opts.full_mode.clone(),
            columns: opts.columns,
            lead_bbox: opts.lead_bbox,
            store_text_bbox: opts.store_text_bbox,
            mask_unplotted_samples: opts.mask_unplotted_samples,
            sidecar: opts.sidecar,
            seed: opts.seed,
        })
    }

    /// Pick one font uniformly from the asset directory.
    ///
    /// The directory is re-listed on every call, so fonts added or removed
    /// at runtime are picked up. `read_dir` order is platform-arbitrary; the
    /// listing is sorted so the uniform index draw stays reproducible.
    fn pick_font(&mut self, dir: &Path) -> PapergenResult<PathBuf> {
        let mut fonts = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("list font directory '{}'", dir.display()))?
        {
            let entry =
                entry.with_context(|| format!("list font directory '{}'", dir.display()))?;
            let file_type = entry
                .file_type()
                .with_context(|| format!("stat '{}'", entry.path().display()))?;
            if file_type.is_file() {
                fonts.push(entry.file_name());
            }
        }
        if fonts.is_empty() {
            return Err(PapergenError::config(format!(
                "font directory '{}' has no font files",
                dir.display()
            )));
        }
        fonts.sort();
        let idx = self.rng.random_range(0..fonts.len());
        Ok(dir.join(&fonts[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_fonts(name: &str, files: &[&str]) -> PathBuf {
        let dir = PathBuf::from("target")
            .join("resolver_tests")
            .join(name)
            .join("Fonts");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for file in files {
            std::fs::write(dir.join(file), b"font").unwrap();
        }
        dir
    }

    fn options(font_dir: PathBuf) -> RenderOptions {
        RenderOptions {
            input_file: PathBuf::from("records/0001.dat"),
            header_file: PathBuf::from("records/0001.hea"),
            resolution: 200,
            random_resolution: false,
            pad_inches: 0,
            random_padding: false,
            remove_lead_names: false,
            calibration_pulse: 1.0,
            random_bw: 0.0,
            random_grid_present: 1.0,
            print_header: false,
            random_print_header: 0.0,
            random_grid_color: false,
            standard_grid_color: 5,
            font_dir,
            full_mode: vec!["None".to_string()],
            columns: -1,
            lead_bbox: false,
            store_text_bbox: false,
            mask_unplotted_samples: false,
            sidecar: SidecarMode::Off,
            seed: 42,
        }
    }

    #[test]
    fn fixed_seed_reproduces_the_request() {
        let fonts = scratch_fonts("determinism", &["a.ttf", "b.ttf", "c.ttf"]);
        let mut opts = options(fonts);
        opts.random_resolution = true;
        opts.resolution = 300;
        opts.random_padding = true;
        opts.pad_inches = 4;

        let a = Resolver::with_seed(42).resolve(&opts).unwrap();
        let b = Resolver::with_seed(42).resolve(&opts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn random_resolution_stays_in_range() {
        let fonts = scratch_fonts("res_range", &["a.ttf"]);
        let mut opts = options(fonts);
        opts.random_resolution = true;
        opts.resolution = 300;

        for seed in 0..100 {
            let req = Resolver::with_seed(seed).resolve(&opts).unwrap();
            assert!((50..=300).contains(&req.resolution), "{}", req.resolution);
        }
    }

    #[test]
    fn random_padding_stays_in_range() {
        let fonts = scratch_fonts("pad_range", &["a.ttf"]);
        let mut opts = options(fonts);
        opts.random_padding = true;
        opts.pad_inches = 4;

        for seed in 0..100 {
            let req = Resolver::with_seed(seed).resolve(&opts).unwrap();
            assert!(req.pad_inches <= 4, "{}", req.pad_inches);
        }
    }

    #[test]
    fn fixed_values_pass_through_verbatim() {
        let fonts = scratch_fonts("fixed", &["a.ttf"]);
        let mut opts = options(fonts);
        opts.resolution = 300;
        opts.pad_inches = 2;

        let req = Resolver::with_seed(1).resolve(&opts).unwrap();
        assert_eq!(req.resolution, 300);
        assert_eq!(req.pad_inches, 2);
    }

    #[test]
    fn print_header_overrides_sampled_toggle() {
        let fonts = scratch_fonts("print_header", &["a.ttf"]);
        let mut opts = options(fonts);
        opts.print_header = true;
        opts.random_print_header = 0.3;

        let req = Resolver::with_seed(1).resolve(&opts).unwrap();
        assert_eq!(req.add_print, Chance::always());
    }

    #[test]
    fn lead_names_flag_is_negated() {
        let fonts = scratch_fonts("lead_names", &["a.ttf"]);
        let mut opts = options(fonts);

        let req = Resolver::with_seed(1).resolve(&opts).unwrap();
        assert!(req.add_lead_names);

        opts.remove_lead_names = true;
        let req = Resolver::with_seed(1).resolve(&opts).unwrap();
        assert!(!req.add_lead_names);
    }

    #[test]
    fn empty_font_directory_is_an_error() {
        let fonts = scratch_fonts("empty_fonts", &[]);
        let opts = options(fonts);
        let err = Resolver::with_seed(1).resolve(&opts).unwrap_err();
        assert!(err.to_string().contains("no font files"));
    }

    #[test]
    fn font_is_picked_from_the_directory() {
        let fonts = scratch_fonts("font_pick", &["a.ttf", "b.ttf", "c.ttf"]);
        let opts = options(fonts.clone());

        for seed in 0..20 {
            let req = Resolver::with_seed(seed).resolve(&opts).unwrap();
            assert_eq!(req.font.parent().unwrap(), fonts);
            let name = req.font.file_name().unwrap().to_string_lossy();
            assert!(["a.ttf", "b.ttf", "c.ttf"].contains(&name.as_ref()));
        }
    }
}
