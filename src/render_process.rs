use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::{
    config::EngineConfig,
    error::{PapergenError, PapergenResult},
    render::PaperRenderer,
    request::RenderRequest,
};

/// Engine executable looked up on PATH when no explicit path is given.
pub const DEFAULT_ENGINE: &str = "get-paper-ecg";

/// Everything the engine needs for one record, as a single JSON document.
#[derive(serde::Serialize)]
struct EnginePayload<'a> {
    request: &'a RenderRequest,
    configs: &'a EngineConfig,
    output_directory: &'a Path,
    start_index: i64,
}

/// Drives the external plotting engine as a child process.
///
/// The resolved request and engine configuration go to the child as one
/// JSON document on stdin; the child reports the image paths it wrote as
/// one path per stdout line. A non-zero exit is surfaced with the child's
/// stderr attached.
pub struct ProcessRenderer {
    engine: PathBuf,
}

impl ProcessRenderer {
    pub fn new(engine: impl Into<PathBuf>) -> Self {
        Self {
            engine: engine.into(),
        }
    }
}

impl Default for ProcessRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

impl PaperRenderer for ProcessRenderer {
    fn render(
        &mut self,
        request: &RenderRequest,
        config: &EngineConfig,
        output_directory: &Path,
        start_index: i64,
    ) -> PapergenResult<Vec<PathBuf>> {
        let payload = serde_json::to_string(&EnginePayload {
            request,
            configs: config,
            output_directory,
            start_index,
        })
        .map_err(|e| PapergenError::render(format!("encode engine payload: {e}")))?;

        let mut child = Command::new(&self.engine)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PapergenError::render(format!(
                    "failed to spawn engine '{}' (is it installed and on PATH?): {e}",
                    self.engine.display()
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| PapergenError::render("failed to open engine stdin (unexpected)"))?;
        stdin.write_all(payload.as_bytes()).map_err(|e| {
            PapergenError::render(format!("failed to write request to engine stdin: {e}"))
        })?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .map_err(|e| PapergenError::render(format!("failed to wait for engine: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PapergenError::render(format!(
                "engine exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chance::Chance, request::{GridColorMode, SidecarMode}};

    #[test]
    fn payload_serializes_request_and_configs_together() {
        let request = RenderRequest {
            input_file: PathBuf::from("records/0001.dat"),
            header_file: PathBuf::from("records/0001.hea"),
            resolution: 200,
            pad_inches: 0,
            add_lead_names: true,
            add_dc_pulse: Chance::always(),
            add_bw: Chance::never(),
            show_grid: Chance::always(),
            add_print: Chance::never(),
            grid_color: GridColorMode::FixedPalette(5),
            font: PathBuf::from("Fonts/a.ttf"),
            full_mode: vec!["None".to_string()],
            columns: -1,
            lead_bbox: false,
            store_text_bbox: false,
            mask_unplotted_samples: false,
            sidecar: SidecarMode::Basic,
            seed: 42,
        };
        let config = EngineConfig::from_value(serde_json::json!({"paper_w": 8.5}));

        let payload = serde_json::to_value(EnginePayload {
            request: &request,
            configs: &config,
            output_directory: Path::new("out"),
            start_index: 3,
        })
        .unwrap();

        assert_eq!(payload["request"]["resolution"], 200);
        assert_eq!(payload["request"]["add_dc_pulse"], 1.0);
        assert_eq!(payload["configs"]["paper_w"], 8.5);
        assert_eq!(payload["output_directory"], "out");
        assert_eq!(payload["start_index"], 3);
    }
}
