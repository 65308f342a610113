use std::path::{Path, PathBuf};

use crate::{config::EngineConfig, error::PapergenResult, request::RenderRequest};

/// Contract with the rendering engine.
///
/// The engine owns all pixel work: plotting the waveform onto grid paper,
/// sampling the deferred [`Chance`](crate::Chance) draws carried by the
/// request, appending data rows to the run ledgers, and writing the initial
/// JSON side-car per image when side-cars are enabled. It returns the image
/// paths it wrote, in order; zero images is a valid outcome, since the
/// engine decides page cardinality, not the orchestrator.
pub trait PaperRenderer {
    fn render(
        &mut self,
        request: &RenderRequest,
        config: &EngineConfig,
        output_directory: &Path,
        start_index: i64,
    ) -> PapergenResult<Vec<PathBuf>>;
}

#[derive(Clone, Copy, Debug)]
pub enum RendererKind {
    /// External engine executable driven over stdin/stdout.
    Process,
}

pub fn create_renderer(kind: RendererKind) -> PapergenResult<Box<dyn PaperRenderer>> {
    match kind {
        RendererKind::Process => Ok(Box::new(crate::render_process::ProcessRenderer::default())),
    }
}
