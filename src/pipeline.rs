use std::path::Path;

use crate::{
    config::EngineConfig, error::PapergenResult, ledger::prepare_ledgers, render::PaperRenderer,
    request::RenderRequest, sidecar,
};

/// Drive one input record through ledger preparation, render dispatch, and
/// side-car reconciliation. Returns the number of images the engine
/// produced; callers aggregate across a batch.
///
/// Reconciliation is not transactional: a failure on image `k` leaves
/// images `0..k` already rewritten.
#[tracing::instrument(skip(request, config, renderer), fields(input = %request.input_file.display()))]
pub fn generate_record(
    request: &RenderRequest,
    config: &EngineConfig,
    output_directory: &Path,
    start_index: i64,
    renderer: &mut dyn PaperRenderer,
) -> PapergenResult<usize> {
    prepare_ledgers(output_directory, start_index)?;

    let images = renderer.render(request, config, output_directory, start_index)?;

    for image in &images {
        sidecar::reconcile(image, request.sidecar)?;
    }

    Ok(images.len())
}
