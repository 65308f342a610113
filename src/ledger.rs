use std::{fs::OpenOptions, io::Write as _, path::Path};

use anyhow::Context as _;

use crate::error::PapergenResult;

/// Ground-truth bounding boxes, one row per labeled box.
pub const COORDINATES_FILE: &str = "Coordinates.csv";
/// Grid calibration, one row per rendered lead segment.
pub const GRID_SIZES_FILE: &str = "gridsizes.csv";

const COORDINATES_HEADER: &str = "Filename,class,x_center,y_center,width,height";
const GRID_SIZES_HEADER: &str = "filename,xgrid,ygrid,lead_name,start,end";

/// Ensure both run-level CSV ledgers exist in `output_directory`.
///
/// The ledgers are shared append targets for every invocation of a batch
/// run, so an existing file is never truncated or rewritten. On first
/// creation the header row is written only for indexed batch runs
/// (`start_index != -1`); a standalone run still creates the empty file so
/// the engine has something to append to.
pub fn prepare_ledgers(output_directory: &Path, start_index: i64) -> PapergenResult<()> {
    prepare_one(
        &output_directory.join(COORDINATES_FILE),
        COORDINATES_HEADER,
        start_index,
    )?;
    prepare_one(
        &output_directory.join(GRID_SIZES_FILE),
        GRID_SIZES_HEADER,
        start_index,
    )?;
    Ok(())
}

fn prepare_one(path: &Path, header: &str, start_index: i64) -> PapergenResult<()> {
    if path.is_file() {
        return Ok(());
    }
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("create ledger '{}'", path.display()))?;
    if start_index != -1 {
        writeln!(file, "{header}")
            .with_context(|| format!("write ledger header to '{}'", path.display()))?;
    }
    Ok(())
}
