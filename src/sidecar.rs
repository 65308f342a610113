use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde_json::{Value, json};

use crate::{
    error::{PapergenError, PapergenResult},
    request::SidecarMode,
};

/// Path of the JSON side-car accompanying an image: same stem, `.json`.
pub fn sidecar_path(image: &Path) -> PathBuf {
    image.with_extension("json")
}

/// Reconcile one rendered image's side-car after the engine has written it.
///
/// `Basic` mode rewrites the document pretty-printed; `Verbose` mode first
/// merges in the augmentation-category fields this layer owns but never
/// activates. A missing or malformed side-car means the engine
/// broke its contract and is a hard error; earlier images in the same run
/// keep whatever state they already reached.
pub fn reconcile(image: &Path, mode: SidecarMode) -> PapergenResult<()> {
    if !mode.is_enabled() {
        return Ok(());
    }

    let path = sidecar_path(image);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("read side-car '{}'", path.display()))?;
    let mut doc: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse side-car '{}'", path.display()))?;

    if mode == SidecarMode::Verbose {
        let Some(map) = doc.as_object_mut() else {
            return Err(PapergenError::metadata(format!(
                "side-car '{}' is not a JSON object",
                path.display()
            )));
        };
        for (key, value) in disabled_defaults() {
            map.insert(key.to_string(), value);
        }
    }

    let pretty = serde_json::to_string_pretty(&doc)
        .with_context(|| format!("serialize side-car '{}'", path.display()))?;
    std::fs::write(&path, pretty)
        .with_context(|| format!("rewrite side-car '{}'", path.display()))?;
    Ok(())
}

/// Side-car fields for the handwriting, wrinkle, and photographic
/// augmentation categories.
///
/// Those effects are applied by stages downstream of this tool, so the
/// fields always report them as disabled here; they exist so every verbose
/// side-car carries the complete schema.
fn disabled_defaults() -> [(&'static str, Value); 13] {
    [
        ("handwritten_text", json!(false)),
        ("num_words", json!(0)),
        ("x_offset_for_handwritten_text", json!(0)),
        ("y_offset_for_handwritten_text", json!(0)),
        ("wrinkles", json!(false)),
        ("crease_angle", json!(0)),
        ("number_of_creases_horizontally", json!(0)),
        ("number_of_creases_vertically", json!(0)),
        ("augment", json!(false)),
        ("crop", json!(0)),
        ("temperature", json!(0)),
        ("rotate", json!(0)),
        ("noise", json!(0)),
    ]
}
