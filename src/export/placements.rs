//! Tree and doodad placement files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ExportError;
use crate::placement::PackedPlacement;

pub const TREE_FILE: &str = "Monde_Arbre";
pub const DOODAD_FILE: &str = "Monde_Doodads";

/// Writes the tree list as raw little-endian `u32` values.
pub fn write_trees(trees: &[PackedPlacement], path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for tree in trees {
        writer.write_all(&tree.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Formats the doodad list. A missing start point is written as `-1`.
pub fn doodad_text(start_point: Option<PackedPlacement>, crystals: &[PackedPlacement]) -> String {
    let mut text = match start_point {
        Some(start) => format!("StartingPoint {} ", start),
        None => "StartingPoint -1 ".to_string(),
    };
    for crystal in crystals {
        text.push_str(&format!("Crystal {} ", crystal));
    }
    text
}

pub fn write_doodads(
    start_point: Option<PackedPlacement>,
    crystals: &[PackedPlacement],
    path: &Path,
) -> Result<(), ExportError> {
    std::fs::write(path, doodad_text(start_point, crystals))?;
    Ok(())
}
