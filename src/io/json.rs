//! JSON I/O for simulation documents and building descriptors.
//!
//! Documents are written with their sections in the order consumers expect
//! (simulation control first, output directives last).

use crate::document::Document;
use crate::generate::descriptor::BuildingDescriptor;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Writes a document to a pretty-printed JSON file.
///
/// # Example
/// ```no_run
/// use thermozone::{BuildingDescriptor, GenerationOptions, generate_document};
/// use thermozone::io::write_document;
/// use std::path::Path;
///
/// let desc = BuildingDescriptor::with_footprint("box", 1, 10.0, 10.0);
/// let doc = generate_document(&desc, &GenerationOptions::default()).unwrap();
/// write_document(Path::new("box.json"), &doc).unwrap();
/// ```
pub fn write_document(path: &Path, doc: &Document) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, doc)
        .with_context(|| format!("Failed to serialize document to: {}", path.display()))?;

    Ok(())
}

/// Reads a document from a JSON file.
pub fn read_document(path: &Path) -> Result<Document> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let doc: Document = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize document from: {}", path.display()))?;

    Ok(doc)
}

pub fn to_json_string(doc: &Document) -> Result<String> {
    serde_json::to_string_pretty(doc).context("Failed to serialize document to string")
}

pub fn from_json_string(json: &str) -> Result<Document> {
    serde_json::from_str(json).context("Failed to deserialize document from string")
}

/// Reads a building descriptor, e.g. as handed over by a parameter extractor.
///
/// Missing fields take their defaults.
pub fn read_descriptor(path: &Path) -> Result<BuildingDescriptor> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let desc: BuildingDescriptor = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to deserialize descriptor from: {}", path.display()))?;
    Ok(desc)
}

pub fn descriptor_from_str(json: &str) -> Result<BuildingDescriptor> {
    serde_json::from_str(json).context("Failed to deserialize descriptor from string")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::descriptor::ComplexityTier;
    use crate::generate::{GenerationOptions, generate_document};
    use crate::validate::validate;
    use std::io::Write;
    use tempfile::tempdir;

    fn doc() -> Document {
        let desc = BuildingDescriptor::with_footprint("office", 2, 20., 12.).perimeter_depth(3.0);
        generate_document(&desc, &GenerationOptions::default()).unwrap()
    }

    #[test]
    fn test_write_and_read_document() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("office.json");
        let original = doc();

        write_document(&path, &original)?;
        let loaded = read_document(&path)?;

        assert_eq!(loaded, original);
        assert!(validate(&loaded).is_empty());

        Ok(())
    }

    #[test]
    fn test_section_order() -> Result<()> {
        let json = to_json_string(&doc())?;
        let pos = |key: &str| json.find(&format!("\"{key}\":"));
        let keys = [
            "simulation_control",
            "building",
            "timestep",
            "site",
            "run_period",
            "materials",
            "constructions",
            "geometry_rules",
            "zones",
            "surfaces",
            "fenestrations",
            "schedules",
            "hvac",
            "outputs",
        ];
        let positions: Vec<usize> = keys.iter().filter_map(|k| pos(k)).collect();
        assert_eq!(positions.len(), keys.len());
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let loaded = from_json_string(&json)?;
        assert_eq!(loaded.surfaces.len(), doc().surfaces.len());

        Ok(())
    }

    #[test]
    fn test_partial_descriptor() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("desc.json");
        let mut f = File::create(&path)?;
        writeln!(
            f,
            r#"{{"name": "shop", "floors": 2, "complexity": "Medium", "window_wall_ratio": 0.4}}"#
        )?;
        drop(f);

        let desc = read_descriptor(&path)?;
        assert_eq!(desc.name, "shop");
        assert_eq!(desc.floors, 2);
        assert_eq!(desc.complexity, ComplexityTier::Medium);
        assert!((desc.floor_height - 3.0).abs() < 1e-12);

        let same = descriptor_from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(same, desc);

        Ok(())
    }

    #[test]
    fn test_read_nonexistent_file() {
        assert!(read_document(Path::new("/nonexistent/path/doc.json")).is_err());
        assert!(from_json_string("{").is_err());
    }
}
