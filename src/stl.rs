// src/stl.rs

//! Binary STL mesh loader.
//!
//! Layout: an 80-byte header (ignored), a little-endian `u32` triangle count,
//! then per triangle twelve little-endian `f32` (normal, then three vertices)
//! followed by a 2-byte attribute count that is skipped.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const HEADER_LEN: usize = 80;
const ATTRIBUTE_LEN: usize = 2;
/// Bytes per triangle record: 12 floats plus the attribute count.
const FACE_LEN: usize = 12 * 4 + ATTRIBUTE_LEN;
/// Upper bound on up-front allocation, so a corrupt count can't exhaust memory.
const MAX_PREALLOCATED_FACES: usize = 1 << 16;

pub type Vec3 = [f32; 3];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlFace {
    pub normal: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
}

/// A loaded mesh. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StlMesh {
    triangles: Vec<StlFace>,
}

impl StlMesh {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &[StlFace] {
        &self.triangles
    }
}

/// Loads a binary STL file.
pub fn load(path: impl AsRef<Path>) -> Result<StlMesh> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Unable to open STL file {}", path.display()))?;
    let mesh = parse(BufReader::new(file))
        .with_context(|| format!("Malformed STL file {}", path.display()))?;
    info!("Loaded {} triangles from {}", mesh.triangle_count(), path.display());
    Ok(mesh)
}

/// Parses binary STL data.
///
/// # Errors
/// Fails if the data ends before the announced number of triangles.
pub fn parse<R: Read>(mut reader: R) -> Result<StlMesh> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header).context("Truncated STL header")?;

    let mut count_bytes = [0u8; 4];
    reader
        .read_exact(&mut count_bytes)
        .context("Missing STL triangle count")?;
    let count = u32::from_le_bytes(count_bytes) as usize;
    debug!("STL header announces {} triangles", count);

    let mut triangles = Vec::with_capacity(count.min(MAX_PREALLOCATED_FACES));
    let mut record = [0u8; FACE_LEN];
    for index in 0..count {
        if let Err(err) = reader.read_exact(&mut record) {
            bail!(
                "STL data ends at triangle {} of {}: {}",
                index,
                count,
                err
            );
        }
        triangles.push(StlFace {
            normal: vec3_at(&record, 0),
            v1: vec3_at(&record, 12),
            v2: vec3_at(&record, 24),
            v3: vec3_at(&record, 36),
        });
    }
    Ok(StlMesh { triangles })
}

fn vec3_at(record: &[u8; FACE_LEN], offset: usize) -> Vec3 {
    let f = |i: usize| {
        let start = offset + i * 4;
        f32::from_le_bytes([
            record[start],
            record[start + 1],
            record[start + 2],
            record[start + 3],
        ])
    };
    [f(0), f(1), f(2)]
}
