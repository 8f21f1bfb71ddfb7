//! Minimal Wavefront OBJ reader.
//!
//! Reads `v` and `f` records into an indexed triangle mesh. Faces with more
//! than three vertices are fan-triangulated. Everything else (normals,
//! texture coordinates, materials, groups) is ignored.

use crate::error::{FlowVisError, Result};
use crate::io::Reader;
use crate::types::{Dataset, TriangleMesh};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reader for Wavefront OBJ triangle meshes.
#[derive(Debug, Default)]
pub struct ObjReader;

impl ObjReader {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, path: &Path, input: impl BufRead) -> Result<TriangleMesh> {
        let mut vertices: Vec<[f32; 3]> = Vec::new();
        let mut triangles: Vec<[u32; 3]> = Vec::new();

        for (line_no, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("v") => {
                    let mut coords = [0.0f32; 3];
                    for coord in coords.iter_mut() {
                        let field = fields.next().ok_or_else(|| FlowVisError::Reader {
                            path: path.to_path_buf(),
                            message: format!("line {}: vertex with fewer than 3 coordinates", line_no + 1),
                        })?;
                        *coord = field.parse().map_err(|_| FlowVisError::Reader {
                            path: path.to_path_buf(),
                            message: format!("line {}: invalid vertex coordinate '{}'", line_no + 1, field),
                        })?;
                    }
                    vertices.push(coords);
                }
                Some("f") => {
                    let indices = fields
                        .map(|field| Self::parse_face_index(field, vertices.len()))
                        .collect::<std::result::Result<Vec<u32>, String>>()
                        .map_err(|message| FlowVisError::Reader {
                            path: path.to_path_buf(),
                            message: format!("line {}: {}", line_no + 1, message),
                        })?;
                    if indices.len() < 3 {
                        return Err(FlowVisError::Reader {
                            path: path.to_path_buf(),
                            message: format!("line {}: face with fewer than 3 vertices", line_no + 1),
                        });
                    }
                    // Fan triangulation for polygons.
                    for i in 1..indices.len() - 1 {
                        triangles.push([indices[0], indices[i], indices[i + 1]]);
                    }
                }
                _ => {} // Ignore normals, texcoords, materials, groups.
            }
        }

        if vertices.is_empty() {
            return Err(FlowVisError::Reader {
                path: path.to_path_buf(),
                message: "no vertices found".to_string(),
            });
        }

        Ok(TriangleMesh::new(vertices, triangles))
    }

    /// Parse one face field (`7`, `7/1`, `7//2`, `-1`) into a zero-based
    /// vertex index.
    fn parse_face_index(field: &str, vertex_count: usize) -> std::result::Result<u32, String> {
        let index_part = field.split('/').next().unwrap_or(field);
        let raw: i64 = index_part
            .parse()
            .map_err(|_| format!("invalid face index '{field}'"))?;

        // OBJ indices are 1-based; negative indices count from the end.
        let resolved = if raw > 0 {
            raw - 1
        } else if raw < 0 {
            vertex_count as i64 + raw
        } else {
            return Err("face index 0 is not valid".to_string());
        };

        if resolved < 0 || resolved >= vertex_count as i64 {
            return Err(format!("face index '{field}' out of range"));
        }
        Ok(resolved as u32)
    }
}

impl Reader for ObjReader {
    fn name(&self) -> &str {
        "Wavefront OBJ"
    }

    fn can_load(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("obj"))
            .unwrap_or(false)
    }

    fn load(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path).map_err(|e| FlowVisError::Reader {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mesh = self.parse(path, BufReader::new(file))?;
        tracing::info!(
            ?path,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            "loaded OBJ mesh"
        );
        Ok(Dataset::TriangleMesh(mesh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CUBE: &str = "\
# unit cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 2 3 4
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

    #[test]
    fn test_can_load_by_extension() {
        let reader = ObjReader::new();
        assert!(reader.can_load(Path::new("mesh.obj")));
        assert!(reader.can_load(Path::new("mesh.OBJ")));
        assert!(!reader.can_load(Path::new("mesh.ply")));
        assert!(!reader.can_load(Path::new("mesh")));
    }

    #[test]
    fn test_parse_cube() {
        let reader = ObjReader::new();
        let mesh = reader
            .parse(Path::new("cube.obj"), CUBE.as_bytes())
            .unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        // 6 quads fan-triangulated into 12 triangles.
        assert_eq!(mesh.triangles.len(), 12);

        let bb = mesh.bounding_box();
        assert_eq!(bb.min, [0.0, 0.0, 0.0]);
        assert_eq!(bb.max, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_parse_slash_and_negative_indices() {
        let reader = ObjReader::new();
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2//2 -1\n";
        let mesh = reader.parse(Path::new("t.obj"), input.as_bytes()).unwrap();
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_parse_rejects_bad_index() {
        let reader = ObjReader::new();
        let input = "v 0 0 0\nf 1 2 3\n";
        assert!(matches!(
            reader.parse(Path::new("t.obj"), input.as_bytes()),
            Err(FlowVisError::Reader { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_file() {
        let reader = ObjReader::new();
        assert!(reader.parse(Path::new("t.obj"), "".as_bytes()).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.obj");
        let mut file = File::create(&path).unwrap();
        file.write_all(CUBE.as_bytes()).unwrap();

        let reader = ObjReader::new();
        let dataset = reader.load(&path).unwrap();
        assert!(dataset.as_triangle_mesh().is_some());
        assert!(dataset.bounding_box().is_valid());
    }

    #[test]
    fn test_load_missing_file() {
        let reader = ObjReader::new();
        let err = reader.load(Path::new("/nonexistent/mesh.obj")).unwrap_err();
        assert!(matches!(err, FlowVisError::Reader { .. }));
    }
}
