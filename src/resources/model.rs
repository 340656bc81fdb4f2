use glam::*;
use uuid::Uuid;

use std::fs;

use super::AssetError;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Vec3>
}

impl Mesh {
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Build a mesh from raw triangle data, one color per vertex.
    pub fn from_positions(positions: Vec<Vec3>, colors: Vec<Vec3>) -> Self {
        Mesh {
            positions,
            tex_coords: Vec::new(),
            normals: Vec::new(),
            colors
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub mesh: Mesh,
    id: Uuid
}

impl Model {
    pub(crate) fn load(asset_path: &str) -> Result<Self, AssetError> {
        let source = fs::read_to_string(asset_path).map_err(|source| AssetError::Io {
            path: asset_path.to_owned(),
            source
        })?;
        let mesh = parse_obj(asset_path, &source)?;

        Ok(Model {
            name: asset_path.to_owned(),
            mesh,
            id: Uuid::new_v4()
        })
    }

    pub fn get_id(&self) -> Uuid {
        self.id
    }
}

#[derive(Clone, Copy)]
struct FaceCorner {
    position: usize,
    tex_coord: Option<usize>,
    normal: Option<usize>
}

/// Wavefront OBJ subset: `v`, `vt`, `vn` and (fan-triangulated) `f` records.
/// Produces unindexed streams, one entry per face corner.
fn parse_obj(path: &str, source: &str) -> Result<Mesh, AssetError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec2> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut mesh = Mesh::new();

    for (line_index, raw_line) in source.lines().enumerate() {
        let line = line_index + 1;
        let content = raw_line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let mut tokens = content.split_whitespace();
        match tokens.next() {
            Some("v") => positions.push(parse_vec3(&mut tokens, path, line)?),
            Some("vt") => tex_coords.push(parse_vec2(&mut tokens, path, line)?),
            Some("vn") => normals.push(parse_vec3(&mut tokens, path, line)?),
            Some("f") => {
                let mut corners = Vec::new();
                for token in tokens {
                    corners.push(parse_corner(token, path, line)?);
                }
                if corners.len() < 3 {
                    return Err(parse_error(path, line, "face has fewer than 3 vertices"));
                }

                for i in 1..corners.len() - 1 {
                    for corner in [corners[0], corners[i], corners[i + 1]] {
                        let position = *positions
                            .get(corner.position)
                            .ok_or_else(|| parse_error(path, line, "vertex index out of range"))?;
                        mesh.positions.push(position);

                        if let Some(index) = corner.tex_coord {
                            let tex_coord = *tex_coords
                                .get(index)
                                .ok_or_else(|| parse_error(path, line, "texture coordinate index out of range"))?;
                            mesh.tex_coords.push(tex_coord);
                        }
                        if let Some(index) = corner.normal {
                            let normal = *normals
                                .get(index)
                                .ok_or_else(|| parse_error(path, line, "normal index out of range"))?;
                            mesh.normals.push(normal);
                        }
                    }
                }
            },
            // Groups, objects, materials and smoothing are irrelevant here.
            Some(_) => {},
            None => {}
        }
    }

    Ok(mesh)
}

fn parse_error(path: &str, line: usize, message: &str) -> AssetError {
    AssetError::ObjParse {
        path: path.to_owned(),
        line,
        message: message.to_owned()
    }
}

fn parse_float<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    path: &str,
    line: usize
) -> Result<f32, AssetError> {
    let token = tokens
        .next()
        .ok_or_else(|| parse_error(path, line, "missing component"))?;
    token
        .parse::<f32>()
        .map_err(|_| parse_error(path, line, "invalid float"))
}

fn parse_vec3<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    path: &str,
    line: usize
) -> Result<Vec3, AssetError> {
    Ok(Vec3::new(
        parse_float(tokens, path, line)?,
        parse_float(tokens, path, line)?,
        parse_float(tokens, path, line)?
    ))
}

fn parse_vec2<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    path: &str,
    line: usize
) -> Result<Vec2, AssetError> {
    Ok(Vec2::new(
        parse_float(tokens, path, line)?,
        parse_float(tokens, path, line)?
    ))
}

/// A face corner is `v`, `v/vt`, `v/vt/vn` or `v//vn`, all 1-based.
fn parse_corner(token: &str, path: &str, line: usize) -> Result<FaceCorner, AssetError> {
    let mut fields = token.split('/');

    let position = parse_index(fields.next(), path, line)?
        .ok_or_else(|| parse_error(path, line, "face corner has no vertex index"))?;
    let tex_coord = parse_index(fields.next(), path, line)?;
    let normal = parse_index(fields.next(), path, line)?;

    Ok(FaceCorner {
        position,
        tex_coord,
        normal
    })
}

fn parse_index(field: Option<&str>, path: &str, line: usize) -> Result<Option<usize>, AssetError> {
    let field = match field {
        Some(field) if !field.is_empty() => field,
        _ => return Ok(None)
    };

    let index = field
        .parse::<usize>()
        .map_err(|_| parse_error(path, line, "invalid index"))?;
    if index == 0 {
        return Err(parse_error(path, line, "indices are 1-based"));
    }

    Ok(Some(index - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "
# comment
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn parses_a_textured_triangle() {
        let mesh = parse_obj("triangle.obj", TRIANGLE).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.tex_coords.len(), 3);
        assert_eq!(mesh.normals.len(), 3);
        assert_eq!(mesh.positions[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.tex_coords[2], Vec2::new(0.0, 1.0));
    }

    #[test]
    fn triangulates_quads_as_a_fan() {
        let source = "
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
";
        let mesh = parse_obj("quad.obj", source).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.positions[0], mesh.positions[3]);
        assert_eq!(mesh.positions[2], mesh.positions[4]);
    }

    #[test]
    fn supports_position_only_and_missing_normal_corners() {
        let source = "
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0.0 0.0 1.0
f 1//1 2//1 3//1
";
        let mesh = parse_obj("flat.obj", source).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.tex_coords.is_empty());
        assert_eq!(mesh.normals.len(), 3);
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let source = "
v 0.0 0.0 0.0
f 1 2 3
";
        let error = parse_obj("broken.obj", source).unwrap_err();
        match error {
            AssetError::ObjParse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {:?}", other)
        }
    }

    #[test]
    fn rejects_zero_indices() {
        let source = "
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 0 1 2
";
        assert!(parse_obj("zero.obj", source).is_err());
    }
}
