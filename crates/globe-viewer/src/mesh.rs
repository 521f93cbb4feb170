//! Globe mesh generation.
//!
//! Vertices are laid out on a latitude/longitude grid through the same
//! transform the pins use, so an equirectangular texture lines up with the
//! pins exactly. `u` runs west to east from longitude -180, `v` runs north to
//! south from latitude 90.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use globe_nav::{GeoCoordinate, to_sphere_position};

/// Build a UV sphere of `radius` with `sectors` columns and `stacks` rows.
#[allow(clippy::cast_possible_truncation)]
pub fn globe_mesh(radius: f64, sectors: u32, stacks: u32) -> Mesh {
    let sectors = sectors.max(3);
    let stacks = stacks.max(2);
    let vertex_count = ((sectors + 1) * (stacks + 1)) as usize;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);

    for row in 0..=stacks {
        let v = f64::from(row) / f64::from(stacks);
        let latitude = 90.0 - 180.0 * v;
        for column in 0..=sectors {
            let u = f64::from(column) / f64::from(sectors);
            let longitude = -180.0 + 360.0 * u;
            let position = to_sphere_position(GeoCoordinate::new(latitude, longitude), radius)
                .as_dvec3();
            positions.push(position.as_vec3().to_array());
            normals.push(position.normalize_or_zero().as_vec3().to_array());
            uvs.push([u as f32, v as f32]);
        }
    }

    // Counter-clockwise seen from outside: west-to-east is screen right,
    // north is screen up.
    let stride = sectors + 1;
    let mut indices = Vec::with_capacity((sectors * stacks * 6) as usize);
    for row in 0..stacks {
        for column in 0..sectors {
            let top_left = row * stride + column;
            let bottom_left = top_left + stride;
            indices.extend([top_left, bottom_left, top_left + 1]);
            indices.extend([top_left + 1, bottom_left, bottom_left + 1]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> &[[f32; 3]] {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => values,
            other => panic!("unexpected position attribute: {other:?}"),
        }
    }

    #[test]
    fn vertex_and_index_counts() {
        let mesh = globe_mesh(2.0, 16, 8);
        assert_eq!(positions(&mesh).len(), 17 * 9);
        assert_eq!(mesh.indices().map(Indices::len), Some(16 * 8 * 6));
    }

    #[test]
    fn vertices_lie_on_sphere() {
        let mesh = globe_mesh(2.0, 16, 8);
        for p in positions(&mesh) {
            assert!((Vec3::from_array(*p).length() - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn grid_matches_pin_transform() {
        let mesh = globe_mesh(2.0, 4, 2);
        // Row 1 is the equator; column 2 is longitude 0.
        let equator_prime = Vec3::from_array(positions(&mesh)[5 + 2]);
        let expected = to_sphere_position(GeoCoordinate::new(0.0, 0.0), 2.0)
            .as_dvec3()
            .as_vec3();
        assert!(equator_prime.distance(expected) < 1e-5);
    }
}
