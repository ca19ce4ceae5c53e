//! # Primitive Shape Generation
//!
//! Generators for the fixed primitive shapes. All shapes are unit-sized,
//! centered at the origin and come with outward normals.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin.
///
/// Vertices run from -0.5 to 0.5 on all axes with per-face normals.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let normals = [
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.normals = normals.to_vec();

    // Two counter-clockwise triangles per face.
    data.indices = vec![
        0, 1, 2,    2, 3, 0,
        4, 5, 6,    6, 7, 4,
        8, 9, 10,   10, 11, 8,
        12, 13, 14, 14, 15, 12,
        16, 17, 18, 18, 19, 16,
        20, 21, 22, 22, 23, 20,
    ];

    data
}

/// Generate a UV sphere of radius 0.5 centered at the origin.
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments
/// * `latitude_segments` - Number of horizontal segments
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);
    let radius = 0.5;

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            data.vertices.push([x * radius, y * radius, z * radius]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a cylinder of radius 0.5 and height 1 along the Y axis.
///
/// # Arguments
/// * `segments` - Number of circular segments
pub fn generate_cylinder(segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let radius = 0.5;
    let half_height = 0.5;

    // Side vertices, bottom/top pairs around the rim.
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let x = radius * cos_a;
        let z = radius * sin_a;

        data.vertices.push([x, -half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);

        data.vertices.push([x, half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(top_current);
        data.indices.push(bottom_next);

        data.indices.push(top_current);
        data.indices.push(top_next);
        data.indices.push(bottom_next);
    }

    // Cap rims get their own vertices so the caps are flat-shaded.
    let cap_start = data.vertices.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let x = radius * angle.cos();
        let z = radius * angle.sin();

        data.vertices.push([x, -half_height, z]);
        data.normals.push([0.0, -1.0, 0.0]);

        data.vertices.push([x, half_height, z]);
        data.normals.push([0.0, 1.0, 0.0]);
    }

    let center_bottom_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, -half_height, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);

    let center_top_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, half_height, 0.0]);
    data.normals.push([0.0, 1.0, 0.0]);

    for i in 0..segs {
        let current = cap_start + i * 2;
        let next = cap_start + (i + 1) * 2;

        data.indices.push(center_bottom_idx);
        data.indices.push(next);
        data.indices.push(current);

        data.indices.push(center_top_idx);
        data.indices.push(current + 1);
        data.indices.push(next + 1);
    }

    data
}

/// Generate a square pyramid with a unit base and unit height, apex up.
///
/// Each triangular side is flat-shaded with its own three vertices.
pub fn generate_pyramid() -> GeometryData {
    let mut data = GeometryData::new();

    let half = 0.5f32;
    let apex = [0.0, half, 0.0];
    let base = [
        [-half, -half, half],
        [half, -half, half],
        [half, -half, -half],
        [-half, -half, -half],
    ];

    // Four sides.
    for i in 0..4 {
        let a = base[i];
        let b = base[(i + 1) % 4];

        let edge1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let edge2 = [apex[0] - a[0], apex[1] - a[1], apex[2] - a[2]];
        let mut normal = [
            edge1[1] * edge2[2] - edge1[2] * edge2[1],
            edge1[2] * edge2[0] - edge1[0] * edge2[2],
            edge1[0] * edge2[1] - edge1[1] * edge2[0],
        ];
        let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        normal = [normal[0] / len, normal[1] / len, normal[2] / len];

        let start = data.vertices.len() as u32;
        data.vertices.extend_from_slice(&[a, b, apex]);
        data.normals.extend_from_slice(&[normal, normal, normal]);
        data.indices.extend_from_slice(&[start, start + 1, start + 2]);
    }

    // Base, facing down.
    let start = data.vertices.len() as u32;
    data.vertices.extend_from_slice(&base);
    data.normals
        .extend_from_slice(&[[0.0, -1.0, 0.0]; 4]);
    data.indices.extend_from_slice(&[
        start, start + 2, start + 1,
        start, start + 3, start + 2,
    ]);

    data
}

/// Generate a torus around the Y axis.
///
/// # Arguments
/// * `ring_radius` - Distance from the center to the tube center
/// * `tube_radius` - Radius of the tube itself
/// * `ring_segments` - Subdivision count around the ring
/// * `tube_segments` - Subdivision count around the tube
pub fn generate_torus(
    ring_radius: f32,
    tube_radius: f32,
    ring_segments: u32,
    tube_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let ring_segs = ring_segments.max(3);
    let tube_segs = tube_segments.max(3);

    for ring in 0..=ring_segs {
        let u = ring as f32 * 2.0 * PI / ring_segs as f32;
        let cos_u = u.cos();
        let sin_u = u.sin();

        for tube in 0..=tube_segs {
            let v = tube as f32 * 2.0 * PI / tube_segs as f32;
            let cos_v = v.cos();
            let sin_v = v.sin();

            let x = (ring_radius + tube_radius * cos_v) * cos_u;
            let y = tube_radius * sin_v;
            let z = (ring_radius + tube_radius * cos_v) * sin_u;

            data.vertices.push([x, y, z]);
            data.normals.push([cos_v * cos_u, sin_v, cos_v * sin_u]);
        }
    }

    for ring in 0..ring_segs {
        for tube in 0..tube_segs {
            let first = ring * (tube_segs + 1) + tube;
            let second = first + tube_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert!(sphere.vertices.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        // Every vertex sits on the radius-0.5 shell.
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_pyramid_generation() {
        let pyramid = generate_pyramid();
        assert_eq!(pyramid.vertices.len(), 16); // 4 sides * 3 + base 4
        assert_eq!(pyramid.triangle_count(), 6); // 4 sides + 2 base
        assert_eq!(pyramid.vertices.len(), pyramid.normals.len());
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(0.35, 0.15, 16, 8);
        assert_eq!(torus.vertices.len(), (16 + 1) * (8 + 1));
        assert_eq!(torus.triangle_count(), (16 * 8 * 2) as usize);
    }

    #[test]
    fn test_cylinder_generation() {
        let cylinder = generate_cylinder(12);
        assert_eq!(cylinder.vertices.len(), cylinder.normals.len());
        // 12 side quads + 2 * 12 cap triangles
        assert_eq!(cylinder.triangle_count(), 12 * 2 + 24);
    }

    #[test]
    fn cube_has_30_unique_edges() {
        // 12 topological edges, but faces do not share vertices here so
        // each face contributes its own boundary: 6 faces * (4 outer + 1
        // diagonal) edges.
        let cube = generate_cube();
        let edges = cube.edge_indices();
        assert_eq!(edges.len() % 2, 0);
        assert_eq!(edges.len() / 2, 30);
    }
}
