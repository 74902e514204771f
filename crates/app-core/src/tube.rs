use glam::{Quat, Vec3};

use crate::spline::CatmullRom3;

/// GPU-facing tube vertex: position plus (along, around) texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TubeVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh wrapping a tube of fixed radius around a curve.
pub struct TubeGeometry {
    pub vertices: Vec<TubeVertex>,
    pub indices: Vec<u32>,
}

impl TubeGeometry {
    /// Sample the curve at `tubular_segments + 1` stations and emit a ring of
    /// `radial_segments + 1` vertices around each (the seam vertex is
    /// duplicated so uv.y spans the full [0, 1]).
    ///
    /// Ring orientation uses parallel transport: the first normal is any
    /// vector orthogonal to the first tangent, each subsequent normal is the
    /// previous one rotated by the arc between neighboring tangents. This
    /// avoids the twisting a fixed up-vector would produce on curves that
    /// bend through the vertical.
    pub fn new(
        curve: &CatmullRom3,
        tubular_segments: usize,
        radius: f32,
        radial_segments: usize,
    ) -> Self {
        let mut centers = Vec::with_capacity(tubular_segments + 1);
        let mut tangents = Vec::with_capacity(tubular_segments + 1);
        for i in 0..=tubular_segments {
            let t = i as f32 / tubular_segments as f32;
            centers.push(curve.point(t));
            tangents.push(curve.tangent(t));
        }

        let mut normals = Vec::with_capacity(tubular_segments + 1);
        let axis = if tangents[0].x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        let mut normal = tangents[0]
            .cross(axis)
            .try_normalize()
            .unwrap_or(Vec3::Y);
        normals.push(normal);
        for i in 1..=tubular_segments {
            let rot = Quat::from_rotation_arc(tangents[i - 1], tangents[i]);
            normal = (rot * normal).normalize();
            normals.push(normal);
        }

        let mut vertices = Vec::with_capacity((tubular_segments + 1) * (radial_segments + 1));
        for i in 0..=tubular_segments {
            let binormal = tangents[i].cross(normals[i]).normalize();
            let u = i as f32 / tubular_segments as f32;
            for j in 0..=radial_segments {
                let v = j as f32 / radial_segments as f32;
                let angle = v * std::f32::consts::TAU;
                let dir = normals[i] * angle.cos() + binormal * angle.sin();
                let position = centers[i] + dir * radius;
                vertices.push(TubeVertex {
                    position: position.to_array(),
                    uv: [u, v],
                });
            }
        }

        let ring = (radial_segments + 1) as u32;
        let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
        for i in 0..tubular_segments as u32 {
            for j in 0..radial_segments as u32 {
                let a = i * ring + j;
                let b = (i + 1) * ring + j;
                indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
            }
        }

        Self { vertices, indices }
    }
}
