use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::error::MeshError;

/// A UV-sphere approximation: positions plus a triangle list.
///
/// Stacks slice the sphere by latitude from the north pole (+z) to the south
/// pole, sectors slice it by longitude. Each ring carries `sectors + 1` vertices
/// so the seam vertex is duplicated. Quads touching a pole collapse to a single
/// triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMesh {
    pub radius: f32,
    pub stacks: u32,
    pub sectors: u32,
    pub vertices: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub const MIN_STACKS: u32 = 2;
    pub const MIN_SECTORS: u32 = 3;

    pub fn uv(radius: f32, stacks: u32, sectors: u32) -> Result<Self, MeshError> {
        Self::check_resolution(stacks, sectors)?;

        Ok(Self {
            radius,
            stacks,
            sectors,
            vertices: vertices(radius, stacks, sectors),
            indices: indices(stacks, sectors),
        })
    }

    /// Rejects resolutions that are too coarse to close, or whose vertex
    /// count would overflow a `u32` index.
    pub fn check_resolution(stacks: u32, sectors: u32) -> Result<(), MeshError> {
        if stacks < Self::MIN_STACKS {
            return Err(MeshError::TooFewStacks(stacks));
        }
        if sectors < Self::MIN_SECTORS {
            return Err(MeshError::TooFewSectors(sectors));
        }
        let rings = u64::from(stacks) + 1;
        let ring_len = u64::from(sectors) + 1;
        if rings * ring_len > u64::from(u32::MAX) {
            return Err(MeshError::TooManyVertices { stacks, sectors });
        }
        Ok(())
    }

    pub fn vertex_count(stacks: u32, sectors: u32) -> usize {
        (stacks as usize + 1) * (sectors as usize + 1)
    }

    /// Two triangles per quad, minus one triangle for every quad on the two polar rings.
    pub fn index_count(stacks: u32, sectors: u32) -> usize {
        let (stacks, sectors) = (stacks as usize, sectors as usize);
        sectors * 2 * 3 * stacks.saturating_sub(1)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn vertices(radius: f32, stacks: u32, sectors: u32) -> Vec<[f32; 3]> {
    let sector_step = TAU / sectors as f32;
    let stack_step = PI / stacks as f32;
    let mut out = Vec::with_capacity(SphereMesh::vertex_count(stacks, sectors));

    for i in 0..=stacks {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let ring = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = j as f32 * sector_step;
            out.push([ring * sector_angle.cos(), ring * sector_angle.sin(), z]);
        }
    }
    out
}

fn indices(stacks: u32, sectors: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(SphereMesh::index_count(stacks, sectors));

    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;

        for _ in 0..sectors {
            if i != 0 {
                out.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                out.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
            k1 += 1;
            k2 += 1;
        }
    }
    out
}
