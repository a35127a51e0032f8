//! Polygon builder: turns a detected outline into a flat, placed mesh
//!
//! The outline is closed, triangulated by ear clipping in the plane's local
//! frame and laid out on local XZ (y = 0) facing +Y. The placement matrix is
//! decomposed and assigned to the node transform as-is; orientation is never
//! re-derived from the geometry.

use std::sync::Arc;

use crate::foundation::math::{Mat4, Transform, Vec2};
use crate::render::{Material, Mesh, MeshFlags, Vertex};

use super::PlaneError;

/// Points closer than this are the same point
const POINT_EPSILON: f32 = 1.0e-6;

/// Twice the area below which a polygon or ear counts as collinear
const AREA_EPSILON: f32 = 1.0e-9;

/// A built, not yet registered, plane mesh
#[derive(Debug, Clone)]
pub struct PlaneMesh {
    /// Local-space geometry
    pub mesh: Mesh,
    /// Material the mesh was built with
    pub material: Arc<Material>,
    /// World placement decomposed from the detector's matrix
    pub transform: Transform,
}

/// Builds flat plane meshes from 2-D outlines
#[derive(Debug, Clone)]
pub struct PolygonBuilder {
    min_points: usize,
}

impl Default for PolygonBuilder {
    fn default() -> Self {
        Self { min_points: 3 }
    }
}

impl PolygonBuilder {
    /// Create a builder requiring at least `min_points` distinct outline points
    ///
    /// Values below 3 are raised to 3; fewer points never enclose an area.
    pub fn new(min_points: usize) -> Self {
        Self {
            min_points: min_points.max(3),
        }
    }

    /// Build a collidable, shadow-receiving mesh for `outline` placed by `placement`
    ///
    /// Without a material, a default opaque one is used. Fails with
    /// [`PlaneError::NonFinite`] on NaN or infinite input, and with
    /// [`PlaneError::DegeneratePolygon`] if too few distinct points remain after
    /// closing the loop, or if the points enclose no area.
    pub fn build(
        &self,
        outline: &[Vec2],
        placement: &Mat4,
        material: Option<Arc<Material>>,
    ) -> Result<PlaneMesh, PlaneError> {
        if !outline.iter().all(|p| p.iter().all(|c| c.is_finite())) {
            return Err(PlaneError::NonFinite("outline point"));
        }
        if !placement.iter().all(|c| c.is_finite()) {
            return Err(PlaneError::NonFinite("placement"));
        }

        let ring = close_ring(outline);
        if ring.len() < self.min_points {
            return Err(PlaneError::DegeneratePolygon { distinct_points: ring.len() });
        }

        let triangles = triangulate(&ring);
        if triangles.is_empty() {
            return Err(PlaneError::DegeneratePolygon { distinct_points: ring.len() });
        }

        let (min, max) = bounds(&ring);
        let extent = max - min;
        let uv = |p: &Vec2| {
            let u = if extent.x > POINT_EPSILON { (p.x - min.x) / extent.x } else { 0.0 };
            let v = if extent.y > POINT_EPSILON { (p.y - min.y) / extent.y } else { 0.0 };
            [u, v]
        };

        // Outline (x, y) lies on local XZ; zero extrusion depth means no side walls
        let vertices = ring
            .iter()
            .map(|p| Vertex::new([p.x, 0.0, p.y], [0.0, 1.0, 0.0], uv(p)))
            .collect();
        let indices = triangles.into_iter().flatten().collect();

        let mut mesh = Mesh::new(vertices, indices)
            .with_flags(MeshFlags::COLLIDABLE | MeshFlags::RECEIVE_SHADOWS);
        mesh.compute_normals();

        let material = material.unwrap_or_else(|| Arc::new(Material::default().with_name("plane-default")));

        Ok(PlaneMesh {
            mesh,
            material,
            transform: Transform::from_matrix(placement),
        })
    }
}

/// Close the loop and drop repeated points, including the closing duplicate
fn close_ring(outline: &[Vec2]) -> Vec<Vec2> {
    let mut ring: Vec<Vec2> = Vec::with_capacity(outline.len() + 1);
    let closing = outline.first().copied();

    for point in outline.iter().copied().chain(closing) {
        if ring.last().map_or(true, |last| (point - last).norm() > POINT_EPSILON) {
            ring.push(point);
        }
    }

    // The appended closing point lands on ring[0] unless dropped above
    while ring.len() > 1 && (ring[ring.len() - 1] - ring[0]).norm() <= POINT_EPSILON {
        ring.pop();
    }

    ring
}

fn bounds(ring: &[Vec2]) -> (Vec2, Vec2) {
    ring.iter().fold(
        (Vec2::repeat(f32::INFINITY), Vec2::repeat(f32::NEG_INFINITY)),
        |(min, max), p| (min.inf(p), max.sup(p)),
    )
}

/// Twice the signed area of a ring (positive = counter-clockwise)
fn signed_area(ring: &[Vec2]) -> f32 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.perp(b))
        .sum()
}

/// z-component of (b - a) x (c - b)
fn turn(a: &Vec2, b: &Vec2, c: &Vec2) -> f32 {
    (b - a).perp(&(c - b))
}

/// Ear-clipping triangulation of a simple polygon
///
/// Returns index triples into `ring`, wound so the resulting faces point +Y
/// once the outline is laid out on XZ. Collinear input yields no triangles.
fn triangulate(ring: &[Vec2]) -> Vec<[u32; 3]> {
    if signed_area(ring).abs() <= AREA_EPSILON {
        return Vec::new();
    }

    let coords: Vec<f64> = ring.iter().flat_map(|p| [f64::from(p.x), f64::from(p.y)]).collect();
    let indices = match earcutr::earcut(&coords, &[], 2) {
        Ok(indices) => indices,
        Err(err) => {
            log::debug!("Triangulation of {} corners failed: {:?}", ring.len(), err);
            return Vec::new();
        }
    };

    indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let winding = turn(&ring[a], &ring[b], &ring[c]);
            if winding.abs() <= AREA_EPSILON {
                return None; // sliver from a straight corner
            }
            // (x, y) -> (x, 0, y) mirrors handedness, so counter-clockwise in
            // 2-D would face -Y; swap to keep every face up
            let tri = if winding > 0.0 { [a, c, b] } else { [a, b, c] };
            Some(tri.map(|i| i as u32))
        })
        .collect()
}
