/// Geometry primitives for the cube renderer
use nalgebra::Vector3;

/// A triangle defined by three corners.
///
/// Winding order is preserved exactly as authored; nothing in the pipeline
/// culls on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p: [Vector3<f32>; 3],
}

impl Triangle {
    pub fn new(p0: Vector3<f32>, p1: Vector3<f32>, p2: Vector3<f32>) -> Self {
        Self { p: [p0, p1, p2] }
    }

    /// Build a triangle from nine packed coordinates, three per corner.
    pub const fn from_coords(c: [f32; 9]) -> Self {
        Self {
            p: [
                Vector3::new(c[0], c[1], c[2]),
                Vector3::new(c[3], c[4], c[5]),
                Vector3::new(c[6], c[7], c[8]),
            ],
        }
    }

    /// Apply `f` to every corner, keeping the winding.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Vector3<f32>) -> Vector3<f32>,
    {
        Self {
            p: [f(&self.p[0]), f(&self.p[1]), f(&self.p[2])],
        }
    }

    /// The x/y components of each corner, for handing to a 2D surface.
    pub fn screen_points(&self) -> [(f32, f32); 3] {
        [
            (self.p[0].x, self.p[0].y),
            (self.p[1].x, self.p[1].y),
            (self.p[2].x, self.p[2].y),
        ]
    }
}

/// Unit cube spanning (0,0,0)..(1,1,1), two triangles per face.
const UNIT_CUBE: [Triangle; 12] = [
    // South face
    Triangle::from_coords([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0]),
    Triangle::from_coords([0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0]),
    // East face
    Triangle::from_coords([1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0]),
    Triangle::from_coords([1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0]),
    // North face
    Triangle::from_coords([1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0]),
    Triangle::from_coords([1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0]),
    // West face
    Triangle::from_coords([0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0]),
    Triangle::from_coords([0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]),
    // Top face
    Triangle::from_coords([0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
    Triangle::from_coords([0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0]),
    // Bottom face
    // TODO: sort faces by depth before submission; this face overdraws the others at some angles.
    Triangle::from_coords([1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]),
    Triangle::from_coords([1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
];

/// A rigid object made of triangles, drawn in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// The unit cube used by the demo scene.
    pub fn cube() -> Self {
        Self::from_triangles(UNIT_CUBE.to_vec())
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Distance from the origin to the farthest corner.
    pub fn bounding_radius(&self) -> f32 {
        self.triangles
            .iter()
            .flat_map(|tri| tri.p.iter())
            .map(|p| p.norm())
            .fold(0.0, f32::max)
    }
}
