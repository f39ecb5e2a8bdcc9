/// 4x4 transform matrices and the rotation animation state
use nalgebra::{Matrix4, Vector3, Vector4};
use std::ops::{Index, IndexMut};

/// Row-major 4x4 matrix applied to row vectors.
///
/// Starts out all zeros, not identity: every entry a transform needs,
/// including the homogeneous `1`s, has to be set explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4x4(Matrix4<f32>);

impl Mat4x4 {
    pub fn new() -> Self {
        Self(Matrix4::zeros())
    }

    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    pub fn as_matrix(&self) -> &Matrix4<f32> {
        &self.0
    }

    /// Multiply `(x, y, z, 1)` by this matrix and divide through by `w`.
    ///
    /// Translation comes from row 3 and `w` from column 3. When `w` is zero
    /// the undivided sum is returned.
    pub fn multiply_vector(&self, v: &Vector3<f32>) -> Vector3<f32> {
        let out = self.0.tr_mul(&Vector4::new(v.x, v.y, v.z, 1.0));
        let w = out.w;
        if w != 0.0 {
            Vector3::new(out.x / w, out.y / w, out.z / w)
        } else {
            out.xyz()
        }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::new();
        m[(0, 0)] = c;
        m[(0, 1)] = s;
        m[(1, 0)] = -s;
        m[(1, 1)] = c;
        m[(2, 2)] = 1.0;
        m[(3, 3)] = 1.0;
        m
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::new();
        m[(0, 0)] = 1.0;
        m[(1, 1)] = c;
        m[(1, 2)] = s;
        m[(2, 1)] = -s;
        m[(2, 2)] = c;
        m[(3, 3)] = 1.0;
        m
    }
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<(usize, usize)> for Mat4x4 {
    type Output = f32;

    fn index(&self, index: (usize, usize)) -> &f32 {
        &self.0[index]
    }
}

impl IndexMut<(usize, usize)> for Mat4x4 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f32 {
        &mut self.0[index]
    }
}

/// Free-function form of [`Mat4x4::multiply_vector`].
pub fn transform(v: &Vector3<f32>, m: &Mat4x4) -> Vector3<f32> {
    m.multiply_vector(v)
}

/// Accumulated spin angle, advanced by elapsed time every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub theta: f32,
    /// Radians per second.
    pub rate: f32,
}

impl Spin {
    pub fn new(rate: f32) -> Self {
        Self { theta: 0.0, rate }
    }

    pub fn advance(&mut self, elapsed: f32) {
        self.theta += self.rate * elapsed;
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// The pair of rotations applied to the model for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRotation {
    pub rot_z: Mat4x4,
    pub rot_x: Mat4x4,
}

impl FrameRotation {
    /// Z turns by `theta`, X by `theta * x_axis_ratio`.
    pub fn new(theta: f32, x_axis_ratio: f32) -> Self {
        Self {
            rot_z: Mat4x4::rotation_z(theta),
            rot_x: Mat4x4::rotation_x(theta * x_axis_ratio),
        }
    }

    /// Rotate about Z, then about X.
    pub fn apply(&self, v: &Vector3<f32>) -> Vector3<f32> {
        let rotated_z = self.rot_z.multiply_vector(v);
        self.rot_x.multiply_vector(&rotated_z)
    }
}
