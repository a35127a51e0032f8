//! Math utilities and types
//!
//! Provides the fundamental math types used for plane outlines, placements and
//! picking rays.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Rotation3,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Scale factors below this are treated as collapsed axes during decomposition
const MIN_SCALE: f32 = 1.0e-6;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,
    
    /// Rotation quaternion
    pub rotation: Quat,
    
    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }
    
    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
    
    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }
    
    /// Convert to a transformation matrix (translation * rotation * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
    
    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
    
    /// Apply this transform to a direction (ignores translation)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.to_matrix().transform_vector(&vector)
    }
    
    /// Local -Z axis in world space, the pointing direction of an XR pose
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::new(0.0, 0.0, -1.0)
    }
    
    /// Decompose a transformation matrix into position, rotation and scale
    ///
    /// The matrix is assumed to carry no shear or projection, which holds for
    /// every placement a plane detector or pose source reports.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        // Extract position
        let position = Vec3::new(matrix.m14, matrix.m24, matrix.m34);
        
        // Extract scale from the matrix columns
        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();
        let scale = Vec3::new(scale_x, scale_y, scale_z);
        
        // Normalize the basis; a collapsed axis is rebuilt from the other two
        let mut x_axis = Vec3::new(matrix.m11, matrix.m21, matrix.m31);
        let mut y_axis = Vec3::new(matrix.m12, matrix.m22, matrix.m32);
        let mut z_axis = Vec3::new(matrix.m13, matrix.m23, matrix.m33);
        if scale_x > MIN_SCALE { x_axis /= scale_x; }
        if scale_y > MIN_SCALE { y_axis /= scale_y; }
        if scale_z > MIN_SCALE { z_axis /= scale_z; }
        if scale_x <= MIN_SCALE { x_axis = y_axis.cross(&z_axis); }
        if scale_y <= MIN_SCALE { y_axis = z_axis.cross(&x_axis); }
        if scale_z <= MIN_SCALE { z_axis = x_axis.cross(&y_axis); }
        
        let rotation = if x_axis.magnitude() > MIN_SCALE
            && y_axis.magnitude() > MIN_SCALE
            && z_axis.magnitude() > MIN_SCALE
        {
            let rotation_matrix = Mat3::from_columns(&[x_axis, y_axis, z_axis]);
            Quat::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation_matrix))
        } else {
            // More than one axis collapsed, no orientation left to recover
            Quat::identity()
        };
        
        Self {
            position,
            rotation,
            scale,
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;
    
    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
    
    /// Full turn in radians
    pub const TAU: f32 = std::f32::consts::TAU;
}
