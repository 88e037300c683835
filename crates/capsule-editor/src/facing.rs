use capsule_kernel::{Point3d, Vec3};

/// Below this cosine a surface counts as facing away from the viewer.
const BACK_FACE_EPSILON: f64 = -0.0001;

/// Camera state the host reports for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub eye: Point3d,
    /// Unit view direction.
    pub forward: Vec3,
    pub orthographic: bool,
}

impl ViewState {
    pub fn perspective(eye: Point3d, forward: Vec3) -> Self {
        Self {
            eye,
            forward,
            orthographic: false,
        }
    }

    pub fn orthographic(eye: Point3d, forward: Vec3) -> Self {
        Self {
            eye,
            forward,
            orthographic: true,
        }
    }
}

impl Default for ViewState {
    /// Perspective camera five units out on +Z looking at the origin.
    fn default() -> Self {
        Self::perspective(Point3d::new(0.0, 0.0, 5.0), -Vec3::Z)
    }
}

/// Whether a surface at `point` with outward `normal` faces away from the
/// viewer. Only affects handle colors.
pub fn is_surface_back_faced(point: Point3d, normal: Vec3, view: &ViewState) -> bool {
    let cos = if view.orthographic {
        normal.dot(&-view.forward)
    } else {
        normal.dot(&(view.eye - point))
    };
    cos < BACK_FACE_EPSILON
}
