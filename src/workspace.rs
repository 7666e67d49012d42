//! Axis-aligned box around the reachable volume, used as a cheap rejection test before
//! inverse kinematics. Being inside the box does not mean the pose is reachable.

use nalgebra::{Point3, Vector3};

use crate::parameters::dh_kinematics::Parameters;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workspace {
    /// Minimal x, y and z, world frame.
    pub min: Vector3<f64>,

    /// Maximal x, y and z, world frame.
    pub max: Vector3<f64>,
}

impl Workspace {
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Workspace { min, max }
    }

    /// Checks if the point is inside the box (bounds inclusive).
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// Conservative box for the robot: a sphere around the shoulder (J2 height on the J1 axis)
    /// with the radius being the sum of all link lengths, offsets and the tool length.
    /// Joint limits are not taken into consideration.
    pub fn enclosing(parameters: &Parameters) -> Self {
        let reach: f64 = parameters.joints.iter()
            .skip(1)
            .map(|joint| joint.a.abs() + joint.d.abs())
            .sum::<f64>()
            + parameters.tool.translation.vector.norm();

        let shoulder = parameters.base * Point3::new(0.0, 0.0, parameters.joints[0].d);
        let radius = Vector3::repeat(reach);
        Workspace {
            min: shoulder.coords - radius,
            max: shoulder.coords + radius,
        }
    }

    pub fn is_valid(&self) -> bool {
        (0..3).all(|i| self.min[i].is_finite() && self.max[i].is_finite() && self.min[i] <= self.max[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive() {
        let workspace = Workspace::new(Vector3::new(-1.0, -2.0, 0.0), Vector3::new(1.0, 2.0, 3.0));
        assert!(workspace.contains(&Point3::new(0.0, 0.0, 0.0)));
        assert!(workspace.contains(&Point3::new(1.0, 2.0, 3.0)));
        assert!(!workspace.contains(&Point3::new(1.01, 0.0, 1.0)));
        assert!(!workspace.contains(&Point3::new(0.0, 0.0, -0.01)));
    }

    #[test]
    fn test_enclosing_covers_stretched_arm() {
        let parameters = Parameters::fanuc_lr_mate_200id();
        let workspace = Workspace::enclosing(&parameters);
        assert!(workspace.is_valid());
        // Arm straight up at zero, flange at 0.745
        assert!(workspace.contains(&Point3::new(0.415, 0.0, 0.745)));
        assert!(!workspace.contains(&Point3::new(3.0, 0.0, 0.745)));
    }

    #[test]
    fn test_invalid_box() {
        let workspace = Workspace::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 1.0));
        assert!(!workspace.is_valid());
    }
}
