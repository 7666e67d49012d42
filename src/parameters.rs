//! Defines the DH parameter data structure

pub mod dh_kinematics {
    use crate::joint::DhJoint;
    use crate::kinematic_traits::Pose;
    use crate::parameter_error::ParameterError;
    use crate::utils::{deg, is_finite_pose};
    use crate::workspace::Workspace;

    /// Parameters for the robot. See [parameters_robots.rs](parameters_robots.rs) for examples of concrete robot models.
    /// Once the robot is constructed, these values never change.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// DH parameters and travel limits of joints 1 to 6, in chain order.
        pub joints: [DhJoint; 6],

        /// Transformation from the world origin to frame 0 of the robot (where joint 1 is).
        pub base: Pose,

        /// Transformation from the flange (frame 6) to the tool center point.
        pub tool: Pose,

        /// Optional box used to reject unreachable targets early.
        pub workspace: Option<Workspace>,
    }

    impl Parameters {
        /// Same robot with another tool mounted on the flange.
        pub fn with_tool(self, tool: Pose) -> Self {
            Parameters { tool, ..self }
        }

        /// Same robot installed at another location.
        pub fn with_base(self, base: Pose) -> Self {
            Parameters { base, ..self }
        }

        pub fn with_workspace(self, workspace: Workspace) -> Self {
            Parameters { workspace: Some(workspace), ..self }
        }

        /// Checks the values are usable: all finite (except limits that may be infinite),
        /// lower limit not above the upper limit.
        pub fn validate(&self) -> Result<(), ParameterError> {
            for (i, joint) in self.joints.iter().enumerate() {
                for (name, value) in [("a", joint.a), ("alpha", joint.alpha), ("d", joint.d)] {
                    if !value.is_finite() {
                        return Err(ParameterError::ParseError(format!(
                            "J{}: parameter '{}' must be finite (got {})", i + 1, name, value
                        )));
                    }
                }
                if joint.low.is_nan() || joint.high.is_nan() || joint.low > joint.high {
                    return Err(ParameterError::ParseError(format!(
                        "J{}: limits must satisfy low <= high (got [{}, {}])", i + 1, joint.low, joint.high
                    )));
                }
            }

            if !is_finite_pose(&self.base) || !is_finite_pose(&self.tool) {
                return Err(ParameterError::ParseError("base and tool must be finite".to_string()));
            }

            if let Some(workspace) = &self.workspace {
                if !workspace.is_valid() {
                    return Err(ParameterError::ParseError(format!(
                        "workspace box is invalid: min {:?}, max {:?}",
                        workspace.min.as_slice(), workspace.max.as_slice()
                    )));
                }
            }
            Ok(())
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            let mut yaml = String::from("dh_kinematics_joints:\n");
            for joint in &self.joints {
                yaml.push_str(&format!(
                    "  - {{ a: {}, alpha: {}, d: {}, limits: [{}, {}] }}\n",
                    joint.a, deg(&joint.alpha), joint.d, limit(joint.low), limit(joint.high)
                ));
            }
            yaml.push_str(&format!("base: {}\n", pose_yaml(&self.base)));
            yaml.push_str(&format!("tool: {}\n", pose_yaml(&self.tool)));
            if let Some(workspace) = &self.workspace {
                yaml.push_str(&format!(
                    "workspace: {{ min: [{}], max: [{}] }}\n",
                    join(workspace.min.iter()),
                    join(workspace.max.iter())
                ));
            }
            yaml
        }
    }

    fn limit(value: f64) -> String {
        if value.is_infinite() {
            // YAML spelling of the infinity
            if value > 0.0 { ".inf".to_string() } else { "-.inf".to_string() }
        } else {
            deg(&value)
        }
    }

    fn pose_yaml(pose: &Pose) -> String {
        let (roll, pitch, yaw) = pose.rotation.euler_angles();
        format!(
            "{{ translation: [{}], rpy: [{}, {}, {}] }}",
            join(pose.translation.vector.iter()),
            deg(&roll), deg(&pitch), deg(&yaw)
        )
    }

    fn join<'a>(values: impl Iterator<Item=&'a f64>) -> String {
        values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
    }
}
