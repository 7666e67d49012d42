use tracing::{debug, trace};

use crate::ik_solver::{ranked, ArmGeometry};
use crate::kinematic_error::KinematicError;
use crate::kinematic_traits::{IkSolution, Joints, Kinematics, Pose, Singularity, Solutions, JOINTS_AT_ZERO};
use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::Parameters;
use crate::utils::dh_kinematics::is_valid;
use crate::utils::{is_finite_pose, joints_from_slice};

/// Kinematic chain of six revolute joints between a fixed base and a fixed tool.
/// Holds only immutable configuration, so it can be shared between threads and
/// all methods are pure functions of their arguments.
#[derive(Debug, Clone)]
pub struct DhKinematics {
    parameters: Parameters,
    geometry: ArmGeometry,
}

impl DhKinematics {
    /// Creates a new `DhKinematics` instance with the given parameters. Fails if the parameters
    /// are not valid or describe the arm the analytic solver cannot handle (no spherical wrist,
    /// J2 not perpendicular to J1, J3 not parallel to J2).
    pub fn new(parameters: Parameters) -> Result<Self, ParameterError> {
        parameters.validate()?;
        let geometry = ArmGeometry::from_joints(&parameters.joints)?;
        Ok(DhKinematics { parameters, geometry })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Forward kinematics for joint values in a slice, as received from path files
    /// or other untyped sources.
    pub fn forward_slice(&self, qs: &[f64]) -> Result<Pose, KinematicError> {
        self.forward(&joints_from_slice(qs)?)
    }

    fn check_joints(&self, qs: &Joints) -> Result<(), KinematicError> {
        if !is_valid(qs) {
            return Err(KinematicError::InvalidInputShape(format!("joint values must be finite: {:?}", qs)));
        }
        for (i, (joint, &value)) in self.parameters.joints.iter().zip(qs.iter()).enumerate() {
            if !joint.is_within_limit(value) {
                return Err(KinematicError::JointLimitViolation { joint: i, value });
            }
        }
        Ok(())
    }

    /// Poses of all joints without the limit check.
    fn chain(&self, qs: &Joints) -> [Pose; 6] {
        let mut poses = [Pose::identity(); 6];
        let mut pose = self.parameters.base;
        for (i, (joint, &theta)) in self.parameters.joints.iter().zip(qs.iter()).enumerate() {
            pose = pose * joint.transform(theta);
            poses[i] = pose;
        }
        poses
    }

    /// Feasible solutions with their displacement from the reference, closest first.
    fn ranked_solutions(&self, tcp: &Pose, reference: &Joints) -> Result<Vec<(f64, Joints)>, KinematicError> {
        if !is_finite_pose(tcp) {
            return Err(KinematicError::InvalidInputShape("target pose must be finite".into()));
        }
        if !is_valid(reference) {
            return Err(KinematicError::InvalidInputShape(format!(
                "previous joint values must be finite: {:?}", reference
            )));
        }

        if let Some(workspace) = &self.parameters.workspace {
            if !workspace.contains(&tcp.translation.vector.into()) {
                debug!("Target {:?} is outside the workspace", tcp.translation.vector.as_slice());
                return Err(KinematicError::Unreachable);
            }
        }

        let flange = self.parameters.base.inverse() * tcp * self.parameters.tool.inverse();
        let branches = self.geometry.branches(&self.parameters.joints, &flange, reference);
        let feasible = ranked(&self.parameters.joints, &branches, reference);
        trace!("{} branches, {} within joint limits", branches.len(), feasible.len());
        Ok(feasible)
    }
}

impl Kinematics for DhKinematics {
    fn forward(&self, qs: &Joints) -> Result<Pose, KinematicError> {
        let poses = self.forward_with_joint_poses(qs)?;
        Ok(poses[5] * self.parameters.tool)
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> Result<[Pose; 6], KinematicError> {
        self.check_joints(qs)?;
        Ok(self.chain(qs))
    }

    fn inverse(&self, pose: &Pose) -> Solutions {
        self.inverse_continuing(pose, &JOINTS_AT_ZERO)
    }

    fn inverse_continuing(&self, pose: &Pose, previous: &Joints) -> Solutions {
        match self.ranked_solutions(pose, previous) {
            Ok(feasible) => feasible.into_iter().map(|(_, joints)| joints).collect(),
            Err(error) => {
                debug!("No solutions: {}", error);
                Vec::new()
            }
        }
    }

    fn solve(&self, pose: &Pose, previous: &Joints) -> Result<IkSolution, KinematicError> {
        let (_, joints) = self.ranked_solutions(pose, previous)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                debug!("No branch reaches {:?} within joint limits", pose.translation.vector.as_slice());
                KinematicError::Unreachable
            })?;

        let degenerate = self.geometry.singularity(&joints);
        if let Some(singularity) = degenerate {
            debug!("Solution {:?} is near {}", joints, singularity);
        }
        Ok(IkSolution { joints, degenerate })
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        self.geometry.singularity(qs)
    }
}
