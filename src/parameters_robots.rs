//! Hardcoded DH parameters for a few robots

pub mod dh_kinematics {
    use std::f64::consts::FRAC_PI_2;

    use crate::joint::DhJoint;
    use crate::kinematic_traits::Pose;
    use crate::parameters::dh_kinematics::Parameters;
    use crate::utils::as_radians;
    use nalgebra::{Translation3, UnitQuaternion};

    /// Builds joint from link parameters in meters and radians, and limits in degrees.
    fn joint(a: f64, alpha: f64, d: f64, low_deg: i32, high_deg: i32) -> DhJoint {
        DhJoint::new(a, alpha, d, (low_deg as f64).to_radians(), (high_deg as f64).to_radians())
    }

    impl Parameters {
        /// Provides default values: all links of zero length and joints without limits.
        /// This is not a usable robot alone.
        pub fn new() -> Self {
            Parameters {
                joints: [DhJoint::unlimited(0.0, 0.0, 0.0); 6],
                base: Pose::identity(),
                tool: Pose::identity(),
                workspace: None,
            }
        }

        /// FANUC LR Mate 200iD. J1 sits 0.33 m above the mounting surface (base offset).
        /// At zero, the upper arm points forward and the forearm straight up, flange facing up.
        /// Limits are the datasheet ranges expressed relative to this zero (J2 is shifted by
        /// 90 degrees as the datasheet measures it from vertical).
        pub fn fanuc_lr_mate_200id() -> Self {
            Parameters {
                joints: [
                    joint(0.0, 0.0, 0.0, -170, 170),
                    joint(0.050, -FRAC_PI_2, 0.0, -190, 55),
                    joint(0.330, 0.0, 0.0, -100, 190),
                    joint(0.035, FRAC_PI_2, 0.335, -190, 190),
                    joint(0.0, -FRAC_PI_2, 0.0, -125, 125),
                    joint(0.0, FRAC_PI_2, 0.080, -360, 360),
                ],
                base: Pose::from_parts(Translation3::new(0.0, 0.0, 0.330), UnitQuaternion::identity()),
                ..Self::new()
            }
        }

        /// PUMA 560 as tabulated by Craig, with the lateral shoulder offset d3.
        pub fn puma_560() -> Self {
            Parameters {
                joints: [
                    joint(0.0, 0.0, 0.0, -160, 160),
                    joint(0.0, -FRAC_PI_2, 0.0, -225, 45),
                    joint(0.4318, 0.0, 0.15005, -45, 225),
                    joint(0.0203, -FRAC_PI_2, 0.4318, -110, 170),
                    joint(0.0, FRAC_PI_2, 0.0, -100, 100),
                    joint(0.0, -FRAC_PI_2, 0.0, -266, 266),
                ],
                ..Self::new()
            }
        }

        /// Same geometry as the given robot, but without joint limits.
        pub fn without_limits(self) -> Self {
            Parameters {
                joints: self.joints.map(|j| DhJoint::unlimited(j.a, j.alpha, j.d)),
                ..self
            }
        }

        /// Joint configuration that is "at rest" for the preset robots, with the upper arm
        /// raised and no joint at a singular position.
        pub fn home_position() -> [f64; 6] {
            as_radians([0, -90, 0, 0, 30, 0])
        }
    }
}
