//! Rust implementation of forward and inverse kinematics for six-axis serial robots described
//! with Denavit-Hartenberg parameters, with a spherical wrist.
//!
//! Each joint is a revolute axis described by the link twist `alpha`, link length `a` and
//! link offset `d`, in the convention where the row of joint `i` holds the twist and length of
//! the preceding link. Forward kinematics composes `base * T1 * T2 * T3 * T4 * T5 * T6 * tool`.
//! Inverse kinematics is closed form: the wrist center fixes J1 to J3, the remaining rotation
//! fixes J4 to J6, giving up to eight candidate solutions.
//!
//! # Features
//!
//! - All returned solutions are within joint limits. Angles are periodic, so for every joint the
//!   2π-shifted value that fits the limits and is closest to the previous position is used.
//! - To generate a trajectory of the robot (sequence of poses), it is possible to use "previous joint
//!   positions" as additional input. Solutions are then sorted by the total joint displacement
//!   from them (closest first).
//! - For kinematic singularity at J5 = 0° or J5 = ±180° positions, this solver keeps J4 at the
//!   previous value and rotates J6 only (and not arbitrary values that may result in a large jerk
//!   of the real robot). If the limits of J6 do not allow this, J4 moves just as much as needed.
//!   Solutions near singularities are flagged.
//! - Unreachable targets and joint limit violations are reported as errors and not as panics, so the
//!   caller can decide to hold the last valid pose or skip the waypoint.
//! - The robot can be equipped with the tool and placed on the base, planning for the desired location
//!   and orientation of the tool center point (TCP) rather than the flange.
//! - Lateral shoulder offsets (like in PUMA 560) are supported.
//!
//! # Parameters
//!
//! Fill out `dh_kinematics::Parameters` (or use a preset like `Parameters::fanuc_lr_mate_200id()`),
//! then construct `DhKinematics`. The robot is checked at construction: the first joint must be
//! vertical, the second perpendicular to it, the third parallel to the second, and the axes of the
//! last three joints must intersect in one point.
//!
//! ```
//! use rs_dh_kinematics::kinematic_traits::{Kinematics, JOINTS_AT_ZERO};
//! use rs_dh_kinematics::kinematics_impl::DhKinematics;
//! use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
//!
//! let robot = DhKinematics::new(Parameters::fanuc_lr_mate_200id()).unwrap();
//! let joints = Parameters::home_position();
//! let pose = robot.forward(&joints).unwrap();
//! let solution = robot.solve(&pose, &JOINTS_AT_ZERO).unwrap();
//! assert_eq!(solution.degenerate, None);
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;
pub mod parameter_error;

pub mod utils;
pub mod kinematic_traits;
pub mod kinematic_error;
pub mod kinematics_impl;
pub mod joint;
mod ik_solver;

pub mod workspace;

pub mod tool;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;
