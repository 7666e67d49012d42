//! Analytic inverse kinematics for a 6R arm with a spherical wrist.
//!
//! The position of the wrist center only depends on J1 to J3, and the orientation of
//! the flange relative to frame 3 only on J4 to J6. J1 follows from the azimuth of the
//! wrist center (two shoulder branches), J3 from the cosine law on the triangle formed by
//! the upper arm and the forearm (two elbow branches), J2 from the remaining planar angle.
//! The wrist is decomposed as Z-Y-Z rotation (two flip branches). This gives up to eight
//! candidates that are then reduced to the joint limits and ranked by the distance from
//! the previous joint positions.

use std::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

use nalgebra::{UnitQuaternion, Vector3};

use crate::joint::DhJoint;
use crate::kinematic_traits::{Joints, Pose, Singularity, Solutions};
use crate::parameter_error::ParameterError;
use crate::utils::joint_displacement;

/// Discriminants (normalized) that are negative by less than this are treated as zero:
/// the target is exactly at the boundary of reach and both branches coincide.
const REACH_EPSILON: f64 = 1E-9;

/// Below this value of |sin(J5)|, J4 and J6 cannot be separated. J4 is then kept at the
/// previous value where limits allow, and J6 takes the rest of the rotation.
const WRIST_EPSILON: f64 = 1E-9;

/// Distance (m) of the wrist center from the J1 axis below which J1 is undefined.
const SHOULDER_EPSILON: f64 = 1E-9;

/// Threshold for reporting a configuration as degenerate, radians for wrist and elbow,
/// meters for the distance of the wrist center from the J1 plane.
const SINGULARITY_THRESHOLD: f64 = 1E-4;

/// Tolerance for the structural checks of DH parameters.
const STRUCTURE_TOLERANCE: f64 = 1E-9;

/// Candidates that differ by less than this in every joint are the same solution.
const DUPLICATE_TOLERANCE: f64 = 1E-12;

/// Constants of the closed form, derived once from the DH table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArmGeometry {
    /// Height of the J2 axis above frame 0.
    d1: f64,
    /// Horizontal offset from J1 axis to J2 axis.
    a1: f64,
    /// Upper arm, J2 to J3.
    a2: f64,
    /// Offset of the wrist center out of the arm plane (along J2 axis).
    lateral: f64,
    /// Wrist center in frame 3, in-plane components.
    a3: f64,
    e: f64,
    /// Distance from J3 axis to the wrist center, and its angle in frame 3.
    forearm: f64,
    psi: f64,
    /// Twist between frames 3 and 4.
    alpha4: f64,
    /// Distance from the wrist center to the flange.
    d6: f64,
    /// +1 if J5 rotates around +Y of the wrist frame, -1 if around -Y.
    wrist_sign: f64,
}

fn same_angle(a: f64, b: f64) -> bool {
    let (s, c) = (a - b).sin_cos();
    s.abs() < STRUCTURE_TOLERANCE && c > 0.0
}

fn near_zero(value: f64) -> bool {
    value.abs() < STRUCTURE_TOLERANCE
}

impl ArmGeometry {
    /// Checks that the DH table describes the arm this solver handles (see module docs)
    /// and precomputes the constants.
    pub(crate) fn from_joints(joints: &[DhJoint; 6]) -> Result<Self, ParameterError> {
        let fail = |msg: &str| Err(ParameterError::KinematicsConfigurationError(msg.to_string()));
        let [j1, j2, j3, j4, j5, j6] = joints;

        if !same_angle(j1.alpha, 0.0) || !near_zero(j1.a) {
            return fail("J1 must have alpha = 0 and a = 0");
        }
        if !same_angle(j2.alpha, -PI / 2.0) {
            return fail("J2 must have alpha = -90 degrees");
        }
        if !same_angle(j3.alpha, 0.0) {
            return fail("J3 must be parallel to J2 (alpha = 0)");
        }
        if near_zero(j3.a) {
            return fail("upper arm length (a of J3) must not be zero");
        }
        if !same_angle(j5.alpha.abs(), PI / 2.0) || !near_zero(j5.a) || !near_zero(j5.d) {
            return fail("J5 must have alpha = ±90 degrees, a = 0 and d = 0 (spherical wrist)");
        }
        if !same_angle(j6.alpha, -j5.alpha) || !near_zero(j6.a) {
            return fail("J6 must have alpha opposite to J5 and a = 0 (spherical wrist)");
        }

        let (s4, c4) = j4.alpha.sin_cos();
        let e = -s4 * j4.d;
        let forearm = j4.a.hypot(e);
        if near_zero(forearm) {
            return fail("wrist center must not be on the J3 axis");
        }

        // cos(90°) is not exactly zero and must not tilt J1 when the wrist is on its axis
        let lateral = j2.d + j3.d + c4 * j4.d;
        let lateral = if near_zero(lateral) { 0.0 } else { lateral };

        Ok(ArmGeometry {
            d1: j1.d,
            a1: j2.a,
            a2: j3.a,
            lateral,
            a3: j4.a,
            e,
            forearm,
            psi: e.atan2(j4.a),
            alpha4: j4.alpha,
            d6: j6.d,
            wrist_sign: if j5.alpha > 0.0 { -1.0 } else { 1.0 },
        })
    }

    /// Wrist center in frame 2 coordinates, given J3: (X, Y) in the arm plane.
    fn wrist_in_plane(&self, j3: f64) -> (f64, f64) {
        let (s3, c3) = j3.sin_cos();
        (self.a2 + self.a3 * c3 - self.e * s3, self.a3 * s3 + self.e * c3)
    }

    /// All joint configurations that put the flange (frame 6) into the given pose,
    /// relative to frame 0. Angles are in (-π, π] plus the reference-dependent values at
    /// singularities, not yet reduced to the joint limits.
    pub(crate) fn branches(&self, joints: &[DhJoint; 6], flange: &Pose, previous: &Joints) -> Solutions {
        let mut solutions: Solutions = Vec::with_capacity(8);

        let approach: Vector3<f64> = flange.rotation * Vector3::z();
        let wrist_center = flange.translation.vector - self.d6 * approach;
        let (px, py, pz) = (wrist_center.x, wrist_center.y, wrist_center.z - self.d1);

        // Shoulder: the wrist center must be at the lateral offset from the J1 plane.
        let rho2 = px * px + py * py;
        let lateral2 = self.lateral * self.lateral;
        let shoulder_disc = rho2 - lateral2;
        if shoulder_disc < -REACH_EPSILON * lateral2 {
            return solutions;
        }
        let shoulder_disc = shoulder_disc.max(0.0);
        let azimuth = if near_zero(self.lateral) && rho2.sqrt() < SHOULDER_EPSILON {
            // Wrist center on the J1 axis, any J1 works: stay as close to the previous as limits allow
            previous[0].clamp(joints[0].low, joints[0].high)
        } else {
            py.atan2(px)
        };

        for shoulder in [1.0, -1.0] {
            // Distance of the wrist center from the J1 axis, in the arm plane
            let x1 = shoulder * shoulder_disc.sqrt();
            let j1 = azimuth - self.lateral.atan2(x1);
            let u = x1 - self.a1;
            let w = -pz;

            // Cosine law for the elbow
            let k = (u * u + w * w - self.a2 * self.a2 - self.forearm * self.forearm) / (2.0 * self.a2);
            let cos_elbow = k / self.forearm;
            if cos_elbow.abs() > 1.0 + REACH_EPSILON {
                continue;
            }
            let cos_elbow = cos_elbow.clamp(-1.0, 1.0);
            let sin_elbow = (1.0 - cos_elbow * cos_elbow).sqrt();

            for elbow in [1.0, -1.0] {
                let j3 = (elbow * sin_elbow).atan2(cos_elbow) - self.psi;
                let (x, y) = self.wrist_in_plane(j3);
                let j2 = w.atan2(u) - y.atan2(x);

                let arm = joints[0].transform(j1).rotation
                    * joints[1].transform(j2).rotation
                    * joints[2].transform(j3).rotation
                    * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.alpha4);
                let wrist = (arm.inverse() * flange.rotation).to_rotation_matrix();
                let m = wrist.matrix();

                // m = Rz(j4) * Ry(wrist_sign * j5) * Rz(j6)
                let sin_bend = m[(0, 2)].hypot(m[(1, 2)]);
                if sin_bend < WRIST_EPSILON {
                    // Only J4 + J6 (J5 = 0) or J4 - J6 (J5 = ±180°) is defined
                    let (j5, sign6, offset) = if m[(2, 2)] > 0.0 {
                        (0.0, -1.0, m[(1, 0)].atan2(m[(0, 0)]))
                    } else {
                        (self.wrist_sign * PI, 1.0, -(-m[(1, 0)]).atan2(-m[(0, 0)]))
                    };
                    if let Some((j4, j6)) = split_wrist(&joints[3], &joints[5], sign6, offset, previous) {
                        push_unique(&mut solutions, [j1, j2, j3, j4, j5, j6]);
                    }
                } else {
                    for flip in [1.0, -1.0] {
                        let bend = (flip * sin_bend).atan2(m[(2, 2)]);
                        let j4 = (flip * m[(1, 2)]).atan2(flip * m[(0, 2)]);
                        let j6 = (flip * m[(2, 1)]).atan2(-flip * m[(2, 0)]);
                        push_unique(&mut solutions, [j1, j2, j3, j4, self.wrist_sign * bend, j6]);
                    }
                }
            }
        }
        solutions
    }

    /// Reports if the joint configuration is near a singularity.
    pub(crate) fn singularity(&self, qs: &Joints) -> Option<Singularity> {
        if qs[4].sin().abs() < SINGULARITY_THRESHOLD {
            return Some(Singularity::Wrist);
        }
        if (qs[2] + self.psi).sin().abs() < SINGULARITY_THRESHOLD {
            return Some(Singularity::Elbow);
        }
        let (x, y) = self.wrist_in_plane(qs[2]);
        let (s2, c2) = qs[1].sin_cos();
        let x1 = self.a1 + c2 * x - s2 * y;
        if x1.abs() < SINGULARITY_THRESHOLD {
            return Some(Singularity::Shoulder);
        }
        None
    }
}

/// Splits the rotation around the aligned J4 and J6 axes, `j6 = sign6 * j4 + offset` (mod 2π).
/// J4 is kept at the previous value if J6 then fits its limits, otherwise the split within
/// both limits with the smallest displacement of J4 and J6 is taken. None if there is no such split.
fn split_wrist(j4: &DhJoint, j6: &DhJoint, sign6: f64, offset: f64, previous: &Joints) -> Option<(f64, f64)> {
    let (p4, p6) = (previous[3], previous[5]);
    let keep = p4.clamp(j4.low, j4.high);
    if j6.high - j6.low >= TWO_PI {
        // Any J4 leaves some turn of J6 within limits
        return Some((keep, sign6 * keep + offset));
    }

    // J6 is within its limits for J4 in [a + 2πn, b + 2πn]
    let (a, b) = if sign6 < 0.0 {
        (offset - j6.high, offset - j6.low)
    } else {
        (j6.low - offset, j6.high - offset)
    };
    let n0 = ((keep - a) / TWO_PI).floor();
    let n_low = if j4.low.is_finite() { ((j4.low - b) / TWO_PI).ceil() } else { n0 - 1.0 };
    let n_high = if j4.high.is_finite() { ((j4.high - a) / TWO_PI).floor() } else { n0 + 1.0 };

    let mut best: Option<(f64, (f64, f64))> = None;
    let mut n = n_low;
    while n <= n_high {
        let (low, high) = (j4.low.max(a + TWO_PI * n), j4.high.min(b + TWO_PI * n));
        if low <= high {
            let paired = |v4: f64| sign6 * (v4 - TWO_PI * n) + offset;
            // Keeping J4, or keeping J6
            for v4 in [p4.clamp(low, high), (sign6 * (p6 - offset) + TWO_PI * n).clamp(low, high)] {
                let v6 = paired(v4);
                let cost = (v4 - p4).abs() + (v6 - p6).abs();
                if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                    best = Some((cost, (v4, v6)));
                }
            }
        }
        n += 1.0;
    }
    best.map(|(_, split)| split)
}

fn push_unique(solutions: &mut Solutions, candidate: Joints) {
    let duplicate = solutions.iter().any(|existing| {
        existing.iter().zip(candidate.iter()).all(|(a, b)| (a - b).abs() < DUPLICATE_TOLERANCE)
    });
    if !duplicate {
        solutions.push(candidate);
    }
}

/// Reduce every angle of the candidate to the value within the joint limits that is closest
/// to the reference. None if any joint cannot be brought within its limits.
pub(crate) fn within_limits(joints: &[DhJoint; 6], candidate: &Joints, reference: &Joints) -> Option<Joints> {
    let mut reduced = [0.0; 6];
    for i in 0..6 {
        reduced[i] = joints[i].nearest_within_limits(candidate[i], reference[i])?;
    }
    Some(reduced)
}

/// Feasible candidates with their displacement from the reference, closest first.
/// Equal displacement keeps the order of generation.
pub(crate) fn ranked(joints: &[DhJoint; 6], branches: &Solutions, reference: &Joints) -> Vec<(f64, Joints)> {
    let mut feasible: Vec<(f64, Joints)> = branches.iter()
        .filter_map(|candidate| within_limits(joints, candidate, reference))
        .map(|reduced| (joint_displacement(&reduced, reference), reduced))
        .collect();
    feasible.sort_by(|a, b| a.0.total_cmp(&b.0));
    feasible
}
