//! Geometry of a single revolute joint.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion};

use crate::kinematic_traits::Pose;

const TWO_PI: f64 = 2.0 * PI;

/// Angles computed by inverse kinematics may land a few ulps outside a limit they are
/// exactly at. Values within this tolerance are clamped to the limit.
const LIMIT_TOLERANCE: f64 = 1E-9;

/// Fixed DH parameters of one link together with the travel limits of its joint.
/// The joint angle itself is not stored here, it is passed to every call.
///
/// The parameters follow the convention where the row of joint `i` holds the twist
/// and length of the previous link (`alpha`, `a`) and the offset `d` along its own axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhJoint {
    /// Link length, along the X axis of the previous frame.
    pub a: f64,

    /// Link twist, around the X axis of the previous frame.
    pub alpha: f64,

    /// Link offset, along the Z axis (the joint axis).
    pub d: f64,

    /// Lowest allowed joint angle, inclusive.
    pub low: f64,

    /// Highest allowed joint angle, inclusive.
    pub high: f64,
}

impl DhJoint {
    pub fn new(a: f64, alpha: f64, d: f64, low: f64, high: f64) -> Self {
        DhJoint { a, alpha, d, low, high }
    }

    /// Joint without practical travel limits.
    pub fn unlimited(a: f64, alpha: f64, d: f64) -> Self {
        DhJoint::new(a, alpha, d, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Local homogeneous transform of this joint at angle theta:
    /// ```text
    /// | cosθ        -sinθ        0     a       |
    /// | sinθ·cosα    cosθ·cosα  -sinα  -sinα·d |
    /// | sinθ·sinα    cosθ·sinα   cosα   cosα·d |
    /// | 0            0           0      1      |
    /// ```
    pub fn transform_matrix(&self, theta: f64) -> Matrix4<f64> {
        let (st, ct) = theta.sin_cos();
        let (sa, ca) = self.alpha.sin_cos();

        Matrix4::new(
            ct, -st, 0.0, self.a,
            st * ca, ct * ca, -sa, -sa * self.d,
            st * sa, ct * sa, ca, ca * self.d,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Same transform as [`DhJoint::transform_matrix`], as a rigid body pose.
    pub fn transform(&self, theta: f64) -> Pose {
        let (st, ct) = theta.sin_cos();
        let (sa, ca) = self.alpha.sin_cos();

        let rotation = Matrix3::new(
            ct, -st, 0.0,
            st * ca, ct * ca, -sa,
            st * sa, ct * sa, ca,
        );
        let translation = Translation3::new(self.a, -sa * self.d, ca * self.d);

        Pose::from_parts(
            translation,
            UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation)),
        )
    }

    /// Checks the joint angle against the limits, both bounds inclusive.
    pub fn is_within_limit(&self, theta: f64) -> bool {
        self.low <= theta && theta <= self.high
    }

    /// Among the angles theta + 2πk, find the one that is within the limits and closest to
    /// the reference. Returns None if no such angle is within the limits.
    pub fn nearest_within_limits(&self, theta: f64, reference: f64) -> Option<f64> {
        if !theta.is_finite() {
            return None;
        }
        let k_min = ((self.low - LIMIT_TOLERANCE - theta) / TWO_PI).ceil();
        let k_max = ((self.high + LIMIT_TOLERANCE - theta) / TWO_PI).floor();
        if k_min > k_max {
            return None;
        }

        // Distance to the reference is convex in k, so clamping the free optimum is enough.
        let k = ((reference - theta) / TWO_PI).round().clamp(k_min, k_max);
        Some((theta + TWO_PI * k).clamp(self.low, self.high))
    }
}
