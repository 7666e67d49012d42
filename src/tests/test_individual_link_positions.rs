use std::f64::consts::FRAC_PI_2;

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

use crate::kinematic_error::KinematicError;
use crate::kinematic_traits::{Joints, Kinematics, Pose};
use crate::kinematics_impl::DhKinematics;
use crate::parameters::dh_kinematics::Parameters;
use crate::tests::test_utils::are_matrices_close;
use crate::tool::make_frame;

const SMALL: f64 = 1e-9;

/// Frame turned by -90 degrees around X: Y points down, Z along Y of the base.
fn twisted() -> Matrix3<f64> {
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, 0.0, 1.0,
        0.0, -1.0, 0.0,
    )
}

fn check_xyz(poses: [Pose; 6], expected_positions: [(f64, f64, f64); 6]) {
    for (i, (pose, expected)) in poses.iter().zip(expected_positions.iter()).enumerate() {
        let translation = pose.translation.vector;
        assert!((translation.x - expected.0).abs() < SMALL,
                "Pose {} X: expected {}, got {}", i + 1, expected.0, translation.x);
        assert!((translation.y - expected.1).abs() < SMALL,
                "Pose {} Y: expected {}, got {}", i + 1, expected.1, translation.y);
        assert!((translation.z - expected.2).abs() < SMALL,
                "Pose {} Z: expected {}, got {}", i + 1, expected.2, translation.z);
    }
}

fn check_rotation(expected: &Matrix3<f64>, i: usize, actual: &UnitQuaternion<f64>) {
    let actual = actual.to_rotation_matrix();
    assert!((actual.matrix() - expected).amax() < SMALL,
            "Pose {} rotation: expected {}, got {}", i + 1, expected, actual.matrix());
}

fn pose(rotation: Matrix3<f64>, x: f64, y: f64, z: f64) -> Pose {
    Pose::from_parts(
        Vector3::new(x, y, z).into(),
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation)),
    )
}

fn fanuc() -> DhKinematics {
    DhKinematics::new(Parameters::fanuc_lr_mate_200id()).expect("Preset must be valid")
}

#[test]
fn test_forward_kinematics_at_zero() {
    let joints: Joints = [0.0; 6];
    let robot = fanuc();
    let poses = robot.forward_with_joint_poses(&joints).unwrap();

    // Upper arm forward, forearm straight up, flange facing up
    let expected_positions = [
        (0.0, 0.0, 0.33),      // 1
        (0.05, 0.0, 0.33),     // 2
        (0.38, 0.0, 0.33),     // 3
        (0.415, 0.0, 0.665),   // 4
        (0.415, 0.0, 0.665),   // 5, wrist center
        (0.415, 0.0, 0.745),   // 6, flange
    ];
    check_xyz(poses, expected_positions);

    let identity = Matrix3::identity();
    for (i, expected) in [identity, twisted(), twisted(), identity, twisted(), identity].iter().enumerate() {
        check_rotation(expected, i, &poses[i].rotation);
    }

    // Check also if the tcp-only version provides the same output
    let tcp = robot.forward(&joints).unwrap();
    assert!(are_matrices_close(&tcp, &poses[5], SMALL));
}

#[test]
fn test_forward_kinematics_upper_arm_up() {
    let joints: Joints = [0.0, -FRAC_PI_2, 0.0, 0.0, 0.0, 0.0];
    let poses = fanuc().forward_with_joint_poses(&joints).unwrap();

    // Upper arm vertical, forearm pointing backwards
    let expected_positions = [
        (0.0, 0.0, 0.33),
        (0.05, 0.0, 0.33),
        (0.05, 0.0, 0.66),
        (-0.285, 0.0, 0.695),
        (-0.285, 0.0, 0.695),
        (-0.365, 0.0, 0.695),
    ];
    check_xyz(poses, expected_positions);
}

#[test]
fn test_quarter_turns() {
    let robot = fanuc();
    let pitched_down = Matrix3::new(
        0.0, 0.0, 1.0,
        0.0, 1.0, 0.0,
        -1.0, 0.0, 0.0,
    );
    let pitched_up = Matrix3::new(
        0.0, 0.0, -1.0,
        0.0, 1.0, 0.0,
        1.0, 0.0, 0.0,
    );
    let turned = Matrix3::new(
        0.0, -1.0, 0.0,
        1.0, 0.0, 0.0,
        0.0, 0.0, 1.0,
    );

    let cases = [
        ([0.0; 6], pose(Matrix3::identity(), 0.415, 0.0, 0.745)),
        ([FRAC_PI_2, 0.0, 0.0, 0.0, 0.0, 0.0], pose(turned, 0.0, 0.415, 0.745)),
        ([0.0, -FRAC_PI_2, 0.0, 0.0, 0.0, 0.0], pose(pitched_up, -0.365, 0.0, 0.695)),
        ([0.0, 0.0, FRAC_PI_2, 0.0, 0.0, 0.0], pose(pitched_down, 0.795, 0.0, 0.295)),
        ([0.0, 0.0, 0.0, FRAC_PI_2, 0.0, 0.0], pose(turned, 0.415, 0.0, 0.745)),
        ([0.0, 0.0, 0.0, 0.0, FRAC_PI_2, 0.0], pose(pitched_down, 0.495, 0.0, 0.665)),
        ([0.0, 0.0, 0.0, 0.0, 0.0, FRAC_PI_2], pose(turned, 0.415, 0.0, 0.745)),
    ];

    for (joints, expected) in cases.iter() {
        let actual = robot.forward(joints).unwrap();
        assert!(are_matrices_close(&actual, expected, SMALL),
                "Joints {:?}: expected\n{}got\n{}", joints, expected.to_homogeneous(), actual.to_homogeneous());
    }
}

#[test]
fn test_puma_lateral_offset() {
    let robot = DhKinematics::new(Parameters::puma_560()).unwrap();
    let poses = robot.forward_with_joint_poses(&[0.0; 6]).unwrap();

    // Shoulder offset moves everything after J2 sideways by d3
    let expected_positions = [
        (0.0, 0.0, 0.0),
        (0.0, 0.0, 0.0),
        (0.4318, 0.15005, 0.0),
        (0.4521, 0.15005, -0.4318),
        (0.4521, 0.15005, -0.4318),
        (0.4521, 0.15005, -0.4318),
    ];
    check_xyz(poses, expected_positions);
}

#[test]
fn test_tool_follows_last_joint() {
    let tool = make_frame([0.01, 0.02, 0.15], [0.1, 0.2, 0.3]);
    let robot = DhKinematics::new(Parameters::fanuc_lr_mate_200id().with_tool(tool)).unwrap();
    let joints = [0.1, -0.9, 0.5, 0.3, 0.7, -0.4];

    // Joint poses do not include the tool
    let poses = robot.forward_with_joint_poses(&joints).unwrap();
    let tcp = robot.forward(&joints).unwrap();
    assert!(are_matrices_close(&tcp, &(poses[5] * tool), SMALL));

    let bare = fanuc().forward_with_joint_poses(&joints).unwrap();
    for i in 0..6 {
        assert!(are_matrices_close(&poses[i], &bare[i], SMALL), "Pose {}", i + 1);
    }
}

#[test]
fn test_joint_poses_respect_limits() {
    let robot = fanuc();
    // J2 is limited to 55 degrees upwards
    let joints = [0.0, FRAC_PI_2, 0.0, 0.0, 0.0, 0.0];
    assert_eq!(robot.forward_with_joint_poses(&joints),
               Err(KinematicError::JointLimitViolation { joint: 1, value: FRAC_PI_2 }));
}

#[test]
fn test_matrix_and_pose_agree() {
    let parameters = Parameters::puma_560();
    let joints = [0.4, -0.8, 1.1, -0.3, 0.9, 2.0];
    let mut matrix = parameters.base.to_homogeneous();
    for (joint, theta) in parameters.joints.iter().zip(joints.iter()) {
        matrix *= joint.transform_matrix(*theta);
    }
    matrix *= parameters.tool.to_homogeneous();

    let robot = DhKinematics::new(parameters).unwrap();
    let pose = robot.forward(&joints).unwrap();
    assert!((pose.to_homogeneous() - matrix).amax() < SMALL);
}
