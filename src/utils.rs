//! Helper functions

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion};

use crate::kinematic_error::KinematicError;
use crate::kinematic_traits::{Joints, Pose, Solutions};

/// Maximal deviation of R^T * R from identity accepted as a rotation matrix.
const ORTHONORMAL_TOLERANCE: f64 = 1E-6;

/// Checks the solution for validity. This is only internally needed as all returned
/// solutions are already checked.
pub(crate) mod dh_kinematics {
    use crate::kinematic_traits::Joints;

    /// Checks if all elements in the array are finite
    pub fn is_valid(qs: &Joints) -> bool {
        qs.iter().all(|&q| q.is_finite())
    }
}

/// Print joint values for all solutions, converting radianst to degrees.
pub fn dump_solutions(solutions: &Solutions) {
    if solutions.is_empty() {
        println!("No solutions");
    }
    for sol_idx in 0..solutions.len() {
        let mut row_str = String::new();
        for joint_idx in 0..6 {
            let computed = solutions[sol_idx][joint_idx];
            row_str.push_str(&format!("{:5.2} ", computed.to_degrees()));
        }
        println!("[{}]", row_str.trim_end());
    }
}

/// Print joint values, converting radianst to degrees.
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..6 {
        let computed = joints[joint_idx];
        row_str.push_str(&format!("{:5.2} ", computed.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

pub fn dump_pose(isometry: &Isometry3<f64>) {
    let translation = isometry.translation.vector;
    let (roll, pitch, yaw) = isometry.rotation.euler_angles();

    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  rpy: {:.3},{:.3},{:.3}",
        translation.x, translation.y, translation.z,
        roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees()
    );
}

/// Allows to specify joint values in degrees (converts to radians)
pub fn as_radians(degrees: [i32; 6]) -> Joints {
    std::array::from_fn(|i| (degrees[i] as f64).to_radians())
}

/// Formatting of angles for YAML output: deg(x) if the degrees convert back into exactly
/// the same value, plain radians otherwise.
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    let degrees = x.to_degrees();
    if degrees.to_radians() == *x {
        format!("deg({})", degrees)
    } else {
        format!("{}", x)
    }
}

/// Total joint-space displacement: the sum of absolute differences of all joints.
pub fn joint_displacement(from: &Joints, to: &Joints) -> f64 {
    from.iter().zip(to.iter()).map(|(a, b)| (a - b).abs()).sum()
}

/// Converts joint values received as a slice (for instance, one row of a path file)
/// into Joints. Fails if there are not exactly six finite values.
pub fn joints_from_slice(values: &[f64]) -> Result<Joints, KinematicError> {
    let joints: Joints = values.try_into().map_err(|_| {
        KinematicError::InvalidInputShape(format!("expected 6 joint values, got {}", values.len()))
    })?;
    if !dh_kinematics::is_valid(&joints) {
        return Err(KinematicError::InvalidInputShape(format!(
            "joint values must be finite: {:?}", joints
        )));
    }
    Ok(joints)
}

/// Converts homogeneous 4x4 transformation into Pose. Fails if the matrix is not a rigid
/// transform: bottom row must be [0 0 0 1], rotation orthonormal with determinant +1.
pub fn pose_from_matrix(matrix: &Matrix4<f64>) -> Result<Pose, KinematicError> {
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(KinematicError::InvalidInputShape("matrix has non-finite elements".into()));
    }
    let bottom = [matrix[(3, 0)], matrix[(3, 1)], matrix[(3, 2)], matrix[(3, 3)]];
    if bottom != [0.0, 0.0, 0.0, 1.0] {
        return Err(KinematicError::InvalidInputShape(format!(
            "bottom row must be [0 0 0 1], got {:?}", bottom
        )));
    }

    let rotation: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
    let deviation = (rotation.transpose() * rotation - Matrix3::identity()).amax();
    if deviation > ORTHONORMAL_TOLERANCE {
        return Err(KinematicError::InvalidInputShape(format!(
            "rotation is not orthonormal (deviation {:e})", deviation
        )));
    }
    if rotation.determinant() < 0.0 {
        return Err(KinematicError::InvalidInputShape("rotation is a reflection (determinant -1)".into()));
    }

    let translation = Translation3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
    Ok(Pose::from_parts(
        translation,
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation)),
    ))
}

/// Homogeneous 4x4 transformation matrix of the pose.
pub fn pose_to_matrix(pose: &Pose) -> Matrix4<f64> {
    pose.to_homogeneous()
}

/// Checks that the pose has only finite components.
pub(crate) fn is_finite_pose(pose: &Pose) -> bool {
    pose.translation.vector.iter().all(|v| v.is_finite())
        && pose.rotation.coords.iter().all(|v| v.is_finite())
}

pub fn assert_pose_eq(ta: &Isometry3<f64>, tb: &Isometry3<f64>,
                      distance_tolerance: f64, angular_tolerance: f64) -> bool {
    fn bad(ta: &Isometry3<f64>, tb: &Isometry3<f64>) {
        dump_pose(ta);
        dump_pose(tb);
    }

    let translation_distance = (ta.translation.vector - tb.translation.vector).norm();
    let angular_distance = ta.rotation.angle_to(&tb.rotation);

    if translation_distance.abs() > distance_tolerance {
        bad(ta, tb);
        panic!("Poses have too different translations");
    }

    if angular_distance.abs() > angular_tolerance {
        bad(ta, tb);
        panic!("Poses have too different angles");
    }
    true
}
