use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, Pose};
use rs_dh_kinematics::kinematics_impl::DhKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::tool::brush_tool;
use rs_dh_kinematics::utils::{as_radians, dump_joints, dump_pose, dump_solutions};
use rs_dh_kinematics::workspace::Workspace;
use nalgebra::{Translation3, UnitQuaternion};

/// Usage example.
fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    let robot = DhKinematics::new(Parameters::fanuc_lr_mate_200id())?;
    let joints: Joints = as_radians([10, -70, 20, 30, 40, 50]); // Joints are alias of [f64; 6]
    println!("Initial joints:");
    dump_joints(&joints);

    let pose: Pose = robot.forward(&joints)?; // Pose is alias of nalgebra::Isometry3<f64>
    println!("Flange pose:");
    dump_pose(&pose);

    println!("All solutions, closest to the initial joints first:");
    dump_solutions(&robot.inverse_continuing(&pose, &joints));

    println!("Initial joints with singularity J5 = 0:");
    let singular: Joints = as_radians([10, -70, 20, 30, 0, 50]);
    dump_joints(&singular);
    let pose = robot.forward(&singular)?;
    println!("J4 + J6 rotation assumed to be previously concentrated on J4 only:");
    let previous: Joints = as_radians([10, -70, 20, 80, 0, 0]);
    let solution = robot.solve(&pose, &previous)?;
    dump_joints(&solution.joints);
    if let Some(singularity) = solution.degenerate {
        println!("Flagged: {}", singularity);
    }

    println!("With the paint brush 1 as the tool, tip pose:");
    let painter = DhKinematics::new(
        Parameters::fanuc_lr_mate_200id().with_tool(brush_tool(1).unwrap_or_else(Pose::identity)))?;
    dump_pose(&painter.forward(&joints)?);

    println!("Joint limit violation (J5 is limited to ±125 degrees):");
    if let Err(error) = robot.forward(&as_radians([0, -90, 0, 0, 150, 0])) {
        println!("{}", error);
    }

    println!("Target out of reach:");
    let far = Pose::from_parts(Translation3::new(2.0, 0.0, 0.5), UnitQuaternion::identity());
    if let Err(error) = robot.solve(&far, &joints) {
        println!("{}", error);
    }

    let parameters = Parameters::fanuc_lr_mate_200id();
    let guarded = DhKinematics::new(parameters.with_workspace(Workspace::enclosing(&parameters)))?;
    if let Some(workspace) = guarded.parameters().workspace {
        println!("Workspace box: {:?} .. {:?}", workspace.min.as_slice(), workspace.max.as_slice());
    }
    println!("Same target, rejected by the workspace box: {} solutions", guarded.inverse(&far).len());

    #[cfg(feature = "allow_filesystem")] {
        // This requires YAML library
        println!("Robot configuration:\n{}", parameters.to_yaml());
    }
    Ok(())
}
