#[cfg(test)]
mod tests {
    use crate::kinematic_error::KinematicError;
    use crate::kinematic_traits::{Kinematics, Pose, Singularity};
    use crate::kinematics_impl::DhKinematics;
    use crate::tests::test_utils;
    use crate::utils::dump_solutions;

    #[test]
    fn test_load_yaml() {
        let filename = "src/tests/data/cases.yaml";
        let result = test_utils::load_yaml(filename);

        if let Err(e) = &result {
            println!("Error loading or parsing YAML file: {}", e);
        }

        assert!(result.is_ok(), "Failed to load or parse the YAML file");

        let cases = result.expect("Expected a valid Cases struct after parsing");

        // Example assertion: the list of cases should not be empty.
        assert!(!cases.is_empty(), "No cases were loaded from the YAML file");
    }

    #[test]
    fn test_forward_ik() {
        let filename = "src/tests/data/cases.yaml";
        let result = test_utils::load_yaml(filename);
        assert!(result.is_ok(), "Failed to load or parse the YAML file: {}", result.unwrap_err());
        let cases = result.expect("Expected a valid Cases struct after parsing");
        let all_parameters = test_utils::create_parameter_map();
        println!("Forward IK: {} test cases", cases.len());

        for case in cases.iter() {
            let parameters = all_parameters.get(&case.parameters).unwrap_or_else(|| {
                panic!("Parameters for the robot [{}] are unknown", &case.parameters)
            });
            let kinematics = DhKinematics::new(*parameters).expect("Preset must be valid");

            let pose = kinematics.forward(&case.joints_in_radians())
                .unwrap_or_else(|e| panic!("Case {}: {}", case.id, e));
            let expected = case.pose.to_isometry();
            assert!(test_utils::are_matrices_close(&pose, &expected, 1E-9),
                    "Forward kinematics does not match for case {}:\n{}\n{}",
                    case.id, pose.to_homogeneous(), expected.to_homogeneous());
        }
    }

    #[test]
    fn test_inverse_ik() {
        let filename = "src/tests/data/cases.yaml";
        let result = test_utils::load_yaml(filename);
        assert!(result.is_ok(), "Failed to load or parse the YAML file");
        let cases = result.expect("Expected a valid Cases struct after parsing");
        let all_parameters = test_utils::create_parameter_map();
        println!("Inverse IK: {} test cases", cases.len());

        for case in cases.iter() {
            let parameters = all_parameters.get(&case.parameters).unwrap_or_else(|| {
                panic!("Parameters for the robot [{}] are unknown", &case.parameters)
            });
            let kinematics = DhKinematics::new(*parameters).expect("Preset must be valid");

            let solutions = kinematics.inverse(&case.pose.to_isometry());
            if test_utils::found_joints_approx_equal(&solutions, &case.joints_in_radians(),
                                                     0.001_f64.to_radians()).is_none() {
                println!("**** No valid solution for case {} on {} ****", case.id, case.parameters);
                println!("Expected joints: {:?}", case.joints);
                println!("Solutions Matrix:");
                dump_solutions(&solutions);
                println!("---");
                panic!("Inverse kinematics does not produce valid solution");
            }

            // Every returned solution must be within limits and reproduce the pose
            for solution in &solutions {
                let pose = kinematics.forward(solution)
                    .unwrap_or_else(|e| panic!("Case {}: solution {:?}: {}", case.id, solution, e));
                assert!(test_utils::are_matrices_close(&pose, &case.pose.to_isometry(), 1E-9),
                        "Case {}: solution {:?} does not reproduce the pose", case.id, solution);
            }
        }
    }

    #[test]
    fn test_inverse_ik_continuing() {
        let filename = "src/tests/data/cases.yaml";
        let result = test_utils::load_yaml(filename);
        assert!(result.is_ok(), "Failed to load or parse the YAML file");
        let cases = result.expect("Expected a valid Cases struct after parsing");
        let all_parameters = test_utils::create_parameter_map();
        println!("Inverse IK: {} test cases", cases.len());

        for case in cases.iter() {
            let parameters = all_parameters.get(&case.parameters).unwrap_or_else(|| {
                panic!("Parameters for the robot [{}] are unknown", &case.parameters)
            });
            let kinematics = DhKinematics::new(*parameters).expect("Preset must be valid");
            let solutions = kinematics.inverse_continuing(
                &case.pose.to_isometry(), &case.joints_in_radians());
            let found_matching =
                test_utils::found_joints_approx_equal(&solutions, &case.joints_in_radians(),
                                                      0.001_f64.to_radians());
            if !matches!(found_matching, Some(0)) {
                println!("**** No valid solution: {:?} for case {} on {} ****",
                         found_matching, case.id, case.parameters);
                println!("Expected joints: {:?}", case.joints);
                println!("Solutions Matrix:");
                dump_solutions(&solutions);
                println!("---");
            }
            assert!(matches!(found_matching, Some(0)),
                    "Fully matching joints must come first. At {}, Expected Some(0), got {:?}",
                    case.id, found_matching);

            // Representatives follow the previous joints, so there is no wrapping either
            assert!(test_utils::max_joint_difference(&solutions[0], &case.joints_in_radians()) < 1E-6,
                    "Case {}: {:?}", case.id, solutions[0]);

            // Sorted by displacement, closest first
            let displacements: Vec<f64> = solutions.iter()
                .map(|s| crate::utils::joint_displacement(s, &case.joints_in_radians()))
                .collect();
            assert!(displacements.windows(2).all(|w| w[0] <= w[1]), "Case {}: {:?}", case.id, displacements);
        }
    }

    #[test]
    fn test_solve_continuing() {
        let filename = "src/tests/data/cases.yaml";
        let cases = test_utils::load_yaml(filename).expect("Failed to load or parse the YAML file");
        let all_parameters = test_utils::create_parameter_map();

        for case in cases.iter() {
            let kinematics = DhKinematics::new(all_parameters[&case.parameters]).unwrap();
            let previous = case.joints_in_radians();
            let solution = kinematics.solve(&case.pose.to_isometry(), &previous)
                .unwrap_or_else(|e| panic!("Case {}: {}", case.id, e));
            assert_eq!(solution.degenerate, None, "Case {}", case.id);
            assert!(test_utils::max_joint_difference(&solution.joints, &previous) < 1E-6,
                    "Case {}: {:?}", case.id, solution.joints);
            assert_eq!(solution.strict(), Ok(solution.joints));
        }
    }

    #[test]
    fn test_pose_is_reached_with_tool_and_base() {
        let filename = "src/tests/data/cases.yaml";
        let cases = test_utils::load_yaml(filename).expect("Failed to load or parse the YAML file");
        let all_parameters = test_utils::create_parameter_map();

        for case in cases.iter() {
            let parameters = all_parameters[&case.parameters]
                .with_base(crate::tool::make_frame([0.2, -0.1, 0.5], [0.0, 0.0, 0.3]))
                .with_tool(crate::tool::make_frame([0.0, 0.05, 0.2], [0.1, 0.0, 0.0]));
            let kinematics = DhKinematics::new(parameters).unwrap();

            let joints = case.joints_in_radians();
            let pose = kinematics.forward(&joints).unwrap();
            let solutions = kinematics.inverse_continuing(&pose, &joints);

            // It must be the matching solution, it must be the first in solutions.
            assert!(matches!(test_utils::found_joints_approx_equal(&solutions, &joints,
                0.001_f64.to_radians()), Some(0)), "Case {}", case.id);
            for solution in &solutions {
                let reached = kinematics.forward(solution).unwrap();
                assert!(test_utils::are_isometries_close(&reached, &pose, 1E-9, 1E-6),
                        "Case {}: solution {:?} does not reproduce the pose", case.id, solution);
            }
        }
    }

    #[test]
    fn test_unreachable_reported() {
        let kinematics = DhKinematics::new(
            crate::parameters::dh_kinematics::Parameters::fanuc_lr_mate_200id()).unwrap();
        let far = Pose::translation(2.0, 0.0, 0.5);
        assert_eq!(kinematics.solve(&far, &[0.0; 6]), Err(KinematicError::Unreachable));
        assert!(kinematics.inverse(&far).is_empty());
    }

    #[test]
    fn test_no_singularity_in_cases() {
        let filename = "src/tests/data/cases.yaml";
        let cases = test_utils::load_yaml(filename).expect("Failed to load or parse the YAML file");
        let all_parameters = test_utils::create_parameter_map();
        for case in cases.iter() {
            let kinematics = DhKinematics::new(all_parameters[&case.parameters]).unwrap();
            let singularity: Option<Singularity> = kinematics.kinematic_singularity(&case.joints_in_radians());
            assert!(singularity.is_none(), "Case {}: {:?}", case.id, singularity);
        }
    }
}
