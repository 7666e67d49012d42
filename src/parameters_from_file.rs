//! Supports extracting DH parameters from YAML file (optional)

use std::path::Path;

use nalgebra::Vector3;
use regex::Regex;
use yaml_rust2::{Yaml, YamlLoader};

use crate::joint::DhJoint;
use crate::kinematic_traits::Pose;
use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::Parameters;
use crate::tool::make_frame;
use crate::workspace::Workspace;

impl Parameters {
    /// Read the robot configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # FANUC LR Mate 200iD
    /// dh_kinematics_joints:
    ///   - { a: 0.0, alpha: 0, d: 0.0, limits: [deg(-170), deg(170)] }
    ///   - { a: 0.05, alpha: deg(-90), d: 0.0, limits: [deg(-190), deg(55)] }
    ///   - { a: 0.33, alpha: 0, d: 0.0, limits: [deg(-100), deg(190)] }
    ///   - { a: 0.035, alpha: deg(90), d: 0.335, limits: [deg(-190), deg(190)] }
    ///   - { a: 0.0, alpha: deg(-90), d: 0.0, limits: [deg(-125), deg(125)] }
    ///   - { a: 0.0, alpha: deg(90), d: 0.08, limits: [deg(-360), deg(360)] }
    /// base: { translation: [0.0, 0.0, 0.33], rpy: [0, 0, 0] }
    /// tool: { translation: [0.0, 0.0, 0.1], rpy: [0, 0, 0] }
    /// workspace: { min: [-1, -1, -0.5], max: [1, 1, 1.5] }
    /// ```
    /// Lengths are in meters. Angles are in radians, or in degrees if written as deg(angle).
    /// Limits (joint without them is unlimited), base, tool and workspace are optional.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Same as [`Parameters::from_yaml_file`], reading YAML from the string.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| ParameterError::ParseError(e.to_string()))?;
        let doc = docs.first()
            .ok_or_else(|| ParameterError::ParseError("empty YAML document".to_string()))?;

        let rows = doc["dh_kinematics_joints"].as_vec()
            .ok_or_else(|| ParameterError::MissingField("dh_kinematics_joints".to_string()))?;
        if rows.len() != 6 {
            return Err(ParameterError::InvalidLength { expected: 6, found: rows.len() });
        }

        let mut joints = [DhJoint::unlimited(0.0, 0.0, 0.0); 6];
        for (i, row) in rows.iter().enumerate() {
            joints[i] = parse_joint(row, i)?;
        }

        let mut parameters = Parameters {
            joints,
            ..Parameters::new()
        };
        if !doc["base"].is_badvalue() {
            parameters.base = parse_frame(&doc["base"], "base")?;
        }
        if !doc["tool"].is_badvalue() {
            parameters.tool = parse_frame(&doc["tool"], "tool")?;
        }
        if !doc["workspace"].is_badvalue() {
            let workspace = &doc["workspace"];
            parameters.workspace = Some(Workspace::new(
                parse_vector(&workspace["min"], "workspace.min")?,
                parse_vector(&workspace["max"], "workspace.max")?,
            ));
        }

        parameters.validate()?;
        Ok(parameters)
    }
}

fn parse_joint(row: &Yaml, index: usize) -> Result<DhJoint, ParameterError> {
    let field = |name: &str| format!("dh_kinematics_joints[{}].{}", index, name);
    let a = parse_length(&row["a"], &field("a"))?;
    let alpha = parse_angle(&row["alpha"], &field("alpha"))?;
    let d = parse_length(&row["d"], &field("d"))?;

    let limits = &row["limits"];
    if limits.is_badvalue() {
        return Ok(DhJoint::unlimited(a, alpha, d));
    }
    let bounds = limits.as_vec()
        .ok_or_else(|| ParameterError::ParseError(format!("{} must be a list", field("limits"))))?;
    if bounds.len() != 2 {
        return Err(ParameterError::InvalidLength { expected: 2, found: bounds.len() });
    }
    let low = parse_angle(&bounds[0], &field("limits"))?;
    let high = parse_angle(&bounds[1], &field("limits"))?;
    Ok(DhJoint::new(a, alpha, d, low, high))
}

fn parse_frame(frame: &Yaml, name: &str) -> Result<Pose, ParameterError> {
    let translation = if frame["translation"].is_badvalue() {
        [0.0; 3]
    } else {
        parse_triple(&frame["translation"], &format!("{}.translation", name), parse_length)?
    };
    let rpy = if frame["rpy"].is_badvalue() {
        [0.0; 3]
    } else {
        parse_triple(&frame["rpy"], &format!("{}.rpy", name), parse_angle)?
    };
    Ok(make_frame(translation, rpy))
}

fn parse_vector(value: &Yaml, field: &str) -> Result<Vector3<f64>, ParameterError> {
    let [x, y, z] = parse_triple(value, field, parse_length)?;
    Ok(Vector3::new(x, y, z))
}

fn parse_triple(
    value: &Yaml,
    field: &str,
    parse: fn(&Yaml, &str) -> Result<f64, ParameterError>,
) -> Result<[f64; 3], ParameterError> {
    let items = value.as_vec()
        .ok_or_else(|| ParameterError::MissingField(field.to_string()))?;
    if items.len() != 3 {
        return Err(ParameterError::InvalidLength { expected: 3, found: items.len() });
    }
    Ok([parse(&items[0], field)?, parse(&items[1], field)?, parse(&items[2], field)?])
}

/// Plain number. Integers are accepted (YAML parses `1` differently from `1.0`).
fn parse_length(value: &Yaml, field: &str) -> Result<f64, ParameterError> {
    match value {
        Yaml::Real(_) => value.as_f64()
            .ok_or_else(|| ParameterError::ParseError(format!("{}: not a number", field))),
        Yaml::Integer(i) => Ok(*i as f64),
        Yaml::BadValue | Yaml::Null => Err(ParameterError::MissingField(field.to_string())),
        other => Err(ParameterError::ParseError(format!("{}: not a number: {:?}", field, other))),
    }
}

/// Number in radians or deg(angle) in degrees.
fn parse_angle(value: &Yaml, field: &str) -> Result<f64, ParameterError> {
    match value {
        Yaml::String(text) => parse_degrees(text),
        _ => parse_length(value, field),
    }
}

fn parse_degrees(text: &str) -> Result<f64, ParameterError> {
    // Regular expression to match the deg(<number>) format
    let re = Regex::new(r"^deg\(\s*([-+]?\d+(\.\d+)?)\s*\)$")
        .map_err(|_| ParameterError::ParseError("Invalid regex pattern".to_string()))?;

    let caps = re.captures(text.trim())
        .ok_or_else(|| ParameterError::WrongAngle(format!("Bad representation: {}", text)))?;
    let degrees: f64 = caps[1].parse()
        .map_err(|_| ParameterError::WrongAngle(text.to_string()))?;
    Ok(degrees.to_radians())
}
