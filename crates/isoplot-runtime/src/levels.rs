//! Contour level selection.

use log::warn;

use crate::error::{plotting_error, PlotError, PlotResult};

pub const DEFAULT_LEVELS: usize = 10;
/// Upper bound on generated levels, for both counts and steps.
pub const MAX_LEVELS: usize = 10_000;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ContourLevelSpec {
    #[default]
    Auto,
    Count(usize),
    Values(Vec<f64>),
    Step(f64),
}

impl ContourLevelSpec {
    /// Interpret a user-supplied level vector. A single value is a level count.
    pub fn from_values(name: &str, values: &[f64]) -> PlotResult<Self> {
        match values {
            [count] => Self::from_count(name, *count),
            _ => {
                check_strictly_increasing(name, values)?;
                Ok(ContourLevelSpec::Values(values.to_vec()))
            }
        }
    }

    pub fn from_count(name: &str, value: f64) -> PlotResult<Self> {
        if !value.is_finite() {
            return Err(plotting_error(name, format!("{name}: level count must be finite")));
        }
        let rounded = value.round();
        if rounded < 1.0 {
            return Err(plotting_error(name, format!("{name}: level count must be positive")));
        }
        if rounded > MAX_LEVELS as f64 {
            return Err(too_many_levels(name));
        }
        Ok(ContourLevelSpec::Count(rounded as usize))
    }

    pub fn from_step(name: &str, step: f64) -> PlotResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(plotting_error(
                name,
                format!("{name}: LevelStep must be a positive, finite number"),
            ));
        }
        Ok(ContourLevelSpec::Step(step))
    }

    /// Concrete levels for data spanning `z_range`.
    ///
    /// Explicit values are returned as given; every other form needs a finite
    /// data range.
    pub fn resolve(&self, name: &str, z_range: Option<(f64, f64)>) -> PlotResult<Vec<f64>> {
        let data_range = || {
            z_range.ok_or_else(|| {
                plotting_error(name, format!("{name}: unable to determine data range"))
            })
        };
        match self {
            ContourLevelSpec::Values(values) => {
                check_strictly_increasing(name, values)?;
                Ok(values.clone())
            }
            ContourLevelSpec::Auto => {
                let (min_z, max_z) = data_range()?;
                Ok(evenly_spaced_levels(DEFAULT_LEVELS, min_z, max_z))
            }
            ContourLevelSpec::Count(count) => {
                if *count == 0 {
                    return Err(plotting_error(
                        name,
                        format!("{name}: level count must be positive"),
                    ));
                }
                if *count > MAX_LEVELS {
                    return Err(too_many_levels(name));
                }
                let (min_z, max_z) = data_range()?;
                Ok(evenly_spaced_levels(*count, min_z, max_z))
            }
            ContourLevelSpec::Step(step) => {
                if *step <= 0.0 || !step.is_finite() {
                    return Err(plotting_error(
                        name,
                        format!("{name}: LevelStep must be a positive, finite number"),
                    ));
                }
                let (min_z, max_z) = data_range()?;
                if (max_z - min_z) / step > MAX_LEVELS as f64 {
                    return Err(too_many_levels(name));
                }
                Ok(stepped_levels(*step, min_z, max_z))
            }
        }
    }
}

fn too_many_levels(name: &str) -> PlotError {
    plotting_error(name, format!("{name}: level count is too large (at most {MAX_LEVELS})"))
}

fn check_strictly_increasing(name: &str, values: &[f64]) -> PlotResult<()> {
    if values.is_empty() {
        return Err(plotting_error(
            name,
            format!("{name}: level vector must contain at least one value"),
        ));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(plotting_error(name, format!("{name}: level values must be finite")));
    }
    if values.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(plotting_error(
            name,
            format!("{name}: level values must be strictly increasing"),
        ));
    }
    Ok(())
}

fn evenly_spaced_levels(count: usize, min_z: f64, max_z: f64) -> Vec<f64> {
    if count <= 1 || (max_z - min_z).abs() < f64::EPSILON {
        return vec![min_z];
    }
    let step = (max_z - min_z) / (count - 1) as f64;
    (0..count).map(|i| min_z + step * i as f64).collect()
}

fn stepped_levels(step: f64, min_z: f64, max_z: f64) -> Vec<f64> {
    let max = if max_z <= min_z { min_z + 1.0 } else { max_z };
    let mut levels = Vec::new();
    let mut i = 0usize;
    loop {
        let value = min_z + step * i as f64;
        if value > max {
            break;
        }
        levels.push(value);
        i += 1;
    }
    match levels.last() {
        Some(&last) if last < max => levels.push(max),
        Some(_) => {}
        None => levels.push(min_z),
    }
    levels
}

/// Filled contours need band edges; widen a single level to the data range.
pub fn ensure_fill_levels(
    name: &str,
    spec: &ContourLevelSpec,
    z_range: Option<(f64, f64)>,
) -> PlotResult<Vec<f64>> {
    let levels = spec.resolve(name, z_range)?;
    if levels.len() >= 2 {
        return Ok(levels);
    }
    let (min_z, max_z) = z_range.unwrap_or((levels[0], levels[0]));
    let second = if (max_z - min_z).abs() < f64::EPSILON {
        min_z + 1.0
    } else {
        max_z
    };
    warn!("{name}: widening single fill level to [{min_z}, {second}]");
    Ok(vec![min_z, second])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_levels_span_the_range() {
        let levels = ContourLevelSpec::Auto.resolve("contour", Some((0.0, 9.0))).unwrap();
        assert_eq!(levels.len(), DEFAULT_LEVELS);
        assert_eq!(levels[0], 0.0);
        assert!((levels[9] - 9.0).abs() < 1e-12);
    }

    #[test]
    fn flat_field_collapses_to_one_level() {
        let levels = ContourLevelSpec::Count(5).resolve("contour", Some((2.0, 2.0))).unwrap();
        assert_eq!(levels, vec![2.0]);
    }

    #[test]
    fn step_includes_the_maximum() {
        let levels = ContourLevelSpec::Step(0.4).resolve("contour", Some((0.0, 1.0))).unwrap();
        assert_eq!(levels.len(), 4);
        assert_eq!(*levels.last().unwrap(), 1.0);
    }

    #[test]
    fn explicit_values_need_no_data_range() {
        let spec = ContourLevelSpec::Values(vec![2.0, 4.0, 8.0, 10.0]);
        assert_eq!(spec.resolve("contour", None).unwrap(), vec![2.0, 4.0, 8.0, 10.0]);
        assert!(ContourLevelSpec::Auto.resolve("contour", None).is_err());
    }

    #[test]
    fn single_value_is_a_count() {
        assert_eq!(
            ContourLevelSpec::from_values("contour", &[4.0]).unwrap(),
            ContourLevelSpec::Count(4)
        );
        assert!(ContourLevelSpec::from_values("contour", &[0.0]).is_err());
        assert!(ContourLevelSpec::from_values("contour", &[]).is_err());
    }

    #[test]
    fn huge_counts_are_rejected() {
        let err = ContourLevelSpec::from_values("contour", &[1e20]).unwrap_err();
        assert_eq!(err.message(), "contour: level count is too large (at most 10000)");
        assert!(ContourLevelSpec::from_count("contour", MAX_LEVELS as f64).is_ok());

        let err = ContourLevelSpec::Count(usize::MAX)
            .resolve("contourf", Some((0.0, 1.0)))
            .unwrap_err();
        assert!(err.message().starts_with("contourf: level count is too large"));
    }

    #[test]
    fn tiny_steps_are_rejected() {
        let err = ContourLevelSpec::Step(1e-12)
            .resolve("contour", Some((0.0, 1.0)))
            .unwrap_err();
        assert!(err.message().starts_with("contour: level count is too large"));
    }

    #[test]
    fn fill_levels_are_widened() {
        let spec = ContourLevelSpec::Values(vec![5.0]);
        assert_eq!(
            ensure_fill_levels("contourf", &spec, Some((0.0, 10.0))).unwrap(),
            vec![0.0, 10.0]
        );
        assert_eq!(
            ensure_fill_levels("contourf", &ContourLevelSpec::Auto, Some((3.0, 3.0))).unwrap(),
            vec![3.0, 4.0]
        );
    }
}
