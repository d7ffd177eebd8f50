//! Plot data files (JSON or YAML).
//!
//! ```yaml
//! x: ["2013-01-01", "2013-01-02", "2013-01-03"]
//! y: [0, 1]
//! z: [[0, 1, 2], [3, 4, 5]]
//! levels: [1, 2, 4]
//! colors: [red, "#0000ff"]
//! extend: both
//! ```
//!
//! `z` is written row by row. `x` and `y` are flat lists or lists of rows;
//! string entries in `x` are datetimes and switch the axes to a date scale.

use anyhow::{bail, Context, Result};
use isoplot_builtins::{days_since_epoch, parse_datetime, Tensor};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct PlotData {
    #[serde(default)]
    pub x: Option<Coordinate>,
    #[serde(default)]
    pub y: Option<Coordinate>,
    pub z: Vec<Vec<f64>>,
    #[serde(default)]
    pub levels: Option<Vec<f64>>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub extend: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Vector(Vec<AxisValue>),
    Grid(Vec<Vec<AxisValue>>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Text(String),
}

/// Tensors ready for the contour builtins.
#[derive(Debug)]
pub struct PlotInputs {
    /// `None` for the z-only form.
    pub axes: Option<(Tensor, Tensor)>,
    pub z: Tensor,
    pub x_is_datetime: bool,
}

impl PlotData {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON data: {}", path.display())),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML data: {}", path.display())),
            _ => serde_json::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .with_context(|| {
                    format!(
                        "Could not parse data file {} (tried JSON, YAML)",
                        path.display()
                    )
                }),
        }
    }

    pub fn to_inputs(&self) -> Result<PlotInputs> {
        let z = Tensor::from_rows(&self.z)
            .map_err(anyhow::Error::msg)
            .context("Invalid z data")?;
        let axes = match (&self.x, &self.y) {
            (Some(x), Some(y)) => Some((
                coordinate_tensor("x", x)?,
                coordinate_tensor("y", y)?,
            )),
            (None, None) => None,
            _ => bail!("x and y must be given together"),
        };
        let x_is_datetime = self.x.as_ref().is_some_and(Coordinate::has_text);
        Ok(PlotInputs {
            axes,
            z,
            x_is_datetime,
        })
    }
}

impl Coordinate {
    fn has_text(&self) -> bool {
        let is_text = |v: &AxisValue| matches!(v, AxisValue::Text(_));
        match self {
            Coordinate::Vector(values) => values.iter().any(is_text),
            Coordinate::Grid(rows) => rows.iter().flatten().any(is_text),
        }
    }
}

impl AxisValue {
    fn to_f64(&self) -> Result<f64, String> {
        match self {
            AxisValue::Number(v) => Ok(*v),
            AxisValue::Text(text) => parse_datetime(text).map(|dt| days_since_epoch(&dt)),
        }
    }
}

fn coordinate_tensor(name: &str, coordinate: &Coordinate) -> Result<Tensor> {
    let convert = |values: &[AxisValue]| -> Result<Vec<f64>> {
        values
            .iter()
            .map(AxisValue::to_f64)
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid {name} value"))
    };
    match coordinate {
        Coordinate::Vector(values) => Ok(Tensor::vector(convert(values)?)),
        Coordinate::Grid(rows) => {
            let rows = rows
                .iter()
                .map(|row| convert(row))
                .collect::<Result<Vec<_>>>()?;
            Tensor::from_rows(&rows)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid {name} data"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_and_nested_coordinates() {
        let data: PlotData =
            serde_json::from_str(r#"{"x": [0, 1, 2], "y": [[0, 0, 0], [1, 1, 1]], "z": [[1, 2, 3], [4, 5, 6]]}"#)
                .unwrap();
        let inputs = data.to_inputs().unwrap();
        let (x, y) = inputs.axes.unwrap();
        assert_eq!(x.shape, vec![3]);
        assert_eq!(y.shape, vec![2, 3]);
        assert_eq!(inputs.z.shape, vec![2, 3]);
        assert!(!inputs.x_is_datetime);
    }

    #[test]
    fn datetime_strings_become_days() {
        let data: PlotData = serde_yaml::from_str(
            "x: ['2013-01-01', '2013-01-02T12:00:00']\ny: [0]\nz: [[1, 2]]\n",
        )
        .unwrap();
        let inputs = data.to_inputs().unwrap();
        let (x, _) = inputs.axes.unwrap();
        assert_eq!(x.data, vec![15706.0, 15707.5]);
        assert!(inputs.x_is_datetime);
    }

    #[test]
    fn z_only_and_half_axes() {
        let data: PlotData = serde_json::from_str(r#"{"z": [[1, 2], [3, 4]]}"#).unwrap();
        assert!(data.to_inputs().unwrap().axes.is_none());

        let data: PlotData = serde_json::from_str(r#"{"x": [0, 1], "z": [[1, 2]]}"#).unwrap();
        assert!(data.to_inputs().is_err());
    }

    #[test]
    fn bad_rows_and_dates_are_reported() {
        let data: PlotData = serde_json::from_str(r#"{"z": [[1, 2], [3]]}"#).unwrap();
        let err = data.to_inputs().unwrap_err();
        assert!(format!("{err:#}").contains("row 1 has 1 elements"), "{err:#}");

        let data: PlotData =
            serde_json::from_str(r#"{"x": ["yesterday"], "y": [0], "z": [[1]]}"#).unwrap();
        assert!(data.to_inputs().is_err());
    }
}
