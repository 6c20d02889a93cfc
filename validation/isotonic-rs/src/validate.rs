use isotonic_rs::prelude::*;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize)]
struct ValidationData {
    name: String,
    notes: String,
    input: InputData,
    params: Params,
    #[serde(skip_deserializing)]
    result: ResultData,
}

#[derive(Debug, Deserialize, Serialize)]
struct InputData {
    /// First coordinate, or row-major points when `dimensions > 2`.
    x: Vec<f64>,
    #[serde(default)]
    y: Option<Vec<f64>>,
    v: Vec<f64>,
    #[serde(default)]
    w: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Params {
    p: u32,
    #[serde(default)]
    n_values: Option<usize>,
    #[serde(default)]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct ResultData {
    fitted: Vec<f64>,
    levels: Vec<f64>,
    /// `(x, value)` breakpoints of the interpolant; 1-D fits only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    knots: Vec<(f64, f64)>,
    weighted_sse: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let input_dir = Path::new("../output/reference");
    let output_dir = Path::new("../output/isotonic_rs");

    if !input_dir.exists() {
        eprintln!(
            "Input directory {:?} does not exist. Run validate.py first.",
            input_dir
        );
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            println!("Processing {:?}", path.file_name().unwrap_or_default());
            process_file(&path, output_dir)?;
        }
    }

    Ok(())
}

fn process_file(input_path: &Path, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::open(input_path)?;
    let mut data: ValidationData = serde_json::from_reader(file)?;

    let input = &data.input;
    let params = &data.params;

    let mut builder = Isotonic::new().p(params.p);
    if let Some(n) = params.n_values {
        builder = builder.n_values(n);
    }

    let mut knots = Vec::new();
    let (fitted, levels, diagnostics) = match (params.dimensions, &input.y) {
        (Some(k), _) if k != 2 => {
            let model = builder.dimensions(k).adapter(Multivariate).build()?;
            let fit = match &input.w {
                Some(w) => model.fit_weighted(&input.x, &input.v, w)?,
                None => model.fit(&input.x, &input.v)?,
            };
            (fit.fitted_values().to_vec(), fit.levels(), *fit.diagnostics())
        }
        (_, Some(y)) => {
            let model = builder.adapter(Bivariate).build()?;
            let fit = match &input.w {
                Some(w) => model.fit_weighted(&input.x, y, &input.v, w)?,
                None => model.fit(&input.x, y, &input.v)?,
            };
            (fit.fitted_values().to_vec(), fit.levels(), *fit.diagnostics())
        }
        (_, None) => {
            let model = builder.adapter(Univariate).build()?;
            let fit = match &input.w {
                Some(w) => model.fit_weighted(&input.x, &input.v, w)?,
                None => model.fit(&input.x, &input.v)?,
            };
            let line = fit.interpolant();
            knots = line.keys().iter().copied().zip(line.values().iter().copied()).collect();
            (fit.fitted_values().to_vec(), fit.levels(), *fit.diagnostics())
        }
    };

    data.result = ResultData {
        fitted,
        levels,
        knots,
        weighted_sse: diagnostics.weighted_sse,
    };

    let file_name = input_path.file_name().ok_or("input path has no file name")?;
    let output_path = output_dir.join(file_name);
    let output_json = serde_json::to_string_pretty(&data)?;
    fs::write(output_path, output_json)?;

    Ok(())
}
