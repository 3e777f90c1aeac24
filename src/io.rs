//! Plain-text output of sampled functions.
use crate::function::{BsplineFunction2d, FunctionEvalWorkspace};
use eyre::WrapErr;
use nalgebra::Point2;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `x y value` lines for every point of the grid `xs × ys`, with `y` varying fastest.
pub fn write_samples_to<W: Write>(
    output: &mut W,
    function: &BsplineFunction2d,
    xs: &[f64],
    ys: &[f64],
) -> std::io::Result<()> {
    let mut workspace = FunctionEvalWorkspace::new(function.space());
    for &x in xs {
        for &y in ys {
            let value = function.evaluate_with(&Point2::new(x, y), &mut workspace).val;
            writeln!(output, "{x} {y} {value}")?;
        }
    }
    Ok(())
}

/// Writes samples of `function` on the grid `xs × ys` to the file at `path`.
pub fn write_samples(path: impl AsRef<Path>, function: &BsplineFunction2d, xs: &[f64], ys: &[f64]) -> eyre::Result<()> {
    let path = path.as_ref();
    let file = File::create(path).wrap_err_with(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_samples_to(&mut writer, function, xs, ys)
        .and_then(|_| writer.flush())
        .wrap_err_with(|| format!("Failed to write samples to {}", path.display()))
}
