//! Text formats for kernels and level counts used on the command line.
//!
//! Errors are plain strings so these can be used as clap value parsers.

use pixel_filters::Levels;

/// Parse `"1,2,1;2,4,2;1,2,1"` into rows. Rows are separated by `;`,
/// weights by `,` or whitespace.
pub fn parse_kernel(text: &str) -> Result<Vec<Vec<f64>>, String> {
    let rows: Vec<Vec<f64>> = text
        .split(';')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|cell| !cell.is_empty())
                .map(|cell| {
                    cell.parse::<f64>()
                        .map_err(|_| format!("invalid kernel weight '{}'", cell))
                })
                .collect::<Result<Vec<f64>, String>>()
        })
        .collect::<Result<_, String>>()?;

    if rows.is_empty() {
        return Err("kernel is empty".to_string());
    }
    Ok(rows)
}

/// Parse `"4"` (all channels) or `"2,4,8"` (R,G,B).
pub fn parse_levels(text: &str) -> Result<Levels, String> {
    let counts = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid level count '{}'", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match counts.as_slice() {
        [n] => Ok(Levels::uniform(*n)),
        [r, g, b] => Ok(Levels::new(*r, *g, *b)),
        _ => Err(format!(
            "expected 1 or 3 level counts, got {}",
            counts.len()
        )),
    }
}

/// Render rows back in the form [`parse_kernel`] reads.
pub fn format_kernel(rows: &[Vec<f64>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join(";")
}
