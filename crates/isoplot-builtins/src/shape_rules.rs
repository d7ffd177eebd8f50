/// Number of elements implied by `shape`, or `None` if it overflows `usize`.
/// An empty shape is a scalar.
pub fn element_count(shape: &[usize]) -> Option<usize> {
    shape.iter().try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
}

/// Render a shape as a tuple, e.g. `(9, 10)`, `(3,)` or `()`.
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [single] => format!("({single},)"),
        dims => {
            let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// Parse `10`, `9x10` or `3x3x3` into a shape vector.
pub fn parse_shape(text: &str) -> Result<Vec<usize>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "()" {
        return Ok(Vec::new());
    }
    trimmed
        .split(['x', 'X', ','])
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid dimension `{}` in shape `{text}`", part.trim()))
        })
        .collect()
}
