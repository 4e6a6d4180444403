// Parameter colors - Fixed color per known chart parameter
use super::schema::all_parameters;
use std::collections::HashMap;
use std::sync::LazyLock;

/// red, blue, green, yellow, cyan, magenta, orange, purple, teal, olive
const PALETTE: [&str; 10] = [
    "#ff0000", "#0000ff", "#00ff00", "#ffeb04", "#00ffff", "#ff00ff", "#ff8000", "#800080",
    "#008080", "#808000",
];

static PARAMETER_COLORS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    all_parameters()
        .enumerate()
        .map(|(i, parameter)| (parameter, PALETTE[i % PALETTE.len()]))
        .collect()
});

/// Hex color for `parameter`. Parameters outside the catalog get a stable
/// palette entry derived from their name.
pub fn color_for(parameter: &str) -> &'static str {
    if let Some(color) = PARAMETER_COLORS.get(parameter) {
        return *color;
    }
    let hash = parameter
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    PALETTE[hash % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_parameters_cycle_through_palette() {
        assert_eq!(color_for("humidity"), "#ff0000");
        assert_eq!(color_for("temperature"), "#0000ff");
        // 11th parameter wraps around
        assert_eq!(color_for("current"), "#808000");
        assert_eq!(color_for("power"), "#ff0000");
        assert_eq!(color_for("ph"), "#800080");
    }

    #[test]
    fn test_unknown_parameter_is_stable() {
        assert_eq!(color_for("pressure"), color_for("pressure"));
        assert!(PALETTE.contains(&color_for("pressure")));
    }
}
