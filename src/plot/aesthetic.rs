//! Aesthetic names
//!
//! Normalisation of aliases and the positional aesthetic families.

/// Positional aesthetics along the horizontal axis family
pub const X_FAMILY: &[&str] = &["x", "xmin", "xmax", "xend"];

/// Positional aesthetics along the vertical axis family
pub const Y_FAMILY: &[&str] = &["y", "ymin", "ymax", "yend"];

/// Canonical name for an aesthetic alias
pub fn normalize(name: &str) -> &str {
    match name {
        "colour" => "color",
        "col" => "color",
        other => other,
    }
}

pub fn is_positional(name: &str) -> bool {
    X_FAMILY.contains(&name) || Y_FAMILY.contains(&name)
}

/// Primary aesthetic of a positional family (`ymin` -> `y`)
pub fn primary_aesthetic(name: &str) -> &str {
    if X_FAMILY.contains(&name) {
        "x"
    } else if Y_FAMILY.contains(&name) {
        "y"
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("colour"), "color");
        assert_eq!(normalize("fill"), "fill");
    }

    #[test]
    fn test_positional_families() {
        assert_eq!(primary_aesthetic("ymax"), "y");
        assert!(is_positional("xend"));
        assert!(!is_positional("label"));
    }
}
