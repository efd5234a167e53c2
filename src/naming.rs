//! Reserved column names and data keys
//!
//! Internal columns carry a `__ggprop_` prefix so they can never collide with
//! aesthetic names or user facet variables.

/// Column added to the unified writer dataset to tell layers apart
pub const SOURCE_COLUMN: &str = "__ggprop_source__";

/// Temporary weight column used while aggregating
pub const WEIGHT_COLUMN: &str = "__ggprop_weight__";

/// Temporary per-stack total used while stacking
pub const STACK_TOTAL_COLUMN: &str = "__ggprop_stack_total__";

/// Data key for the computed frame of layer `idx`
pub fn layer_key(idx: usize) -> String {
    format!("__ggprop_layer_{}__", idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names_share_prefix() {
        assert_eq!(layer_key(2), "__ggprop_layer_2__");
        for name in [SOURCE_COLUMN, WEIGHT_COLUMN, STACK_TOTAL_COLUMN] {
            assert!(name.starts_with("__ggprop_"));
        }
    }
}
