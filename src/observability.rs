//! Structured diagnostics for the codec pipeline.
//!
//! Stage sizes are reported as key/value metrics through the `log` facade on
//! the `vbz::metrics` target at trace level. When that level is disabled the
//! metric string is never formatted.

/// Logs a structured key-value metric on the `vbz::metrics` target.
///
/// # Example
/// ```
/// use vbz::log_metric;
/// let packed_len = 7;
/// log_metric!("event" = "pack", "packed_len" = packed_len);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if $crate::__log::log_enabled!(target: "vbz::metrics", $crate::__log::Level::Trace) {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::__log::trace!(target: "vbz::metrics", "VBZ_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}
