// Console helpers. Native builds (unit tests) have no console, so they fall
// back to stderr.

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    gloo::console::log!(msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    eprintln!("{msg}");
}

#[cfg(target_arch = "wasm32")]
pub fn cwarn(msg: &str) {
    gloo::console::warn!(msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cwarn(msg: &str) {
    eprintln!("warn: {msg}");
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Countdown as seconds with two decimals, e.g. `12.40s`.
pub fn format_countdown(millis: u64) -> String {
    format!("{:.2}s", millis as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_format() {
        assert_eq!(format_countdown(0), "0.00s");
        assert_eq!(format_countdown(12_400), "12.40s");
        assert_eq!(format_countdown(999), "1.00s");
    }
}
