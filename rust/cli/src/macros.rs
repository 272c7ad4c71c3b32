//! Macros for common CLI error handling patterns.

/// Write to a stream and exit with error code if writing fails.
///
/// ```ignore
/// write_or_exit!(err, "Error: {}", message);
/// ```
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}

/// Parse a JSON line or count it as corrupted and continue with the next one.
///
/// ```ignore
/// let record: HandRecord = parse_json_or_continue!(line, corrupted);
/// ```
#[macro_export]
macro_rules! parse_json_or_continue {
    ($line:expr, $counter:expr) => {
        match serde_json::from_str($line) {
            Ok(r) => r,
            Err(_) => {
                $counter += 1;
                continue;
            }
        }
    };
}
