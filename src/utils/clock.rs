//! Countdown display helpers

/// Render seconds as `M:SS`, minutes unpadded
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
