/// Minimum attendance percentage; anything strictly below is a defaulter.
pub const DEFAULTER_THRESHOLD: f32 = 75.0;

/// Attendance percentage with the original float semantics:
/// zero total classes reads as 0%, never a division by zero.
pub fn attendance_percent(attended: i32, total: i32) -> f32 {
    if total > 0 {
        attended as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

pub fn is_defaulter(attended: i32, total: i32) -> bool {
    total > 0 && attendance_percent(attended, total) < DEFAULTER_THRESHOLD
}

/// 1-decimal display rounding used by the reports views (`%.1f`).
pub fn round_off_1_decimal(x: f32) -> f32 {
    ((10.0 * x) + 0.5).floor() / 10.0
}
