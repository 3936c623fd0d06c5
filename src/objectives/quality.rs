//! 解质量：参考距离与所得距离之比，以百分数表示
//!
//! 参考距离本身只是估计值，所得距离偶尔会比它更短，此时质量记为 100。

/// 质量百分数的上限
pub const MAX_QUALITY: f64 = 100.0;

/// `min(100, round(100 · reference / achieved, 1))`，任一距离不为正时为 0
pub fn solution_quality(achieved: f64, reference: f64) -> f64 {
    if !(achieved > 0.0 && reference > 0.0) || !achieved.is_finite() || !reference.is_finite() {
        return 0.0;
    }
    let ratio = MAX_QUALITY * reference / achieved;
    ((ratio * 10.0).round() / 10.0).min(MAX_QUALITY)
}
