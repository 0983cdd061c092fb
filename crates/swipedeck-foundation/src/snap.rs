//! Snap-point selection for released drags.

/// Seconds of travel a release velocity is projected over.
pub const SNAP_TOSS: f32 = 0.2;

/// Distances closer than this count as a tie.
const TIE_EPSILON: f32 = 1e-3;

/// Picks the snap point a released drag resolves to.
///
/// The release position is projected along the velocity for [`SNAP_TOSS`]
/// seconds and the nearest point to the projection wins, so a fast flick
/// selects the target in its direction before the midpoint is crossed.
/// Exact ties go to the point lying in the direction of motion; at zero
/// velocity they go to the point nearest the origin.
///
/// Returns `None` when `points` is empty.
pub fn snap_point(value: f32, velocity: f32, points: &[f32]) -> Option<f32> {
    let projected = value + velocity * SNAP_TOSS;
    let min_delta = points
        .iter()
        .map(|point| (projected - point).abs())
        .fold(f32::INFINITY, f32::min);
    if !min_delta.is_finite() {
        return None;
    }

    points
        .iter()
        .copied()
        .filter(|point| ((projected - point).abs() - min_delta).abs() <= TIE_EPSILON)
        .reduce(|best, candidate| {
            let prefer_candidate = if velocity > 0.0 {
                candidate > best
            } else if velocity < 0.0 {
                candidate < best
            } else {
                candidate.abs() < best.abs()
            };
            if prefer_candidate {
                candidate
            } else {
                best
            }
        })
}
