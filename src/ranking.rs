use std::cmp::Ordering;

/// Order two teams by win total, then by projected points-for, both descending.
///
/// `half_wins` counts a win as 2 and a split game as 1. Teams equal on both keys
/// compare equal; their relative order is left to the caller's sort.
pub fn compare(half_wins: &[u64], projected_points: &[f64], a: usize, b: usize) -> Ordering {
    half_wins[b]
        .cmp(&half_wins[a])
        .then_with(|| projected_points[b].total_cmp(&projected_points[a]))
}

/// Rank teams and write each team's 1-based place into `places`.
///
/// `order` is scratch space of length `half_wins.len()`; it is overwritten. The
/// sort is stable, so fully tied teams keep their input order.
pub fn assign_places(half_wins: &[u64], projected_points: &[f64], order: &mut [usize], places: &mut [usize]) {
    for (i, slot) in order.iter_mut().enumerate() {
        *slot = i;
    }
    order.sort_by(|&a, &b| compare(half_wins, projected_points, a, b));

    for (place, &team) in order.iter().enumerate() {
        places[team] = place + 1;
    }
}
