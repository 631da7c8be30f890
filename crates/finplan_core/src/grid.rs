//! Time-grid builder (spec.md §4.3). The grid is the only set of points at
//! which descriptors are ever evaluated.

/// Build the sparse evaluation grid for one run.
///
/// - If `interval` is `365` or `182.5`, the grid is uniform:
///   `start_day, start_day + interval, …`, with `end_day` appended exactly
///   if the uniform step doesn't already land on it.
/// - Otherwise the grid starts at `start_day`, then walks
///   `visible_range.start, visible_range.start + interval, …,
///   visible_range.end`, then appends `end_day`.
/// - If `current_day` is given and isn't already present, it's inserted in
///   sorted order.
///
/// The result is strictly non-decreasing and deduplicated.
pub fn build_grid(
    start_day: f64,
    end_day: f64,
    interval: f64,
    visible_range: Option<(f64, f64)>,
    current_day: Option<f64>,
) -> Vec<f64> {
    let mut points = Vec::new();

    if is_uniform_interval(interval) {
        let mut t = start_day;
        while t < end_day {
            points.push(t);
            t += interval;
        }
        points.push(end_day);
    } else {
        points.push(start_day);
        if let Some((vis_start, vis_end)) = visible_range {
            let mut t = vis_start;
            while t < vis_end {
                points.push(t);
                t += interval;
            }
            points.push(vis_end);
        }
        points.push(end_day);
    }

    if let Some(current) = current_day {
        insert_sorted(&mut points, current);
    }

    dedup_sorted(&mut points);
    points
}

fn is_uniform_interval(interval: f64) -> bool {
    const EPS: f64 = 1e-9;
    (interval - 365.0).abs() < EPS || (interval - 182.5).abs() < EPS
}

fn insert_sorted(points: &mut Vec<f64>, value: f64) {
    points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pos = points.partition_point(|&p| p < value);
    if points.get(pos).copied() != Some(value) {
        points.insert(pos, value);
    }
}

fn dedup_sorted(points: &mut Vec<f64>) {
    points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    points.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
}

/// First index `i` such that `grid[i] >= target`, via binary search
/// (spec.md §4.4). Returns `grid.len()` if no such index exists.
pub fn first_index_at_or_after(grid: &[f64], target: f64) -> usize {
    grid.partition_point(|&t| t < target)
}

/// Exact index of `target` in `grid`, if present within tolerance.
pub fn index_of(grid: &[f64], target: f64) -> Option<usize> {
    let i = first_index_at_or_after(grid, target);
    if i < grid.len() && (grid[i] - target).abs() < 1e-6 {
        Some(i)
    } else {
        None
    }
}
