//! Exact Euclidean distance transform.
//!
//! Felzenszwalb & Huttenlocher, "Distance Transforms of Sampled Functions"
//! (2012). The squared distance is computed as a lower envelope of parabolas,
//! first along every row and then along every column of the row result.

/// Stand-in for "no target here" in the squared-distance input.
/// Kept finite so envelope intersections never compute `inf - inf`.
const FAR: f64 = 1e20;

/// Squared 1-D distance transform of `f` into `d`.
///
/// `v` and `z` are scratch buffers of at least `f.len()` and `f.len() + 1` entries.
fn transform_1d(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    let intersect = |q: usize, p: usize| {
        let (qf, pf) = (q as f64, p as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
    };

    let mut k = 0;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;

    for q in 1..n {
        let mut s = intersect(q, v[k]);
        // z[0] is -inf, so k never underflows
        while s <= z[k] {
            k -= 1;
            s = intersect(q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate().take(n) {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let offset = q as f64 - v[k] as f64;
        *out = offset * offset + f[v[k]];
    }
}

/// Euclidean distance from every cell to the nearest cell where `target` is true.
///
/// Returns `None` when no cell is a target, since the distance is undefined then.
/// `target` is row-major with `width * height` cells.
pub fn distance_transform(target: &[bool], width: usize, height: usize) -> Option<Vec<f64>> {
    debug_assert_eq!(target.len(), width * height);
    if !target.iter().any(|&t| t) {
        return None;
    }

    let mut grid: Vec<f64> = target.iter().map(|&t| if t { 0.0 } else { FAR }).collect();

    let longest = width.max(height);
    let mut f = vec![0.0; longest];
    let mut d = vec![0.0; longest];
    let mut v = vec![0usize; longest];
    let mut z = vec![0.0; longest + 1];

    for row in grid.chunks_exact_mut(width) {
        f[..width].copy_from_slice(row);
        transform_1d(&f[..width], &mut d[..width], &mut v, &mut z);
        row.copy_from_slice(&d[..width]);
    }

    for x in 0..width {
        for y in 0..height {
            f[y] = grid[y * width + x];
        }
        transform_1d(&f[..height], &mut d[..height], &mut v, &mut z);
        for y in 0..height {
            grid[y * width + x] = d[y].sqrt();
        }
    }

    Some(grid)
}
