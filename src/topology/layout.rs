//! Force-directed 2-D embedding for edge weighting.
//!
//! Fruchterman–Reingold: every pair of nodes repels with `k²/d`, every edge
//! attracts with `d²/k`, and node movement is capped by a temperature that
//! cools linearly to zero. The final layout is centred and rescaled into
//! `[-1, 1]²`.

use rand::Rng;

use crate::error::{Result, TopologyError};
use crate::graph::{Graph, Skeleton};

/// A position in the plane.
pub type Point = [f64; 2];

/// Distances below this are clamped when computing forces.
const MIN_FORCE_DISTANCE: f64 = 0.01;

/// Early-exit threshold on the mean movement per iteration.
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Offset applied to separate coincident nodes after layout.
const COINCIDENT_NUDGE: f64 = 1e-6;

fn distance(a: Point, b: Point) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

/// Compute a spring layout with initial positions drawn from `rng`.
pub fn spring_layout<R: Rng + ?Sized>(skeleton: &Skeleton, iterations: usize, rng: &mut R) -> Vec<Point> {
    let n = skeleton.node_count();
    let mut pos: Vec<Point> = (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect();
    match n {
        0 => return pos,
        1 => return vec![[0.0, 0.0]],
        _ => {}
    }

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = bounding_extent(&pos) * 0.1;
    let cooling = temperature / (iterations as f64 + 1.0);

    for iteration in 0..iterations {
        let mut displacement = vec![[0.0f64; 2]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = [pos[i][0] - pos[j][0], pos[i][1] - pos[j][1]];
                let d = distance(pos[i], pos[j]).max(MIN_FORCE_DISTANCE);
                let attraction = if skeleton.has_edge(i, j) { d / k } else { 0.0 };
                let force = k * k / (d * d) - attraction;
                displacement[i][0] += delta[0] * force;
                displacement[i][1] += delta[1] * force;
            }
        }

        let mut moved_sq = 0.0;
        for (p, disp) in pos.iter_mut().zip(&displacement) {
            let mut len = (disp[0] * disp[0] + disp[1] * disp[1]).sqrt();
            if len < MIN_FORCE_DISTANCE {
                len = 0.1;
            }
            let step = [disp[0] * temperature / len, disp[1] * temperature / len];
            p[0] += step[0];
            p[1] += step[1];
            moved_sq += step[0] * step[0] + step[1] * step[1];
        }
        temperature -= cooling;

        if moved_sq.sqrt() / (n as f64) < CONVERGENCE_THRESHOLD {
            log::debug!("Spring layout converged after {} iterations", iteration + 1);
            break;
        }
    }

    rescale(&mut pos);
    separate_coincident(&mut pos);
    pos
}

/// Largest side of the axis-aligned bounding box.
fn bounding_extent(pos: &[Point]) -> f64 {
    (0..2)
        .map(|axis| {
            let lo = pos.iter().map(|p| p[axis]).fold(f64::INFINITY, f64::min);
            let hi = pos.iter().map(|p| p[axis]).fold(f64::NEG_INFINITY, f64::max);
            hi - lo
        })
        .fold(0.0, f64::max)
}

/// Centre on the mean and scale so the largest absolute coordinate is 1.
fn rescale(pos: &mut [Point]) {
    let n = pos.len() as f64;
    let mean = [
        pos.iter().map(|p| p[0]).sum::<f64>() / n,
        pos.iter().map(|p| p[1]).sum::<f64>() / n,
    ];
    for p in pos.iter_mut() {
        p[0] -= mean[0];
        p[1] -= mean[1];
    }
    let lim = pos
        .iter()
        .flat_map(|p| [p[0].abs(), p[1].abs()])
        .fold(0.0, f64::max);
    if lim > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= lim;
            p[1] /= lim;
        }
    }
}

fn separate_coincident(pos: &mut [Point]) {
    for j in 1..pos.len() {
        for i in 0..j {
            if distance(pos[i], pos[j]) < COINCIDENT_NUDGE {
                log::warn!("Nodes {} and {} embedded at the same point, nudging {}", i, j, j);
                pos[j][0] += COINCIDENT_NUDGE * (j - i) as f64;
            }
        }
    }
}

/// Weight every edge with the Euclidean distance between its endpoints times `scale`.
pub fn assign_layout_lengths(skeleton: &Skeleton, positions: &[Point], scale: f64) -> Result<Graph> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TopologyError::Configuration(format!(
            "layout scale must be positive, got {}",
            scale
        )));
    }
    if positions.len() != skeleton.node_count() {
        return Err(TopologyError::InvalidArgument(format!(
            "layout has {} positions for {} nodes",
            positions.len(),
            skeleton.node_count()
        )));
    }
    Graph::from_skeleton(skeleton, |u, v| distance(positions[u], positions[v]) * scale)
}
