//! Structure tracker (§4.5): the driver loop shared by `CarriageTrack` and
//! `Ridge` detection, generic over [`Primitive`] per §11.2.

use nalgebra::Vector2;

use crate::predictor::SlidingPredictor;
use crate::primitive::{DetectContext, Primitive};
use crate::scan::{CellPoints, DirectionalScanner, ScanPoint, Stroke, TileSet};

use super::model::{TrackerModel, MAX_TRACK_WIDTH};
use super::status::StructureStatus;
use super::structure::Structure;

/// Which side of the central primitive a walk step advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Right,
    Left,
}

pub struct StructureTracker<'m, P: Primitive> {
    primitive_model: &'m P::Model,
    tracker_model: &'m TrackerModel,
}

impl<'m, P: Primitive> StructureTracker<'m, P> {
    pub fn new(primitive_model: &'m P::Model, tracker_model: &'m TrackerModel) -> Self {
        Self {
            primitive_model,
            tracker_model,
        }
    }

    /// Runs a full tracking pass from `stroke` (§4.5). `over` selects ridge
    /// vs. hollow orientation and is ignored by `Plateau`.
    pub fn detect(
        &self,
        stroke: Stroke,
        tiles: &dyn TileSet,
        scanner: &mut dyn DirectionalScanner,
        over: bool,
    ) -> Structure<P> {
        if stroke.length() < MAX_TRACK_WIDTH {
            let mut s = Structure::new(
                P::detect(&[], self.primitive_model, DetectContext::new(over, stroke.length() as f32)),
                stroke,
            );
            s.set_status(StructureStatus::TooNarrowInput);
            return s;
        }

        let aligned_stroke = if self.tracker_model.initial_probe_enabled() {
            self.probe_and_realign(stroke, tiles, scanner, over).unwrap_or(stroke)
        } else {
            stroke
        };

        let axis = Axis::from_stroke(aligned_stroke);
        scanner.bind_to(axis.v.x, axis.v.y, axis.v.dot(&axis.origin));

        let ctx = DetectContext::new(over, aligned_stroke.length() as f32);
        let central_points = match collect_scan(tiles, &scanner.first(), &axis) {
            Some(pts) => pts,
            None => {
                let mut s = Structure::new(P::detect(&[], self.primitive_model, ctx), aligned_stroke);
                s.set_status(StructureStatus::NoAvailableScan);
                return s;
            }
        };

        let mut central = P::detect(&central_points, self.primitive_model, ctx);
        if !central.status().is_ok() && central.status().is_recoverable_near_miss() {
            let retried = P::detect_excluding(
                &central_points,
                self.primitive_model,
                ctx,
                (central.estimated_start(), central.estimated_end()),
            );
            if retried.status().is_ok() {
                central = retried;
            }
        }
        if !central.status().is_ok() {
            let mut s = Structure::new(central, aligned_stroke);
            s.set_status(StructureStatus::NoCentralPrimitive);
            return s;
        }

        let mut structure = Structure::new(central, aligned_stroke);

        let mut pos_predictor_right = SlidingPredictor::new(crate::predictor::DEFAULT_REGISTER_SIZE);
        let mut alt_predictor_right = SlidingPredictor::new(crate::predictor::DEFAULT_REGISTER_SIZE);
        let mut pos_predictor_left = SlidingPredictor::new(crate::predictor::DEFAULT_REGISTER_SIZE);
        let mut alt_predictor_left = SlidingPredictor::new(crate::predictor::DEFAULT_REGISTER_SIZE);

        let central_ref = structure.central().clone();
        pos_predictor_right.update(central_ref.estimated_center() as f64, true);
        alt_predictor_right.update(central_ref.altitude() as f64, true);
        pos_predictor_left.update(central_ref.estimated_center() as f64, true);
        alt_predictor_left.update(central_ref.altitude() as f64, true);

        let right_no_bounds = !central_ref.bounded();
        let left_no_bounds = right_no_bounds;

        self.walk_side(
            Side::Right,
            central_ref.clone(),
            &axis,
            tiles,
            scanner,
            ctx,
            &mut pos_predictor_right,
            &mut alt_predictor_right,
            right_no_bounds,
            &mut structure,
        );
        self.walk_side(
            Side::Left,
            central_ref.clone(),
            &axis,
            tiles,
            scanner,
            ctx,
            &mut pos_predictor_left,
            &mut alt_predictor_left,
            left_no_bounds,
            &mut structure,
        );

        // §4.5 step 6: if one side found no bound and the other resolved
        // one, the unresolved side gets a second chance from scratch.
        let right_resolved = structure.right().iter().any(|p| p.bounded());
        let left_resolved = structure.left().iter().any(|p| p.bounded());
        if right_no_bounds && !right_resolved && left_resolved {
            *structure.right_mut() = super::section::Section::new();
            let mut pos = SlidingPredictor::new(crate::predictor::DEFAULT_REGISTER_SIZE);
            let mut alt = SlidingPredictor::new(crate::predictor::DEFAULT_REGISTER_SIZE);
            pos.update(central_ref.estimated_center() as f64, true);
            alt.update(central_ref.altitude() as f64, true);
            self.walk_side(
                Side::Right, central_ref.clone(), &axis, tiles, scanner, ctx, &mut pos, &mut alt, false, &mut structure,
            );
        } else if left_no_bounds && !left_resolved && right_resolved {
            *structure.left_mut() = super::section::Section::new();
            let mut pos = SlidingPredictor::new(crate::predictor::DEFAULT_REGISTER_SIZE);
            let mut alt = SlidingPredictor::new(crate::predictor::DEFAULT_REGISTER_SIZE);
            pos.update(central_ref.estimated_center() as f64, true);
            alt.update(central_ref.altitude() as f64, true);
            self.walk_side(
                Side::Left, central_ref.clone(), &axis, tiles, scanner, ctx, &mut pos, &mut alt, false, &mut structure,
            );
        }

        self.apply_pruning(&mut structure);
        structure
    }

    #[allow(clippy::too_many_arguments)]
    fn walk_side(
        &self,
        side: Side,
        seed: P,
        axis: &Axis,
        tiles: &dyn TileSet,
        scanner: &mut dyn DirectionalScanner,
        ctx: DetectContext,
        pos_predictor: &mut SlidingPredictor,
        alt_predictor: &mut SlidingPredictor,
        mut no_bounds: bool,
        structure: &mut Structure<P>,
    ) {
        let mut reference = seed;
        let mut fails = 0i32;
        let mut no_bounds_grace = self.tracker_model.no_bounds_tolerance();
        let mut distance_since_accept = 1.0f32;

        loop {
            let depth_offset = match side {
                Side::Right => scanner.next_on_right(),
                Side::Left => scanner.next_on_left(),
            };
            let cells = match depth_offset {
                Some(c) => c,
                None => break,
            };

            let dev = if pos_predictor.reliable_count() >= 2 { pos_predictor.trend() } else { 0.0 };
            let slope_hint = if alt_predictor.reliable_count() >= 2 { alt_predictor.trend() } else { 0.0 };
            let predicted_center = reference.estimated_center() as f64 + dev;
            let reference_point = axis.origin + predicted_center * axis.u;
            scanner.bind_to(axis.v.x, axis.v.y, axis.v.dot(&reference_point));

            let points = match collect_scan(tiles, &cells, axis) {
                Some(pts) => pts,
                None => {
                    // out-of-bounds: counts against lack tolerance per §7
                    // (not a sparse-point failure).
                    fails += 1;
                    if fails >= self.tracker_model.lack_tolerance() {
                        break;
                    }
                    continue;
                }
            };

            let mut tracked = P::track(&points, &reference, self.primitive_model, ctx.with_confidence_distance(distance_since_accept));
            tracked.set_scan_shift((tracked.estimated_center() - predicted_center as f32) / axis_scale(axis));

            let accepted_now = tracked.status().is_ok();
            if accepted_now {
                fails = 0;
                distance_since_accept = 1.0;
            } else {
                distance_since_accept += 1.0;
                if !tracked.status().is_sparse_point_failure() {
                    fails += 1;
                }
            }

            if no_bounds {
                if tracked.bounded() {
                    no_bounds = false;
                } else {
                    no_bounds_grace -= 1;
                }
            }

            let section = match side {
                Side::Right => structure.right_mut(),
                Side::Left => structure.left_mut(),
            };
            let new_index = section.len();
            section.push(tracked);

            if accepted_now && tracked.reliable() {
                // §4.5 step 5: retroactively accept previously-rejected
                // primitives whose center falls within the interpolation
                // band between this and the previous accepted primitive.
                if let Some(prev_idx) = section.last_valid_before(new_index.saturating_sub(1)).map(|_| ()) {
                    let _ = prev_idx;
                    retroactively_accept_gap(section, new_index, &reference, &tracked);
                }
                reference = tracked;
                pos_predictor.update(tracked.estimated_center() as f64, true);
                alt_predictor.update(tracked.altitude() as f64, true);
            } else {
                pos_predictor.update(tracked.estimated_center() as f64, false);
                alt_predictor.update(tracked.altitude() as f64, false);
            }

            if fails >= self.tracker_model.lack_tolerance() {
                break;
            }
            if no_bounds && no_bounds_grace <= 0 {
                break;
            }
        }
    }

    /// §4.5 step 2: short bidirectional probe collecting central-primitive
    /// centers, fit by total least squares, realigned perpendicular through
    /// the fit's centroid. Falls back to `None` (keep the original stroke)
    /// if too few probe scans accept.
    fn probe_and_realign(
        &self,
        stroke: Stroke,
        tiles: &dyn TileSet,
        scanner: &mut dyn DirectionalScanner,
        over: bool,
    ) -> Option<Stroke> {
        let axis = Axis::from_stroke(stroke);
        scanner.bind_to(axis.v.x, axis.v.y, axis.v.dot(&axis.origin));
        let ctx = DetectContext::new(over, stroke.length() as f32);

        let mut samples: Vec<Vector2<f64>> = Vec::new();
        let central_points = collect_scan(tiles, &scanner.first(), &axis)?;
        let central = P::detect(&central_points, self.primitive_model, ctx);
        if central.status().is_ok() {
            samples.push(axis.world_point(central.estimated_center() as f64, 0.0));
        }

        let mut reference = central.clone();
        for (side, depth_sign) in [(Side::Right, -1.0), (Side::Left, 1.0)] {
            reference = central.clone();
            for depth in 1..=self.tracker_model.probe_side_scans() {
                let cells = match side {
                    Side::Right => scanner.next_on_right(),
                    Side::Left => scanner.next_on_left(),
                };
                let cells = match cells {
                    Some(c) => c,
                    None => break,
                };
                let points = match collect_scan(tiles, &cells, &axis) {
                    Some(p) => p,
                    None => continue,
                };
                let tracked = P::track(&points, &reference, self.primitive_model, ctx);
                if tracked.status().is_ok() {
                    samples.push(axis.world_point(
                        tracked.estimated_center() as f64,
                        depth_sign * depth as f64 * scanner.scan_period(),
                    ));
                    reference = tracked;
                }
            }
        }

        if samples.len() < 3 {
            return None;
        }
        let direction = fit_principal_direction(&samples)?;
        let centroid = samples.iter().fold(Vector2::zeros(), |a, b| a + b) / samples.len() as f64;
        let half = MAX_TRACK_WIDTH.max(stroke.length()) / 2.0;
        let perp = Vector2::new(-direction.y, direction.x);
        let p1 = centroid - perp * half;
        let p2 = centroid + perp * half;
        Some(Stroke {
            p1: (p1.x, p1.y),
            p2: (p2.x, p2.y),
        })
    }

    fn apply_pruning(&self, structure: &mut Structure<P>) {
        // Tail pruning: nothing to trim at the structural level beyond what
        // section bookkeeping already reflects (`last_accepted` already
        // excludes a trailing run of refusals from being treated as part of
        // the reliable tail); this only decides overall status.
        let tail_ok = structure.right().len() as i32 >= self.tracker_model.tail_min_size()
            || structure.left().len() as i32 >= self.tracker_model.tail_min_size()
            || structure.spread() <= 1;
        if !tail_ok {
            structure.set_status(StructureStatus::NoConsistentSequence);
            return;
        }

        let spread = structure.spread() as f32;
        let holes = structure.holes() as f32;
        if holes * 100.0 > spread * (100.0 - self.tracker_model.min_density()) {
            structure.set_status(StructureStatus::TooSparsePlateaux);
            return;
        }

        if structure.relative_shift_length() > self.tracker_model.max_shift_length() {
            structure.set_status(StructureStatus::TooHecticPlateaux);
            return;
        }

        structure.set_status(StructureStatus::Ok);
    }
}

fn retroactively_accept_gap<P: Primitive>(
    section: &mut super::section::Section<P>,
    new_index: usize,
    previous: &P,
    current: &P,
) {
    let lo = previous.estimated_center().min(current.estimated_center());
    let hi = previous.estimated_center().max(current.estimated_center());
    for idx in 0..new_index {
        if let Some(candidate) = section.get(idx) {
            if !candidate.accepted() && candidate.possible() {
                let c = candidate.estimated_center();
                if c >= lo && c <= hi && previous.contains(c) {
                    section.retroactively_accept(idx);
                }
            }
        }
    }
}

/// The 2-D stroke-aligned basis: `u` runs along the stroke (the scan's own
/// cross-section axis), `v` is perpendicular (the direction the structure
/// is tracked along, one scan per step).
struct Axis {
    origin: Vector2<f64>,
    u: Vector2<f64>,
    v: Vector2<f64>,
}

impl Axis {
    fn from_stroke(stroke: Stroke) -> Self {
        let p1 = Vector2::new(stroke.p1.0, stroke.p1.1);
        let p2 = Vector2::new(stroke.p2.0, stroke.p2.1);
        let d = p2 - p1;
        let len = d.norm().max(1e-12);
        let u = d / len;
        let v = Vector2::new(-u.y, u.x);
        Self {
            origin: (p1 + p2) / 2.0,
            u,
            v,
        }
    }

    fn world_point(&self, along_u: f64, along_v: f64) -> Vector2<f64> {
        self.origin + along_u * self.u + along_v * self.v
    }
}

fn axis_scale(_axis: &Axis) -> f32 {
    1.0
}

fn collect_scan(tiles: &dyn TileSet, cells: &[(i32, i32)], axis: &Axis) -> Option<Vec<ScanPoint>> {
    if cells.is_empty() {
        return None;
    }
    let mut points = Vec::new();
    for &(i, j) in cells {
        match tiles.collect_points(i, j) {
            CellPoints::Loaded(pts) => {
                for (x, y, z) in pts {
                    let world = Vector2::new(x as f64, y as f64);
                    let along = world.dot(&axis.u);
                    points.push(ScanPoint::new(along as f32, z));
                }
            }
            CellPoints::Unloaded => return None,
        }
    }
    if points.is_empty() {
        return None;
    }
    points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    Some(points)
}

/// Total-least-squares direction through `points`: the eigenvector of the
/// largest eigenvalue of the 2x2 scatter matrix, via the closed-form
/// symmetric-2x2 eigen solution.
fn fit_principal_direction(points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    if points.len() < 2 {
        return None;
    }
    let centroid = points.iter().fold(Vector2::zeros(), |a, b| a + b) / points.len() as f64;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for p in points {
        let d = p - centroid;
        sxx += d.x * d.x;
        syy += d.y * d.y;
        sxy += d.x * d.y;
    }
    let trace = sxx + syy;
    let diff = sxx - syy;
    let disc = (diff * diff / 4.0 + sxy * sxy).sqrt();
    let lambda_max = trace / 2.0 + disc;
    let dir = if sxy.abs() > 1e-12 {
        Vector2::new(lambda_max - syy, sxy)
    } else if sxx >= syy {
        Vector2::new(1.0, 0.0)
    } else {
        Vector2::new(0.0, 1.0)
    };
    let norm = dir.norm();
    if norm < 1e-12 {
        None
    } else {
        Some(dir / norm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_direction_of_diagonal_points_is_diagonal() {
        let pts = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(3.0, 3.0),
        ];
        let dir = fit_principal_direction(&pts).unwrap();
        assert!((dir.x.abs() - dir.y.abs()).abs() < 1e-6);
    }

    #[test]
    fn axis_basis_is_orthonormal() {
        let stroke = Stroke { p1: (0.0, 0.0), p2: (3.0, 4.0) };
        let axis = Axis::from_stroke(stroke);
        assert!((axis.u.norm() - 1.0).abs() < 1e-9);
        assert!((axis.v.norm() - 1.0).abs() < 1e-9);
        assert!(axis.u.dot(&axis.v).abs() < 1e-9);
    }
}
