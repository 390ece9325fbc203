//! Input/output shapes shared by every primitive and by the tracker (§3, §6).

/// One LiDAR return projected onto the stroke: an along-stroke position and
/// an elevation, both in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPoint {
    pub x: f32,
    pub y: f32,
}

impl ScanPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The user-drawn stroke that seeds a tracking call: two image-space points
/// and the cell size used to turn them into lattice coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub p1: (f64, f64),
    pub p2: (f64, f64),
}

impl Stroke {
    pub fn length(&self) -> f64 {
        let dx = self.p2.0 - self.p1.0;
        let dy = self.p2.1 - self.p1.1;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self) -> (f64, f64) {
        ((self.p1.0 + self.p2.0) / 2.0, (self.p1.1 + self.p2.1) / 2.0)
    }
}

/// Read-only source of LiDAR points over a tiled DTM (§6). An `Unloaded`
/// cell counts as out-of-bounds rather than empty: the tracker must not
/// treat it as evidence of absent terrain.
pub trait TileSet {
    fn collect_points(&self, cell_i: i32, cell_j: i32) -> CellPoints;
}

#[derive(Debug, Clone)]
pub enum CellPoints {
    Loaded(Vec<(f32, f32, f32)>),
    Unloaded,
}

/// Produces the ordered DTM cells of successive orthogonal scans along a
/// stroke, and can be recentered on a moving reference line (§6).
pub trait DirectionalScanner {
    /// Returns the central scan's cells, in along-stroke order.
    fn first(&mut self) -> Vec<(i32, i32)>;
    fn next_on_left(&mut self) -> Option<Vec<(i32, i32)>>;
    fn next_on_right(&mut self) -> Option<Vec<(i32, i32)>>;
    /// Recenters future scans on a new line equation `a*x + b*y = c`.
    fn bind_to(&mut self, a: f64, b: f64, c: f64);
    fn is_last_scan_reversed(&self) -> bool;
    /// Spacing, in meters, between two consecutive scan depths along the
    /// structure's lengthwise direction; used to weight volume integration
    /// (§4.6) and to reconstruct a primitive's 2-D world position during
    /// the initial-probe realignment (§4.5 step 2).
    fn scan_period(&self) -> f64;
}
