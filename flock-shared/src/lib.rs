use serde::{Deserialize, Serialize};

/// A point in simulation space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A velocity vector; the wire format names the components dx/dy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    pub dx: f64,
    pub dy: f64,
}

impl Velocity {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Heading in radians, measured from the positive x axis
    pub fn heading(&self) -> f64 {
        self.dy.atan2(self.dx)
    }
}

/// One bird as reported by the simulation service. Identity is stable
/// across snapshots and drives the display color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bird {
    pub id: String,
    pub position: Point,
    pub velocity: Velocity,
    #[serde(default)]
    pub radius: f64,
}

/// A circular obstacle created by a completed drag gesture
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Obstacle {
    #[serde(default)]
    pub id: String,
    pub position: Point,
    pub radius: f64,
}

/// The single global attractor; toggling it is idempotent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Attractor {
    pub position: Point,
    pub active: bool,
}

/// Complete simulation state at one step. Always replaced wholesale on the
/// client, never patched field by field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationState {
    pub birds: Vec<Bird>,
    pub obstacles: Vec<Obstacle>,
    pub attractor: Attractor,
    pub step: u64,
    pub running: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            birds: Vec::new(),
            obstacles: Vec::new(),
            attractor: Attractor::default(),
            step: 0,
            running: true,
        }
    }
}

/// Body of POST /api/bird
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AddBirdRequest {
    pub x: f64,
    pub y: f64,
}

/// Body of POST /api/obstacle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AddObstacleRequest {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Body of POST /api/attractor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SetAttractorRequest {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}

/// Envelope every successful service response is wrapped in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub state: SimulationState,
}
