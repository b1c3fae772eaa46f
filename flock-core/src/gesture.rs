use flock_shared::Point;
use rand::Rng;

/// Minimum committed obstacle radius; smaller drags are treated as
/// accidental and discarded.
pub const MIN_OBSTACLE_RADIUS: f64 = 5.0;

/// Half-width of the square the bird-burst offsets are drawn from
pub const BURST_SPREAD: f64 = 20.0;

/// Delay between consecutive spawns within one burst
pub const BURST_INTERVAL_MS: u64 = 100;

/// The active pointer-input mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    None,
    AddBird,
    AddObstacle,
    Attractor,
}

impl InteractionMode {
    /// Parse the mode names used by the page controls
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(Self::None),
            "addBird" => Some(Self::AddBird),
            "addObstacle" => Some(Self::AddObstacle),
            "attractor" => Some(Self::Attractor),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::AddBird => "addBird",
            Self::AddObstacle => "addObstacle",
            Self::Attractor => "attractor",
        }
    }
}

/// A click in add-bird mode spawns a small staggered group rather than a
/// single bird, so new arrivals read as a flock instead of a point.
#[derive(Debug, Clone, PartialEq)]
pub struct BirdBurst {
    pub spawns: Vec<Point>,
    pub interval_ms: u64,
}

impl BirdBurst {
    /// Plan a burst of 3-5 birds at independent offsets around `origin`
    pub fn plan<R: Rng>(origin: Point, rng: &mut R) -> Self {
        let count = rng.gen_range(3..=5);
        let spawns = (0..count)
            .map(|_| {
                Point::new(
                    origin.x + rng.gen_range(-BURST_SPREAD..BURST_SPREAD),
                    origin.y + rng.gen_range(-BURST_SPREAD..BURST_SPREAD),
                )
            })
            .collect();
        Self {
            spawns,
            interval_ms: BURST_INTERVAL_MS,
        }
    }
}

/// What the front-end should do in response to a pointer event. The
/// controller emits these; it performs no I/O of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SpawnBurst(BirdBurst),
    ShowPreview { center: Point, radius: f64 },
    HidePreview,
    CommitObstacle { center: Point, radius: f64 },
    SetAttractor { position: Point, active: bool },
}

/// Tracks the current interaction mode and any in-progress gesture.
///
/// Obstacle drags anchor at the press point; the preview radius follows the
/// pointer. Attractor presses stream position updates until release. Mode
/// switches and pointer-leave both cancel whatever is in progress.
#[derive(Debug)]
pub struct GestureController {
    mode: InteractionMode,
    drag_origin: Option<Point>,
    attracting: bool,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            mode: InteractionMode::None,
            drag_origin: None,
            attracting: false,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    pub fn is_attracting(&self) -> bool {
        self.attracting
    }

    /// Switch modes, cancelling any gesture of the prior mode. Always
    /// allowed, including re-selecting the current mode.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Vec<Command> {
        let commands = self.cancel_active_gesture();
        self.mode = mode;
        commands
    }

    pub fn pointer_down(&mut self, position: Point) -> Vec<Command> {
        match self.mode() {
            InteractionMode::AddObstacle => {
                self.drag_origin = Some(position);
                vec![Command::ShowPreview {
                    center: position,
                    radius: 0.0,
                }]
            }
            InteractionMode::Attractor => {
                self.attracting = true;
                vec![Command::SetAttractor {
                    position,
                    active: true,
                }]
            }
            _ => Vec::new(),
        }
    }

    pub fn pointer_move(&mut self, position: Point) -> Vec<Command> {
        if let Some(origin) = self.drag_origin {
            vec![Command::ShowPreview {
                center: origin,
                radius: origin.distance_to(&position),
            }]
        } else if self.attracting {
            vec![Command::SetAttractor {
                position,
                active: true,
            }]
        } else {
            Vec::new()
        }
    }

    pub fn pointer_up(&mut self, position: Point) -> Vec<Command> {
        if let Some(origin) = self.drag_origin.take() {
            let radius = origin.distance_to(&position);
            let mut commands = Vec::new();
            if radius > MIN_OBSTACLE_RADIUS {
                commands.push(Command::CommitObstacle {
                    center: origin,
                    radius,
                });
            }
            commands.push(Command::HidePreview);
            commands
        } else if self.attracting {
            self.attracting = false;
            vec![deactivate_attractor()]
        } else {
            Vec::new()
        }
    }

    /// Leaving the surface mid-gesture behaves like a release that commits
    /// nothing: the drag preview disappears and the attractor lets go.
    pub fn pointer_leave(&mut self) -> Vec<Command> {
        self.cancel_active_gesture()
    }

    /// A completed click; only meaningful in add-bird mode
    pub fn click<R: Rng>(&mut self, position: Point, rng: &mut R) -> Vec<Command> {
        if self.mode() == InteractionMode::AddBird {
            vec![Command::SpawnBurst(BirdBurst::plan(position, rng))]
        } else {
            Vec::new()
        }
    }

    fn cancel_active_gesture(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.drag_origin.take().is_some() {
            commands.push(Command::HidePreview);
        }
        if self.attracting {
            self.attracting = false;
            commands.push(deactivate_attractor());
        }
        commands
    }
}

fn deactivate_attractor() -> Command {
    Command::SetAttractor {
        position: Point::new(0.0, 0.0),
        active: false,
    }
}
