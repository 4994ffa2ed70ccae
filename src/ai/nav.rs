//! Walkable-surface queries and destination-driven navigation

use glam::{Vec2, Vec3};

/// Resolves arbitrary points to the nearest walkable point
pub trait SurfaceQuery {
    /// Nearest walkable point within `max_distance` of `point`, or `None`
    /// when nothing walkable is in range. The `mask` selects surface areas;
    /// implementations may ignore it.
    fn sample(&self, point: Vec3, max_distance: f32, mask: u32) -> Option<Vec3>;
}

/// Locomotion collaborator driven by the behavior machine.
///
/// The machine only issues destinations and speeds; how the agent actually
/// moves (pathfinding, avoidance) is the implementation's business.
pub trait Navigator {
    /// Replace the current destination
    fn set_destination(&mut self, destination: Vec3);

    /// Set the movement speed in m/s
    fn set_speed(&mut self, speed: f32);

    /// Current world position
    fn position(&self) -> Vec3;

    /// Current velocity
    fn velocity(&self) -> Vec3;

    /// Whether the agent currently stands on the navigable surface
    fn is_on_surface(&self) -> bool;
}

/// Walkable-cell grid on the X-Z plane
#[derive(Debug, Clone)]
pub struct NavGrid {
    /// Cells along X
    width: usize,
    /// Cells along Z
    depth: usize,
    /// Cell size in world units
    cell_size: f32,
    /// Walkable cells (true = walkable)
    cells: Vec<bool>,
    /// World X-Z of the grid corner
    origin: Vec2,
    /// Surface height returned for samples
    elevation: f32,
}

impl NavGrid {
    /// Create a grid with every cell walkable
    #[must_use]
    pub fn new(width: usize, depth: usize, cell_size: f32) -> Self {
        Self {
            width,
            depth,
            cell_size,
            cells: vec![true; width * depth],
            origin: Vec2::ZERO,
            elevation: 0.0,
        }
    }

    /// Move the grid corner in world space
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Set the surface height returned for samples
    pub fn set_elevation(&mut self, elevation: f32) {
        self.elevation = elevation;
    }

    /// Set a cell's walkability
    pub fn set_walkable(&mut self, x: usize, z: usize, walkable: bool) {
        if x < self.width && z < self.depth {
            self.cells[z * self.width + x] = walkable;
        }
    }

    /// Check if a cell is walkable (out of bounds is not)
    #[must_use]
    pub fn is_walkable(&self, x: usize, z: usize) -> bool {
        if x >= self.width || z >= self.depth {
            return false;
        }
        self.cells[z * self.width + x]
    }

    /// Whether a world point stands on a walkable cell
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        let (x, z) = self.point_to_cell(point);
        x >= 0 && z >= 0 && self.is_walkable(x as usize, z as usize)
    }

    /// Convert a world point to grid coordinates
    fn point_to_cell(&self, point: Vec3) -> (i32, i32) {
        let local = Vec2::new(point.x, point.z) - self.origin;
        (
            (local.x / self.cell_size).floor() as i32,
            (local.y / self.cell_size).floor() as i32,
        )
    }

    /// Convert grid coordinates to the cell's world center
    fn cell_to_point(&self, x: usize, z: usize) -> Vec3 {
        let center = self.origin
            + Vec2::new(
                (x as f32 + 0.5) * self.cell_size,
                (z as f32 + 0.5) * self.cell_size,
            );
        Vec3::new(center.x, self.elevation, center.y)
    }
}

impl SurfaceQuery for NavGrid {
    fn sample(&self, point: Vec3, max_distance: f32, _mask: u32) -> Option<Vec3> {
        let (cx, cz) = self.point_to_cell(point);
        let reach = (max_distance / self.cell_size).ceil() as i32;

        let mut best: Option<(f32, Vec3)> = None;
        for dz in -reach..=reach {
            for dx in -reach..=reach {
                let (x, z) = (cx + dx, cz + dz);
                if x < 0 || z < 0 {
                    continue;
                }
                if !self.is_walkable(x as usize, z as usize) {
                    continue;
                }
                let center = self.cell_to_point(x as usize, z as usize);
                let distance = Vec2::new(center.x - point.x, center.z - point.z).length();
                if distance > max_distance {
                    continue;
                }
                if best.is_none_or(|(nearest, _)| distance < nearest) {
                    best = Some((distance, center));
                }
            }
        }
        best.map(|(_, center)| center)
    }
}

/// Moves straight toward its destination at the commanded speed.
///
/// Seek-style locomotion with an arrival radius, standing in for a full
/// navigation agent on open ground. Ticked once per frame by the harness.
#[derive(Debug, Clone)]
pub struct SteeringNavigator {
    position: Vec3,
    velocity: Vec3,
    destination: Vec3,
    speed: f32,
    arrive_radius: f32,
    on_surface: bool,
}

impl SteeringNavigator {
    /// Create a stationary navigator
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            destination: position,
            speed: 0.0,
            arrive_radius: 0.1,
            on_surface: true,
        }
    }

    /// Current destination
    #[must_use]
    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    /// Mark the agent on or off the navigable surface
    pub fn set_on_surface(&mut self, on_surface: bool) {
        self.on_surface = on_surface;
    }

    /// Advance toward the destination, stopping inside the arrival radius
    pub fn tick(&mut self, dt: f32) {
        let to_target = self.destination - self.position;
        let distance = to_target.length();
        if distance <= self.arrive_radius || self.speed <= 0.0 || dt <= 0.0 {
            self.velocity = Vec3::ZERO;
            return;
        }

        let direction = to_target / distance;
        self.velocity = direction * self.speed;
        if self.speed * dt >= distance {
            self.position = self.destination;
        } else {
            self.position += self.velocity * dt;
        }
    }
}

impl Navigator for SteeringNavigator {
    fn set_destination(&mut self, destination: Vec3) {
        self.destination = destination;
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn is_on_surface(&self) -> bool {
        self.on_surface
    }
}
