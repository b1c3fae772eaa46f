use flock_shared::Point;

/// Where the drawing surface sits on screen versus its native resolution.
///
/// Rebuilt from the live bounding rect on every call site; the display size
/// can change between events under responsive layout, so nothing here may
/// be cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// On-screen origin of the surface (bounding rect left/top)
    pub origin_x: f64,
    pub origin_y: f64,
    /// On-screen size of the surface (bounding rect width/height)
    pub display_width: f64,
    pub display_height: f64,
    /// Native resolution of the surface
    pub native_width: f64,
    pub native_height: f64,
}

/// An axis-aligned box in CSS pixel coordinates, for overlay placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceGeometry {
    pub fn new(
        origin_x: f64,
        origin_y: f64,
        display_width: f64,
        display_height: f64,
        native_width: f64,
        native_height: f64,
    ) -> Self {
        Self {
            origin_x,
            origin_y,
            display_width,
            display_height,
            native_width,
            native_height,
        }
    }

    /// Map a pointer event's client coordinates into simulation space
    pub fn to_simulation(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(
            (client_x - self.origin_x) * (self.native_width / self.display_width),
            (client_y - self.origin_y) * (self.native_height / self.display_height),
        )
    }

    /// Map a simulation-space point back to CSS pixel coordinates
    pub fn to_css(&self, point: Point) -> (f64, f64) {
        (
            self.origin_x + point.x * (self.display_width / self.native_width),
            self.origin_y + point.y * (self.display_height / self.native_height),
        )
    }

    /// CSS placement for the obstacle drag preview: a box circumscribing a
    /// circle of `radius` simulation units centered on `center`.
    pub fn preview_box(&self, center: Point, radius: f64) -> CssBox {
        let scale_x = self.display_width / self.native_width;
        let scale_y = self.display_height / self.native_height;
        CssBox {
            left: self.origin_x + (center.x - radius) * scale_x,
            top: self.origin_y + (center.y - radius) * scale_y,
            width: radius * 2.0 * scale_x,
            height: radius * 2.0 * scale_y,
        }
    }

    /// CSS placement for the attractor marker, offset by half the marker's
    /// 20-unit footprint so it centers on the attractor position.
    pub fn marker_position(&self, position: Point) -> (f64, f64) {
        let scale_x = self.display_width / self.native_width;
        let scale_y = self.display_height / self.native_height;
        (
            self.origin_x + (position.x - 10.0) * scale_x,
            self.origin_y + (position.y - 10.0) * scale_y,
        )
    }
}
