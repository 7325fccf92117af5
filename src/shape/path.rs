use serde::{Deserialize, Serialize};

/// One backend-agnostic draw command in pixel space.
///
/// Arc sweep direction follows the sign of `end_angle - start_angle`;
/// angles are radians measured clockwise from 12 o'clock, matching the
/// layout modules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadTo {
        cx: f64,
        cy: f64,
        x: f64,
        y: f64,
    },
    CubicTo {
        cx1: f64,
        cy1: f64,
        cx2: f64,
        cy2: f64,
        x: f64,
        y: f64,
    },
    ArcTo {
        center_x: f64,
        center_y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Close,
}

/// Ordered command list describing one filled or stroked figure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::QuadTo { cx, cy, x, y });
    }

    pub fn cubic_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::CubicTo {
            cx1,
            cy1,
            cx2,
            cy2,
            x,
            y,
        });
    }

    pub fn arc_to(
        &mut self,
        center_x: f64,
        center_y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) {
        self.commands.push(PathCommand::ArcTo {
            center_x,
            center_y,
            radius,
            start_angle,
            end_angle,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// End point of the last positioned command, if any.
    #[must_use]
    pub fn current_point(&self) -> Option<(f64, f64)> {
        for command in self.commands.iter().rev() {
            match *command {
                PathCommand::MoveTo { x, y }
                | PathCommand::LineTo { x, y }
                | PathCommand::QuadTo { x, y, .. }
                | PathCommand::CubicTo { x, y, .. } => return Some((x, y)),
                PathCommand::ArcTo {
                    center_x,
                    center_y,
                    radius,
                    end_angle,
                    ..
                } => return Some(polar_point(center_x, center_y, radius, end_angle)),
                PathCommand::Close => {}
            }
        }
        None
    }
}

/// Point at `angle` radians clockwise from 12 o'clock at `radius` from the center.
#[must_use]
pub fn polar_point(center_x: f64, center_y: f64, radius: f64, angle: f64) -> (f64, f64) {
    (
        center_x + radius * angle.sin(),
        center_y - radius * angle.cos(),
    )
}
