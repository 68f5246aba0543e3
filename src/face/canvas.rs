//! Draw-surface abstraction. Face components record into a [`DisplayList`];
//! the GPU painter tessellates it afterwards. Cached paths are shared by
//! `Arc` and carry a single composed affine per command.

use std::sync::Arc;

use lyon::math::Transform;
use lyon::path::Path;

/// Linear-space RGBA.
pub type Color = [f32; 4];

pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_path(&mut self, path: Arc<Path>, transform: Transform, color: Color);
    fn stroke_path(&mut self, path: Arc<Path>, transform: Transform, color: Color, width: f32);
}

#[derive(Clone)]
pub enum DrawCmd {
    Fill {
        path: Arc<Path>,
        transform: Transform,
        color: Color,
    },
    Stroke {
        path: Arc<Path>,
        transform: Transform,
        color: Color,
        width: f32,
    },
}

/// Recorded frame: an optional background clear plus back-to-front commands.
#[derive(Default)]
pub struct DisplayList {
    background: Option<Color>,
    cmds: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn fill_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Fill { .. }))
            .count()
    }

    pub fn stroke_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Stroke { .. }))
            .count()
    }
}

impl Canvas for DisplayList {
    fn clear(&mut self, color: Color) {
        self.background = Some(color);
        self.cmds.clear();
    }

    fn fill_path(&mut self, path: Arc<Path>, transform: Transform, color: Color) {
        self.cmds.push(DrawCmd::Fill {
            path,
            transform,
            color,
        });
    }

    fn stroke_path(&mut self, path: Arc<Path>, transform: Transform, color: Color, width: f32) {
        self.cmds.push(DrawCmd::Stroke {
            path,
            transform,
            color,
            width,
        });
    }
}
