// src/renderer.rs
use eframe::egui::{self, pos2, Color32, Painter, Pos2, Rect, Stroke, Vec2};
use log::warn;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, TessellationError,
    VertexBuffers,
};

use crate::config::EditorConfig;
use crate::element::{Element, Shape};
use crate::geometry::Affordance;
use crate::tools::Preview;

/// Drawing primitives the editor needs from its host.
///
/// Points are in canvas-local coordinates.
pub trait Surface {
    /// Wipe the whole drawing region
    fn clear(&mut self);

    /// Stroke the closed path through `points`
    fn stroke_polygon(&mut self, points: &[Pos2], stroke: Stroke);

    /// Fill the closed path through `points`
    fn fill_polygon(&mut self, points: &[Pos2], fill: Color32);

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke);

    /// Show the interaction hint for the pointer's position
    fn set_cursor(&mut self, affordance: Affordance);
}

/// A `Surface` backed by an egui painter
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    /// Screen position of the canvas origin
    origin: Vec2,
    background: Color32,
    /// Whether the canvas currently owns the pointer cursor
    owns_cursor: bool,
}

impl<'a> EguiSurface<'a> {
    /// Creates a surface drawing into `canvas`, which is in screen space
    pub fn new(painter: &'a Painter, canvas: Rect, background: Color32) -> Self {
        Self {
            painter,
            origin: canvas.min.to_vec2(),
            background,
            owns_cursor: true,
        }
    }

    /// Leave the cursor alone when the pointer is over other widgets
    pub fn with_cursor(mut self, owns_cursor: bool) -> Self {
        self.owns_cursor = owns_cursor;
        self
    }

    fn to_screen(&self, points: &[Pos2]) -> Vec<Pos2> {
        points.iter().map(|p| *p + self.origin).collect()
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, self.background);
    }

    fn stroke_polygon(&mut self, points: &[Pos2], stroke: Stroke) {
        if points.len() < 2 {
            return;
        }
        self.painter
            .add(egui::Shape::closed_line(self.to_screen(points), stroke));
    }

    fn fill_polygon(&mut self, points: &[Pos2], fill: Color32) {
        if points.len() < 3 {
            return;
        }
        match tessellate_fill(points) {
            Ok((vertices, indices)) => {
                let mut mesh = egui::Mesh::default();
                for vertex in vertices {
                    mesh.colored_vertex(vertex + self.origin, fill);
                }
                mesh.indices = indices;
                self.painter.add(egui::Shape::mesh(mesh));
            }
            Err(err) => {
                warn!("Fill tessellation failed ({:?}), filling as convex", err);
                self.painter.add(egui::Shape::convex_polygon(
                    self.to_screen(points),
                    fill,
                    Stroke::NONE,
                ));
            }
        }
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, stroke: Stroke) {
        self.painter.circle(center + self.origin, radius, fill, stroke);
    }

    fn set_cursor(&mut self, affordance: Affordance) {
        if !self.owns_cursor {
            return;
        }
        self.painter.ctx().set_cursor_icon(affordance.cursor_icon());
    }
}

/// Triangulate the closed path through `points` with the nonzero rule, so
/// concave outlines fill exactly the area hit-testing treats as inside.
pub fn tessellate_fill(points: &[Pos2]) -> Result<(Vec<Pos2>, Vec<u32>), TessellationError> {
    let mut builder = Path::builder();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        builder.begin(point(first.x, first.y));
        for p in iter {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<Pos2, u32> = VertexBuffers::new();
    let options = FillOptions::default().with_fill_rule(FillRule::NonZero);
    FillTessellator::new().tessellate_path(
        &path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex<'_>| {
            let p = vertex.position();
            pos2(p.x, p.y)
        }),
    )?;
    Ok((buffers.vertices, buffers.indices))
}

/// Border color at the given fill opacity
pub fn fill_color(color: Color32, alpha: f32) -> Color32 {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Draw every committed shape with its selection background and border
pub fn render_shapes(surface: &mut dyn Surface, shapes: &[Shape], config: &EditorConfig) {
    for shape in shapes {
        let alpha = if shape.is_selected() {
            config.selected_fill_alpha
        } else {
            config.unselected_fill_alpha
        };
        let stroke = Stroke::new(config.border_width, shape.color());

        surface.fill_polygon(shape.points(), fill_color(shape.color(), alpha));
        surface.stroke_polygon(shape.points(), stroke);

        if let Shape::Polygon(polygon) = shape {
            for vertex in polygon.points() {
                surface.circle(*vertex, config.vertex_radius, Color32::WHITE, stroke);
            }
        }
    }
}

/// Draw the outline of the shape under construction
pub fn render_preview(surface: &mut dyn Surface, preview: &Preview, config: &EditorConfig) {
    match preview {
        Preview::Box { rect, color } => {
            let points = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
            surface.stroke_polygon(&points, Stroke::new(config.border_width, *color));
        }
        Preview::Polygon { points, color } => {
            let stroke = Stroke::new(config.border_width, *color);
            surface.stroke_polygon(points, stroke);
            // The trailing point follows the pointer and gets no handle
            for vertex in &points[..points.len().saturating_sub(1)] {
                surface.circle(*vertex, config.vertex_radius, Color32::WHITE, stroke);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;

    fn l_shape() -> Vec<Pos2> {
        // 20x10 bar plus a 10x10 leg: 300 square units
        vec![
            pos2(0.0, 0.0),
            pos2(20.0, 0.0),
            pos2(20.0, 10.0),
            pos2(10.0, 10.0),
            pos2(10.0, 20.0),
            pos2(0.0, 20.0),
        ]
    }

    fn triangle_area(a: Pos2, b: Pos2, c: Pos2) -> f32 {
        ((b - a).x * (c - a).y - (c - a).x * (b - a).y).abs() / 2.0
    }

    #[test]
    fn test_fill_color_alpha() {
        let fill = fill_color(Color32::from_rgb(200, 10, 10), 0.5);
        assert_eq!(fill.a(), 128);
        assert_eq!(fill_color(Color32::RED, 2.0).a(), 255);
    }

    #[test]
    fn test_concave_fill_stays_inside_outline() {
        let (vertices, indices) = tessellate_fill(&l_shape()).unwrap();
        assert!(!indices.is_empty());
        assert_eq!(indices.len() % 3, 0);

        let shape = factory::create_polygon(l_shape(), Color32::RED);
        let polygon = shape.as_polygon().unwrap();
        let mut area = 0.0;
        for tri in indices.chunks(3) {
            let (a, b, c) = (
                vertices[tri[0] as usize],
                vertices[tri[1] as usize],
                vertices[tri[2] as usize],
            );
            area += triangle_area(a, b, c);
            let centroid = pos2((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
            assert!(polygon.contains(centroid), "triangle outside outline at {:?}", centroid);
        }
        assert!((area - 300.0).abs() < 0.01, "filled area {}", area);
    }

    #[test]
    fn test_render_basics() {
        let ctx = egui::Context::default();
        let layer_id = egui::LayerId::background();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let painter = Painter::new(ctx.clone(), layer_id, rect);
        let mut surface = EguiSurface::new(&painter, rect, Color32::WHITE);

        let shapes = vec![
            factory::create_box(pos2(10.0, 10.0), pos2(40.0, 40.0), Color32::RED),
            factory::create_polygon(
                vec![pos2(50.0, 50.0), pos2(90.0, 50.0), pos2(70.0, 90.0)],
                Color32::BLUE,
            ),
            factory::create_polygon(l_shape(), Color32::GREEN),
        ];
        surface.clear();
        render_shapes(&mut surface, &shapes, &EditorConfig::default());
    }
}
