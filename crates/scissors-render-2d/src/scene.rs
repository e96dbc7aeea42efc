//! Retained scene: primitives kept in paint order.

use glam::Vec2;

use crate::bounds::Bounds;
use crate::primitives::{
    EllipsePrimitive, LinePrimitive, PrimitiveId, RectPrimitive, RenderCommand, TextPrimitive,
};
use crate::surface::{Drawn, Surface};

/// A primitive with its handle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneItem {
    pub id: PrimitiveId,
    pub command: RenderCommand,
}

/// A scene of draw commands, first item painted first.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "SceneItems")
)]
pub struct Scene {
    items: Vec<SceneItem>,
    #[cfg_attr(feature = "serde", serde(skip))]
    next_id: u32,
}

/// Serialized form of a [`Scene`]; handles continue after the highest id.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SceneItems {
    items: Vec<SceneItem>,
}

#[cfg(feature = "serde")]
impl From<SceneItems> for Scene {
    fn from(scene: SceneItems) -> Self {
        let next_id = scene
            .items
            .iter()
            .map(|item| item.id.0 + 1)
            .max()
            .unwrap_or(0);
        Self {
            items: scene.items,
            next_id,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command and return its handle and bounds.
    pub fn push(&mut self, command: RenderCommand) -> Drawn {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        let bounds = command.bounds();
        self.items.push(SceneItem { id, command });
        Drawn { id, bounds }
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn commands(&self) -> impl Iterator<Item = &RenderCommand> {
        self.items.iter().map(|item| &item.command)
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&RenderCommand> {
        self.position(id).map(|index| &self.items[index].command)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounds of everything drawn, or an empty box at the origin.
    pub fn scroll_region(&self) -> Bounds {
        self.bounds().unwrap_or_default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands().filter_map(|command| match command {
            RenderCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands().filter_map(|command| match command {
            RenderCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands().filter_map(|command| match command {
            RenderCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    /// Layout addresses the items it pushed last, so search from the end.
    fn position(&self, id: PrimitiveId) -> Option<usize> {
        self.items.iter().rposition(|item| item.id == id)
    }
}

impl Surface for Scene {
    fn text(&mut self, text: TextPrimitive) -> Drawn {
        self.push(RenderCommand::Text(text))
    }

    fn line(&mut self, line: LinePrimitive) -> Drawn {
        self.push(RenderCommand::Line(line))
    }

    fn rect(&mut self, rect: RectPrimitive) -> Drawn {
        self.push(RenderCommand::Rect(rect))
    }

    fn ellipse(&mut self, ellipse: EllipsePrimitive) -> Drawn {
        self.push(RenderCommand::Ellipse(ellipse))
    }

    fn bounds_of(&self, id: PrimitiveId) -> Option<Bounds> {
        self.get(id).map(RenderCommand::bounds)
    }

    fn bounds(&self) -> Option<Bounds> {
        self.commands()
            .map(RenderCommand::bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
    }

    fn translate(&mut self, id: PrimitiveId, delta: Vec2) -> Option<Bounds> {
        let index = self.position(id)?;
        let command = &mut self.items[index].command;
        command.translate(delta);
        Some(command.bounds())
    }

    fn lower(&mut self, id: PrimitiveId, below: PrimitiveId) {
        let (Some(from), Some(to)) = (self.position(id), self.position(below)) else {
            return;
        };
        if from > to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{ApproximateMetrics, FontFamily, FontMetrics, FontWeight};

    fn font() -> crate::font::Font {
        ApproximateMetrics::uniform(0.5, 1.0).font(10.0, FontWeight::Normal, FontFamily::Monospace)
    }

    #[test]
    fn test_push_reports_bounds() {
        let mut scene = Scene::new();
        let drawn = scene.text(TextPrimitive::new(0.0, 0.0, "abcd", font()));
        assert_eq!(drawn.id, PrimitiveId(0));
        assert_eq!(drawn.bounds, Bounds::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(scene.bounds_of(drawn.id), Some(drawn.bounds));
        assert_eq!(scene.bounds_of(PrimitiveId(7)), None);
    }

    #[test]
    fn test_scroll_region_unions_everything() {
        let mut scene = Scene::new();
        assert_eq!(scene.bounds(), None);
        assert_eq!(scene.scroll_region(), Bounds::default());

        scene.line(LinePrimitive::new(-5.0, 2.0, 10.0, 2.0));
        scene.rect(RectPrimitive::new(0.0, 0.0, 4.0, 30.0));
        assert_eq!(scene.scroll_region(), Bounds::from_edges(-5.0, 0.0, 10.0, 30.0));
    }

    #[test]
    fn test_translate_moves_one_item() {
        let mut scene = Scene::new();
        let first = scene.text(TextPrimitive::new(0.0, 0.0, "ab", font()));
        let second = scene.line(LinePrimitive::new(0.0, 0.0, 1.0, 0.0));

        let moved = scene.translate(first.id, Vec2::new(-10.0, -3.0));
        assert_eq!(moved, Some(Bounds::new(-10.0, -3.0, 10.0, 10.0)));
        assert_eq!(scene.bounds_of(second.id), Some(second.bounds));
        assert_eq!(scene.translate(PrimitiveId(99), Vec2::ONE), None);
    }

    #[test]
    fn test_lower_moves_before_target() {
        let mut scene = Scene::new();
        let text = scene.text(TextPrimitive::new(0.0, 0.0, "x", font()));
        let line = scene.line(LinePrimitive::new(0.0, 0.0, 1.0, 0.0));
        let rect = scene.rect(RectPrimitive::new(0.0, 0.0, 1.0, 1.0));

        scene.lower(rect.id, text.id);
        let order: Vec<_> = scene.items().iter().map(|item| item.id).collect();
        assert_eq!(order, vec![rect.id, text.id, line.id]);

        // Already beneath: no change.
        scene.lower(rect.id, line.id);
        let order: Vec<_> = scene.items().iter().map(|item| item.id).collect();
        assert_eq!(order, vec![rect.id, text.id, line.id]);
    }

    #[test]
    fn test_lookups_in_large_scene() {
        let mut scene = Scene::new();
        let first = scene.line(LinePrimitive::new(0.0, 0.0, 1.0, 0.0));
        let mut last = first;
        for i in 0..20_000 {
            last = scene.text(TextPrimitive::new(i as f32, 0.0, "a", font()));
            scene.translate(last.id, Vec2::new(0.0, 1.0));
        }
        let rect = scene.rect(RectPrimitive::new(0.0, 0.0, 1.0, 1.0));
        scene.lower(rect.id, last.id);

        let len = scene.len();
        assert_eq!(scene.items()[len - 2].id, rect.id);
        assert_eq!(scene.items()[len - 1].id, last.id);
        assert_eq!(scene.bounds_of(last.id), Some(Bounds::new(19_999.0, 1.0, 5.0, 10.0)));
        assert_eq!(scene.bounds_of(first.id), Some(first.bounds));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialized_scene_continues_handles() {
        let mut scene = Scene::new();
        scene.line(LinePrimitive::new(0.0, 0.0, 1.0, 1.0));
        scene.rect(RectPrimitive::new(0.0, 0.0, 1.0, 1.0));
        let json = serde_json::to_string(&scene).unwrap();
        assert!(!json.contains("next_id"));

        let mut restored: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, scene);
        let drawn = restored.line(LinePrimitive::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(drawn.id, PrimitiveId(2));
        assert_eq!(restored.bounds_of(PrimitiveId(0)), scene.bounds_of(PrimitiveId(0)));
    }

    #[test]
    fn test_clear_resets_handles() {
        let mut scene = Scene::new();
        scene.line(LinePrimitive::new(0.0, 0.0, 1.0, 1.0));
        scene.clear();
        assert!(scene.is_empty());
        let drawn = scene.line(LinePrimitive::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(drawn.id, PrimitiveId(0));
        assert_eq!(scene.len(), 1);
    }
}
