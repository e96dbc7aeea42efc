//! JSON dump of a rendered scene.

use scissors_core::ExportError;
use scissors_render_2d::{Bounds, Scene, SceneItem};
use serde::Serialize;

#[derive(Serialize)]
struct SceneDump<'a> {
    scroll_region: Bounds,
    items: &'a [SceneItem],
}

/// Export a scene as pretty-printed JSON, primitives in paint order.
pub fn export(scene: &Scene) -> Result<String, ExportError> {
    if scene.is_empty() {
        return Err(ExportError::EmptyScene);
    }

    let dump = SceneDump {
        scroll_region: scene.scroll_region(),
        items: scene.items(),
    };
    serde_json::to_string_pretty(&dump).map_err(|err| ExportError::Serialize {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scissors_render_2d::{LinePrimitive, Surface};

    #[test]
    fn test_export_empty_scene() {
        assert!(matches!(export(&Scene::new()), Err(ExportError::EmptyScene)));
    }

    #[test]
    fn test_export_line() {
        let mut scene = Scene::new();
        scene.line(LinePrimitive::new(0.0, 0.0, 10.0, 0.0));
        let json: serde_json::Value = serde_json::from_str(&export(&scene).unwrap()).unwrap();

        assert_eq!(json["scroll_region"]["width"], 10.0);
        assert_eq!(json["items"][0]["id"], 0);
        assert_eq!(json["items"][0]["command"]["Line"]["to"][0], 10.0);
    }
}
