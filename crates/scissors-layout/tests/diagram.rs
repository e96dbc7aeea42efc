//! Parser to layout tests on small documents.

use glam::Vec2;
use scissors_layout::{render_document, LayoutEngine, LayoutOptions};
use scissors_parser::{parse_document, MAX_NESTING_DEPTH};
use scissors_render_2d::{ApproximateMetrics, Bounds, RenderCommand, Scene};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine() -> LayoutEngine {
    LayoutEngine::new(
        LayoutOptions::default().with_font_height(10.0),
        &ApproximateMetrics::uniform(0.5, 1.0),
    )
}

fn render(source: &str) -> (f32, Scene) {
    init_logging();
    let doc = parse_document(source).unwrap();
    let mut scene = Scene::new();
    let summary = render_document(&engine(), &doc, &mut scene);
    (summary.height, scene)
}

fn segments(scene: &Scene) -> Vec<(Vec2, Vec2)> {
    scene.lines().map(|line| (line.from, line.to)).collect()
}

#[test]
fn test_small_document_geometry() {
    let (height, scene) = render(r#"<a x="1"><b/>hello</a>"#);
    assert_eq!(height, 30.0);

    let texts: Vec<_> = scene
        .texts()
        .map(|t| (t.text.as_str(), t.position))
        .collect();
    assert_eq!(
        texts,
        vec![
            ("(A-1)", Vec2::new(-17.5, -2.0)),
            ("a", Vec2::new(0.0, 0.0)),
            ("x = ", Vec2::new(35.0, 15.0)),
            ("1", Vec2::new(55.0, 15.0)),
            ("(B-1)", Vec2::new(87.5, -2.0)),
            ("b", Vec2::new(105.0, 0.0)),
            ("hello", Vec2::new(105.0, 20.0)),
        ]
    );

    assert_eq!(
        segments(&scene),
        vec![
            (Vec2::new(10.0, 15.0), Vec2::new(10.0, 20.0)),
            (Vec2::new(10.0, 20.0), Vec2::new(30.0, 20.0)),
            (Vec2::new(10.0, 20.0), Vec2::new(10.0, 20.0)),
            (Vec2::new(80.0, 5.0), Vec2::new(100.0, 5.0)),
            (Vec2::new(80.0, 25.0), Vec2::new(100.0, 25.0)),
            (Vec2::new(10.0, 5.0), Vec2::new(80.0, 5.0)),
            (Vec2::new(80.0, 5.0), Vec2::new(80.0, 25.0)),
        ]
    );

    let boxes: Vec<_> = scene
        .rects()
        .map(|r| RenderCommand::Rect(r.clone()).bounds())
        .collect();
    assert_eq!(boxes, vec![Bounds::from_edges(100.0, 15.0, 135.0, 35.0)]);

    assert_eq!(
        scene.scroll_region(),
        Bounds::from_edges(-17.5, -2.0, 135.0, 35.0)
    );
}

#[test]
fn test_whitespace_only_child_matches_childless() {
    let (childless, bare) = render("<a/>");
    let (padded, spaced) = render("<a>\n    \n</a>");
    assert_eq!(childless, padded);
    assert_eq!(segments(&bare), segments(&spaced));
    assert!(segments(&spaced).is_empty());
}

#[test]
fn test_cousins_continue_numbering() {
    let (_, scene) = render("<r><a><x/></a><b><y/></b></r>");
    let tags: Vec<_> = scene
        .texts()
        .map(|t| t.text.as_str())
        .filter(|t| t.starts_with('('))
        .collect();
    assert_eq!(tags, vec!["(A-1)", "(B-1)", "(C-1)", "(B-2)", "(C-2)"]);
}

#[test]
fn test_rendering_twice_is_identical() {
    init_logging();
    let doc = parse_document(
        r#"<makefile>
  <!-- build -->
  <exe id="app" kind="gui">
    <sources>
        main.cpp
        util.cpp
    </sources>
    <define><![CDATA[A<B]]></define>
  </exe>
</makefile>"#,
    )
    .unwrap();

    let engine = engine();
    let mut first = Scene::new();
    let mut second = Scene::new();
    let a = render_document(&engine, &doc, &mut first);
    let b = render_document(&engine, &doc, &mut second);
    assert_eq!(a, b);
    assert_eq!(first, second);

    // Re-rendering onto a used surface starts over.
    let c = render_document(&engine, &doc, &mut first);
    assert_eq!(a, c);
    assert_eq!(first, second);
}

#[test]
fn test_multiline_text_advances_per_line() {
    let (height, scene) = render("<s>\n    one\n    two\n    three\n</s>");
    // Three text rows of 10 under a label of 10.
    assert_eq!(height, 30.0);
    let rows: Vec<_> = scene
        .texts()
        .filter(|t| !t.text.starts_with('(') && t.text != "s")
        .map(|t| (t.text.as_str(), t.position.y))
        .collect();
    assert_eq!(rows, vec![("one", 0.0), ("two", 10.0), ("three", 20.0)]);
}

#[test]
fn test_deepest_accepted_document_renders() {
    let source = "<a>".repeat(MAX_NESTING_DEPTH) + &"</a>".repeat(MAX_NESTING_DEPTH);
    let (height, scene) = render(&source);
    assert_eq!(height, 10.0);
    assert_eq!(scene.texts().filter(|t| t.text == "a").count(), MAX_NESTING_DEPTH);
}
