use crate::layout::{self, LayoutResult, OverlayBox, PlacedLine};
use crate::{
    alpha_from_transparency, colours, CanvasDrawer, Colour, DrawResult, FontMetrics, FontResolver,
    FontSpec, Px, RasterError,
};
use log::debug;

/// Styling for a single line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Short font file name, resolved through the renderer's [FontResolver]
    pub font: String,
    /// Pixel em size
    pub size: f32,
    /// Rotation in degrees, counter-clockwise on screen
    pub angle: i32,
    pub colour: Colour,
    /// When set, a highlight box is filled behind the text before drawing
    pub overlay: Option<OverlayStyle>,
}

impl Default for TextStyle {
    fn default() -> TextStyle {
        TextStyle {
            font: "opensans-regular.ttf".into(),
            size: 9.0,
            angle: 0,
            colour: colours::BLACK,
            overlay: None,
        }
    }
}

/// Styling for the highlight box behind a line of text
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OverlayStyle {
    pub colour: Colour,
    /// 0.0 is opaque, 1.0 fully transparent
    pub transparency: f32,
    /// Pixels of padding around the text's measured extents
    pub padding: i32,
}

impl Default for OverlayStyle {
    fn default() -> OverlayStyle {
        OverlayStyle {
            colour: colours::WHITE,
            transparency: 0.5,
            padding: 2,
        }
    }
}

/// Styling for wrapped paragraph text
#[derive(Debug, Clone, PartialEq)]
pub struct WrapStyle {
    /// Short font file name, resolved through the renderer's [FontResolver]
    pub font: String,
    /// Pixel em size
    pub size: f32,
    pub colour: Colour,
    /// Width budget for wrapping; unset (or zero) means the full canvas
    /// width
    pub max_width: Option<Px>,
    /// Treat any run of whitespace as a single word separator instead of
    /// splitting on explicit single spaces
    pub collapse_spaces: bool,
}

impl Default for WrapStyle {
    fn default() -> WrapStyle {
        WrapStyle {
            font: "opensans-regular.ttf".into(),
            size: 9.0,
            colour: colours::BLACK,
            max_width: None,
            collapse_spaces: false,
        }
    }
}

/// The text layout and rendering engine. Holds the injected font resolver
/// and metrics provider; draws through whatever [CanvasDrawer] each call
/// supplies, and keeps no state between calls beyond its font caches.
pub struct Renderer<M> {
    resolver: FontResolver,
    metrics: M,
}

impl<M: FontMetrics> Renderer<M> {
    pub fn new(resolver: FontResolver, metrics: M) -> Renderer<M> {
        Renderer { resolver, metrics }
    }

    /// Render a line of text with its visual top-left at `(x, y)`.
    ///
    /// The vertical coordinate is normalized by the measured height of a
    /// reference glyph, so callers position text by its top edge rather
    /// than its baseline. With an overlay style set, a highlight box sized
    /// to the text's measured extents plus padding is filled first.
    ///
    /// Fails with [RasterError::FontNotFound] before touching the canvas
    /// when the font does not resolve.
    pub fn text(
        &mut self,
        canvas: &mut dyn CanvasDrawer,
        text: &str,
        x: i32,
        y: i32,
        style: &TextStyle,
    ) -> Result<DrawResult, RasterError> {
        let path = self.resolver.resolve(&style.font)?;
        let font = FontSpec::new(path, style.size, style.angle);

        let y = y + layout::baseline_offset(&mut self.metrics, &font)?.round();
        let bounds = self.metrics.measure(&font, text)?;

        let overlay = match &style.overlay {
            Some(overlay) => Some(OverlayBox {
                colour: overlay.colour,
                alpha: alpha_from_transparency(overlay.transparency),
                x0: x - overlay.padding,
                y0: y - overlay.padding,
                x1: x + bounds.width().round() + overlay.padding,
                y1: y + bounds.height().round() + overlay.padding,
            }),
            None => None,
        };

        let result = LayoutResult {
            lines: vec![PlacedLine {
                text: text.to_string(),
                x,
                y,
                bounds,
            }],
            colour: style.colour,
            overlay,
        };

        Ok(render(canvas, &font, &result)?.unwrap_or_default())
    }

    /// Wrap `text` against the style's width budget (the canvas width when
    /// unset) and render the lines starting at the top-left `(left, top)`.
    ///
    /// Empty text renders nothing and succeeds. Returns the layout that was
    /// drawn, so callers can inspect line breaks and extents.
    pub fn text_wrapped(
        &mut self,
        canvas: &mut dyn CanvasDrawer,
        text: &str,
        left: i32,
        top: i32,
        style: &WrapStyle,
    ) -> Result<LayoutResult, RasterError> {
        let max_width = match style.max_width {
            Some(width) if *width > 0.0 => width,
            _ => Px(canvas.width() as f32),
        };
        let result = self.layout_paragraph(text, left, top, max_width, style)?;
        let font = FontSpec::new(self.resolver.resolve(&style.font)?, style.size, 0);
        render(canvas, &font, &result)?;
        Ok(result)
    }

    /// Wrap and place `text` without drawing anything: the measurement-only
    /// half of [Renderer::text_wrapped]
    pub fn layout_paragraph(
        &mut self,
        text: &str,
        left: i32,
        top: i32,
        max_width: Px,
        style: &WrapStyle,
    ) -> Result<LayoutResult, RasterError> {
        let font = FontSpec::new(self.resolver.resolve(&style.font)?, style.size, 0);
        let lines = layout::wrap_words(
            &mut self.metrics,
            &font,
            max_width,
            text,
            style.collapse_spaces,
        )?;
        debug!(
            "wrapped {} chars into {} lines within {max_width}px",
            text.len(),
            lines.len()
        );
        let lines = layout::place_lines(&mut self.metrics, &font, lines, left, top)?;
        Ok(LayoutResult {
            lines,
            colour: style.colour,
            overlay: None,
        })
    }

    /// Flood-fill the canvas with a solid colour starting from the origin.
    /// On a freshly created canvas this covers the whole surface.
    pub fn fill(
        &mut self,
        canvas: &mut dyn CanvasDrawer,
        colour: Colour,
    ) -> Result<(), RasterError> {
        canvas.flood_fill(0, 0, colour)?;
        canvas.save()
    }
}

/// Draw a layout onto a canvas: overlay box first, then each line, then the
/// canvas's finalize step. Returns the handle of the last text blit.
fn render(
    canvas: &mut dyn CanvasDrawer,
    font: &FontSpec,
    result: &LayoutResult,
) -> Result<Option<DrawResult>, RasterError> {
    if let Some(overlay) = &result.overlay {
        canvas.fill_rect(
            overlay.x0,
            overlay.y0,
            overlay.x1,
            overlay.y1,
            overlay.colour,
            overlay.alpha,
        )?;
    }
    let mut last = None;
    for line in &result.lines {
        last = Some(canvas.draw_text(line.x, line.y, result.colour, font, &line.text)?);
    }
    canvas.save()?;
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundingBox;
    use std::path::PathBuf;

    /// fixed-pitch metrics: every character is 9px wide, every string 12px
    /// tall
    struct Grid;

    impl FontMetrics for Grid {
        fn measure(&mut self, _font: &FontSpec, text: &str) -> Result<BoundingBox, RasterError> {
            Ok(BoundingBox::from_extents(
                0.0,
                -12.0,
                text.chars().count() as f32 * 9.0,
                0.0,
            ))
        }
    }

    #[derive(Debug, PartialEq)]
    enum Op {
        FillRect {
            x0: i32,
            y0: i32,
            x1: i32,
            y1: i32,
            colour: Colour,
            alpha: u8,
        },
        DrawText {
            x: i32,
            y: i32,
            colour: Colour,
            text: String,
        },
        FloodFill {
            x: i32,
            y: i32,
            colour: Colour,
        },
        Save,
    }

    /// headless drawer that records every operation instead of rasterizing
    struct RecordingCanvas {
        width: u32,
        height: u32,
        ops: Vec<Op>,
    }

    impl RecordingCanvas {
        fn new(width: u32, height: u32) -> RecordingCanvas {
            RecordingCanvas {
                width,
                height,
                ops: Vec::new(),
            }
        }
    }

    impl CanvasDrawer for RecordingCanvas {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn fill_rect(
            &mut self,
            x0: i32,
            y0: i32,
            x1: i32,
            y1: i32,
            colour: Colour,
            alpha: u8,
        ) -> Result<(), RasterError> {
            self.ops.push(Op::FillRect {
                x0,
                y0,
                x1,
                y1,
                colour,
                alpha,
            });
            Ok(())
        }

        fn draw_text(
            &mut self,
            x: i32,
            y: i32,
            colour: Colour,
            _font: &FontSpec,
            text: &str,
        ) -> Result<DrawResult, RasterError> {
            self.ops.push(Op::DrawText {
                x,
                y,
                colour,
                text: text.to_string(),
            });
            Ok(DrawResult::default())
        }

        fn flood_fill(&mut self, x: i32, y: i32, colour: Colour) -> Result<(), RasterError> {
            self.ops.push(Op::FloodFill { x, y, colour });
            Ok(())
        }

        fn save(&mut self) -> Result<(), RasterError> {
            self.ops.push(Op::Save);
            Ok(())
        }
    }

    fn fixture_root() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("textblit-renderer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("can create fixture dir");
        std::fs::write(dir.join("stub.ttf"), b"stub").expect("can write fixture");
        dir
    }

    fn renderer() -> Renderer<Grid> {
        Renderer::new(FontResolver::new(fixture_root()), Grid)
    }

    fn stub_style() -> TextStyle {
        TextStyle {
            font: "stub.ttf".into(),
            ..TextStyle::default()
        }
    }

    #[test]
    fn text_is_drawn_at_the_normalized_baseline() {
        let mut canvas = RecordingCanvas::new(100, 100);
        renderer()
            .text(&mut canvas, "Hello", 10, 20, &stub_style())
            .unwrap();
        // the reference glyph measures 12px tall, so the baseline lands at
        // y + 12
        assert_eq!(
            canvas.ops,
            vec![
                Op::DrawText {
                    x: 10,
                    y: 32,
                    colour: colours::BLACK,
                    text: "Hello".into(),
                },
                Op::Save,
            ]
        );
    }

    #[test]
    fn overlay_box_is_sized_by_the_actual_text_and_filled_first() {
        let mut canvas = RecordingCanvas::new(200, 100);
        let style = TextStyle {
            overlay: Some(OverlayStyle::default()),
            ..stub_style()
        };
        renderer()
            .text(&mut canvas, "Hello", 10, 20, &style)
            .unwrap();
        // "Hello" measures 45x12; the box hugs the adjusted origin with
        // 2px of padding and half transparency
        assert_eq!(
            canvas.ops[0],
            Op::FillRect {
                x0: 8,
                y0: 30,
                x1: 57,
                y1: 46,
                colour: colours::WHITE,
                alpha: 63,
            }
        );
        assert!(matches!(canvas.ops[1], Op::DrawText { .. }));
    }

    #[test]
    fn overlay_right_edge_tracks_the_text_width() {
        let mut canvas = RecordingCanvas::new(200, 100);
        let style = TextStyle {
            overlay: Some(OverlayStyle {
                padding: 3,
                ..OverlayStyle::default()
            }),
            ..stub_style()
        };
        renderer().text(&mut canvas, "Hi", 40, 0, &style).unwrap();
        match &canvas.ops[0] {
            Op::FillRect { x1, .. } => assert_eq!(*x1, 40 + 18 + 3),
            other => panic!("expected a fill first, got {other:?}"),
        }
    }

    #[test]
    fn missing_font_aborts_before_any_drawing() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let style = TextStyle {
            font: "missing.ttf".into(),
            ..TextStyle::default()
        };
        let result = renderer().text(&mut canvas, "Hello", 0, 0, &style);
        assert!(matches!(result, Err(RasterError::FontNotFound(_))));
        assert!(canvas.ops.is_empty());

        let wrap = WrapStyle {
            font: "missing.ttf".into(),
            ..WrapStyle::default()
        };
        let result = renderer().text_wrapped(&mut canvas, "Hello", 0, 0, &wrap);
        assert!(matches!(result, Err(RasterError::FontNotFound(_))));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn wrapped_lines_are_drawn_top_down() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let style = WrapStyle {
            font: "stub.ttf".into(),
            max_width: Some(Px(50.0)),
            ..WrapStyle::default()
        };
        let layout = renderer()
            .text_wrapped(&mut canvas, "aa bb cc", 5, 7, &style)
            .unwrap();
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(
            canvas.ops,
            vec![
                Op::DrawText {
                    x: 5,
                    y: 7,
                    colour: colours::BLACK,
                    text: "aa bb".into(),
                },
                Op::DrawText {
                    x: 5,
                    y: 19,
                    colour: colours::BLACK,
                    text: "cc".into(),
                },
                Op::Save,
            ]
        );
    }

    #[test]
    fn zero_or_unset_budget_defaults_to_the_canvas_width() {
        // a 54px canvas fits "aa bb" (45px) but not "aa bb cc" (72px)
        let mut canvas = RecordingCanvas::new(54, 100);
        let style = WrapStyle {
            font: "stub.ttf".into(),
            ..WrapStyle::default()
        };
        let layout = renderer()
            .text_wrapped(&mut canvas, "aa bb cc", 0, 0, &style)
            .unwrap();
        assert_eq!(layout.lines.len(), 2);

        let explicit_zero = WrapStyle {
            max_width: Some(Px(0.0)),
            ..style
        };
        let layout = renderer()
            .text_wrapped(&mut canvas, "aa bb cc", 0, 0, &explicit_zero)
            .unwrap();
        assert_eq!(layout.lines.len(), 2);
    }

    #[test]
    fn empty_text_draws_nothing_and_succeeds() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let style = WrapStyle {
            font: "stub.ttf".into(),
            ..WrapStyle::default()
        };
        let layout = renderer()
            .text_wrapped(&mut canvas, "", 0, 0, &style)
            .unwrap();
        assert!(layout.lines.is_empty());
        assert_eq!(canvas.ops, vec![Op::Save]);
    }

    #[test]
    fn fill_floods_from_the_origin() {
        let mut canvas = RecordingCanvas::new(10, 10);
        renderer().fill(&mut canvas, colours::BLUE).unwrap();
        assert_eq!(
            canvas.ops,
            vec![
                Op::FloodFill {
                    x: 0,
                    y: 0,
                    colour: colours::BLUE,
                },
                Op::Save,
            ]
        );
    }

    #[test]
    fn layout_paragraph_performs_no_draw_calls() {
        let style = WrapStyle {
            font: "stub.ttf".into(),
            ..WrapStyle::default()
        };
        let layout = renderer()
            .layout_paragraph("aa bb cc", 0, 0, Px(50.0), &style)
            .unwrap();
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.colour, colours::BLACK);
        assert!(layout.overlay.is_none());
    }
}
