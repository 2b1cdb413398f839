use std::fs::File;
use textblit::{colours, Colour, FaceMetrics, FontResolver, Px, RasterCanvas, Renderer, WrapStyle};

fn main() {
    let mut args = std::env::args().skip(1);
    let fonts_dir = args
        .next()
        .expect("usage: placeholder <fonts-dir> [font-file]");
    let font = args
        .next()
        .unwrap_or_else(|| "opensans-regular.ttf".to_string());

    let mut canvas = RasterCanvas::new(640, 360).expect("dimensions are valid");
    let mut renderer = Renderer::new(FontResolver::new(fonts_dir), FaceMetrics::new());

    renderer
        .fill(&mut canvas, Colour::from_packed(0xe0e0e0))
        .expect("can fill the canvas");

    // wrap a block of body text inside a 24px margin
    let style = WrapStyle {
        font,
        size: 16.0,
        colour: colours::BLACK,
        max_width: Some(Px(640.0 - 2.0 * 24.0)),
        ..WrapStyle::default()
    };
    let layout = renderer
        .text_wrapped(&mut canvas, &lipsum::lipsum(60), 24, 24, &style)
        .expect("can render the paragraph");
    println!("laid out {} lines", layout.lines.len());

    let mut out = File::create("placeholder.png").expect("can create the output file");
    canvas.write_png(&mut out).expect("can encode the canvas");
}
