use std::fs::File;
use textblit::{
    colours, Colour, FaceMetrics, FontResolver, OverlayStyle, RasterCanvas, Renderer, TextStyle,
};

fn main() {
    // fonts don't ship with the library; point the demo at a directory
    // containing one
    let mut args = std::env::args().skip(1);
    let fonts_dir = args
        .next()
        .expect("usage: caption <fonts-dir> [font-file]");
    let font = args
        .next()
        .unwrap_or_else(|| "opensans-regular.ttf".to_string());

    let mut canvas = RasterCanvas::new(480, 160).expect("dimensions are valid");
    let mut renderer = Renderer::new(FontResolver::new(fonts_dir), FaceMetrics::new());

    // a solid backdrop, then a caption with a translucent highlight box
    renderer
        .fill(&mut canvas, Colour::from_packed(0x336699))
        .expect("can fill the canvas");

    let style = TextStyle {
        font,
        size: 24.0,
        colour: colours::WHITE,
        overlay: Some(OverlayStyle {
            colour: colours::BLACK,
            transparency: 0.35,
            padding: 6,
        }),
        ..TextStyle::default()
    };
    renderer
        .text(&mut canvas, "Hello world!", 24, 56, &style)
        .expect("can render the caption");

    let mut out = File::create("caption.png").expect("can create the output file");
    canvas.write_png(&mut out).expect("can encode the canvas");
}
