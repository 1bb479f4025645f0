//! Runs the full pipeline on a 100x100 square and prints the resulting
//! crease pattern as JSON.
//!
//! Set `RUST_LOG=debug` to watch the pipeline stages.

use oricut::engine::{Engine, Viewport};
use oricut::export::creases_to_json;
use oricut::math::Point2;
use oricut::scene::{Scene, Shape};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut scene = Scene::new();
    scene.add_shape(Shape::closed_polygon(vec![
        Point2::new(0.0, 0.0),
        Point2::new(100.0, 0.0),
        Point2::new(100.0, 100.0),
        Point2::new(0.0, 100.0),
    ]));

    let engine = Engine::new();
    let bundle = engine.run(&scene, None, Viewport::new(800.0, 600.0))?;

    println!(
        "cut line: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
        bundle.cut_line.a.x, bundle.cut_line.a.y, bundle.cut_line.b.x, bundle.cut_line.b.y
    );
    println!("{}", creases_to_json(&bundle.creases)?);
    Ok(())
}
