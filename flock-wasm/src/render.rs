use flock_core::color::bird_color;
use flock_shared::{Bird, SimulationState};
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "rgb(30, 60, 114)";
const OBSTACLE_FILL: &str = "rgba(200, 50, 50, 0.8)";
const OBSTACLE_STROKE: &str = "rgba(150, 30, 30, 0.9)";
const ATTRACTOR_FILL: &str = "rgba(255, 235, 59, 0.6)";
const ATTRACTOR_STROKE: &str = "rgba(255, 193, 7, 0.8)";
const ATTRACTOR_RADIUS: f64 = 15.0;

/// Paint one snapshot onto the canvas.
///
/// Full clear every frame; a translucent wash would leave motion trails.
/// Draw order matters only for overlap: obstacles under birds under the
/// attractor marker.
pub fn render(
    context: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    state: &SimulationState,
) -> Result<(), JsValue> {
    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());

    context.clear_rect(0.0, 0.0, width, height);
    context.set_fill_style_str(BACKGROUND);
    context.fill_rect(0.0, 0.0, width, height);

    context.set_fill_style_str(OBSTACLE_FILL);
    context.set_stroke_style_str(OBSTACLE_STROKE);
    context.set_line_width(2.0);
    for obstacle in &state.obstacles {
        context.begin_path();
        context.arc(
            obstacle.position.x,
            obstacle.position.y,
            obstacle.radius,
            0.0,
            TAU,
        )?;
        context.fill();
        context.stroke();
    }

    for bird in &state.birds {
        draw_bird(context, bird)?;
    }

    if state.attractor.active {
        let position = state.attractor.position;
        context.set_fill_style_str(ATTRACTOR_FILL);
        context.begin_path();
        context.arc(position.x, position.y, ATTRACTOR_RADIUS, 0.0, TAU)?;
        context.fill();
        context.set_stroke_style_str(ATTRACTOR_STROKE);
        context.set_line_width(2.0);
        context.stroke();
    }

    Ok(())
}

fn draw_bird(context: &CanvasRenderingContext2d, bird: &Bird) -> Result<(), JsValue> {
    let angle = bird.velocity.heading();

    context.save();
    context.translate(bird.position.x, bird.position.y)?;
    context.rotate(angle)?;

    // Body: a triangle pointing along the velocity vector
    context.set_fill_style_str(&bird_color(&bird.id));
    context.set_stroke_style_str("rgba(0, 0, 0, 0.5)");
    context.set_line_width(1.0);
    context.begin_path();
    context.move_to(6.0, 0.0);
    context.line_to(-4.0, -3.0);
    context.line_to(-4.0, 3.0);
    context.close_path();
    context.fill();
    context.stroke();

    // Eye dots, fixed in the glyph's local frame
    context.set_fill_style_str("white");
    context.begin_path();
    context.arc(3.0, -1.0, 1.0, 0.0, TAU)?;
    context.arc(3.0, 1.0, 1.0, 0.0, TAU)?;
    context.fill();

    context.set_fill_style_str("black");
    context.begin_path();
    context.arc(3.5, -1.0, 0.5, 0.0, TAU)?;
    context.arc(3.5, 1.0, 0.5, 0.0, TAU)?;
    context.fill();

    context.restore();
    Ok(())
}
