//! Rendering: draws the selection overlay to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives the derived [`SelectionGroup`] and marquee rectangle and produces
//! pixels; it never mutates engine state. Objects themselves are drawn by the
//! host on its own layer beneath this one.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Camera;
use crate::geometry::Rect;
use crate::hit::HandlePosition;
use crate::selection::SelectionGroup;

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

const ACCENT: &str = "#1E90FF";
const MARQUEE_FILL: &str = "rgba(30, 144, 255, 0.12)";

/// Draw the selection outline, handles, and marquee.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw_overlay(
    ctx: &CanvasRenderingContext2d,
    group: Option<&SelectionGroup>,
    marquee: Option<Rect>,
    camera: &Camera,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    if let Some(group) = group {
        draw_outline(ctx, &group.outline, camera.zoom)?;
        draw_handles(ctx, group, camera.zoom)?;
    }

    if let Some(m) = marquee {
        draw_marquee(ctx, m, camera.zoom)?;
    }

    Ok(())
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash_world: f64) -> Result<(), JsValue> {
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash_world.into());
    dash_array.push(&dash_world.into());
    ctx.set_line_dash(&dash_array)
}

fn draw_outline(ctx: &CanvasRenderingContext2d, outline: &Rect, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(ACCENT);
    ctx.set_line_width(1.0 / zoom);
    set_dash(ctx, SELECTION_DASH_PX / zoom)?;
    ctx.stroke_rect(outline.x, outline.y, outline.width, outline.height);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

fn draw_handles(ctx: &CanvasRenderingContext2d, group: &SelectionGroup, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str("#fff");
    ctx.set_stroke_style_str(ACCENT);
    ctx.set_line_width(1.0 / zoom);

    for handle in &group.handles {
        let r = handle.hit_rect;
        ctx.fill_rect(r.x, r.y, r.width, r.height);
        ctx.stroke_rect(r.x, r.y, r.width, r.height);
    }

    if let Some(rotate) = &group.rotate_handle {
        // Stem from the top edge to the rotate knob.
        if let Some(top) = group.handle(HandlePosition::N) {
            ctx.begin_path();
            ctx.move_to(top.center.x, top.center.y);
            ctx.line_to(rotate.center.x, rotate.center.y);
            ctx.stroke();
        }
        ctx.begin_path();
        ctx.arc(rotate.center.x, rotate.center.y, rotate.hit_rect.width / 2.0, 0.0, 2.0 * PI)?;
        ctx.fill();
        ctx.stroke();
    }

    ctx.restore();
    Ok(())
}

fn draw_marquee(ctx: &CanvasRenderingContext2d, marquee: Rect, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    set_dash(ctx, SELECTION_DASH_PX / zoom)?;
    ctx.set_stroke_style_str(ACCENT);
    ctx.set_fill_style_str(MARQUEE_FILL);
    ctx.set_line_width(1.0 / zoom);
    ctx.fill_rect(marquee.x, marquee.y, marquee.width, marquee.height);
    ctx.stroke_rect(marquee.x, marquee.y, marquee.width, marquee.height);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}
