use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;
use gloo_timers::callback::Interval;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use log::warn;

use crate::animation::particles::ParticleField;

const FRAME_MS: u32 = 33;
const PARTICLE_COUNT: usize = 70;
const LINK_DISTANCE: f64 = 120.0;

fn window_size() -> (f64, f64) {
    web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            (width, height)
        })
        .unwrap_or((0.0, 0.0))
}

fn draw(context: &CanvasRenderingContext2d, field: &ParticleField) {
    let (width, height) = field.size();
    context.clear_rect(0.0, 0.0, width, height);

    let particles = field.particles();
    context.set_line_width(1.0);
    for link in field.links(LINK_DISTANCE) {
        let (a, b) = (&particles[link.from], &particles[link.to]);
        context.set_stroke_style(&JsValue::from_str(&format!(
            "rgba(126, 178, 255, {:.3})",
            link.opacity * 0.4
        )));
        context.begin_path();
        context.move_to(a.x, a.y);
        context.line_to(b.x, b.y);
        context.stroke();
    }

    context.set_fill_style(&JsValue::from_str("rgba(255, 255, 255, 0.7)"));
    for p in particles {
        context.begin_path();
        if context
            .arc(p.x, p.y, p.radius, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            context.fill();
        }
    }
}

#[function_component(ParticleBackground)]
pub fn particle_background() -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(
            move |_| {
                let setup = canvas_ref.cast::<HtmlCanvasElement>().and_then(|canvas| {
                    let context = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()?
                        .dyn_into::<CanvasRenderingContext2d>()
                        .ok()?;
                    Some((canvas, context))
                });

                let Some((canvas, context)) = setup else {
                    warn!("Particle background has no 2d canvas, skipping animation");
                    return Box::new(|| ()) as Box<dyn FnOnce()>;
                };

                let (width, height) = window_size();
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
                let field = Rc::new(RefCell::new(ParticleField::seeded(
                    PARTICLE_COUNT,
                    width,
                    height,
                    js_sys::Math::random,
                )));

                let interval = {
                    let field = field.clone();
                    Interval::new(FRAME_MS, move || {
                        let mut field = field.borrow_mut();
                        field.step(f64::from(FRAME_MS) / 1000.0);
                        draw(&context, &field);
                    })
                };

                let on_resize = {
                    let canvas = canvas.clone();
                    Closure::wrap(Box::new(move || {
                        let (width, height) = window_size();
                        canvas.set_width(width as u32);
                        canvas.set_height(height as u32);
                        field.borrow_mut().resize(width, height);
                    }) as Box<dyn FnMut()>)
                };
                let window = web_sys::window();
                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
                }

                Box::new(move || {
                    drop(interval);
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
                    }
                }) as Box<dyn FnOnce()>
            },
            (),
        );
    }

    html! {
        <canvas
            ref={canvas_ref}
            class="particle-background"
            style="position: fixed; top: 0; left: 0; width: 100%; height: 100vh; z-index: -1; pointer-events: none;"
        />
    }
}
