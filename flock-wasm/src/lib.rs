//! Browser front-end for the remotely-simulated flock.
//!
//! The host page hands over a canvas plus two overlay elements (obstacle
//! drag preview, attractor marker) and forwards pointer events and control
//! clicks to [`FlockApp`]. Everything else happens here: gesture
//! interpretation, the frame loop, rendering, and talking to the service.

use flock_client::SimulationClient;
use flock_core::{
    BirdBurst, Command, CssBox, GestureController, InteractionMode, LoopState, SurfaceGeometry,
};
use flock_shared::Point;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, Window,
};

mod logger;
mod render;

struct Inner {
    window: Window,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    preview: HtmlElement,
    marker: HtmlElement,
    client: SimulationClient,
    gestures: RefCell<GestureController>,
    loop_state: RefCell<LoopState>,
    frame_callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

/// The interactive visualization controller
#[wasm_bindgen]
pub struct FlockApp {
    inner: Rc<Inner>,
}

#[wasm_bindgen]
impl FlockApp {
    /// Wire up against the canvas and the two overlay elements by id.
    /// The service base URL is taken from the page's own origin.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, preview_id: &str, marker_id: &str) -> Result<FlockApp, JsValue> {
        logger::init();

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let preview = document
            .get_element_by_id(preview_id)
            .ok_or("preview element not found")?
            .dyn_into::<HtmlElement>()?;
        let marker = document
            .get_element_by_id(marker_id)
            .ok_or("marker element not found")?
            .dyn_into::<HtmlElement>()?;

        let origin = window.location().origin()?;
        let client =
            SimulationClient::new(origin).map_err(|err| JsValue::from_str(&format!("{err:#}")))?;

        log::info!("flock app attached to canvas #{canvas_id}");

        Ok(FlockApp {
            inner: Rc::new(Inner {
                window,
                canvas,
                context,
                preview,
                marker,
                client,
                gestures: RefCell::new(GestureController::new()),
                loop_state: RefCell::new(LoopState::new()),
                frame_callback: RefCell::new(None),
            }),
        })
    }

    /// Start (or restart) the frame loop and fetch the initial snapshot.
    /// A handle left over from an earlier start is cancelled first, so two
    /// starts never double-advance the simulation.
    pub fn start(&self) {
        if self.inner.frame_callback.borrow().is_none() {
            let frame_inner = self.inner.clone();
            let closure =
                Closure::wrap(Box::new(move || on_frame(&frame_inner)) as Box<dyn FnMut()>);
            *self.inner.frame_callback.borrow_mut() = Some(closure);
        }

        if let Some(stale) = self.inner.loop_state.borrow_mut().begin() {
            let _ = self.inner.window.cancel_animation_frame(stale);
        }
        schedule_frame(&self.inner);

        let inner = self.inner.clone();
        spawn_local(async move {
            inner.client.refresh_snapshot().await;
        });
    }

    /// Stop scheduling frames entirely (distinct from pausing, which keeps
    /// the loop polling)
    pub fn stop(&self) {
        if let Some(handle) = self.inner.loop_state.borrow_mut().halt() {
            let _ = self.inner.window.cancel_animation_frame(handle);
        }
    }

    /// Select the interaction mode: "none", "addBird", "addObstacle" or
    /// "attractor". Cancels any gesture of the previous mode.
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode = InteractionMode::from_name(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown mode: {mode}")))?;
        let commands = self.inner.gestures.borrow_mut().set_mode(mode);
        apply(&self.inner, commands);
        Ok(())
    }

    pub fn mode(&self) -> String {
        self.inner.gestures.borrow().mode().name().to_string()
    }

    pub fn handle_click(&self, event: MouseEvent) {
        let position = event_position(&self.inner, &event);
        let commands = self
            .inner
            .gestures
            .borrow_mut()
            .click(position, &mut rand::thread_rng());
        apply(&self.inner, commands);
    }

    pub fn handle_pointer_down(&self, event: MouseEvent) {
        let position = event_position(&self.inner, &event);
        let commands = self.inner.gestures.borrow_mut().pointer_down(position);
        apply(&self.inner, commands);
    }

    pub fn handle_pointer_move(&self, event: MouseEvent) {
        let position = event_position(&self.inner, &event);
        let commands = self.inner.gestures.borrow_mut().pointer_move(position);
        apply(&self.inner, commands);
    }

    pub fn handle_pointer_up(&self, event: MouseEvent) {
        let position = event_position(&self.inner, &event);
        let commands = self.inner.gestures.borrow_mut().pointer_up(position);
        apply(&self.inner, commands);
    }

    /// Taps behave like clicks: each active touch point spawns a burst in
    /// add-bird mode
    pub fn handle_touch(&self, event: TouchEvent) {
        let touches = event.touches();
        for i in 0..touches.length() {
            if let Some(touch) = touches.item(i) {
                let position = surface_geometry(&self.inner)
                    .to_simulation(f64::from(touch.client_x()), f64::from(touch.client_y()));
                let commands = self
                    .inner
                    .gestures
                    .borrow_mut()
                    .click(position, &mut rand::thread_rng());
                apply(&self.inner, commands);
            }
        }
    }

    /// Leaving the surface mid-gesture releases without committing
    pub fn handle_pointer_leave(&self) {
        let commands = self.inner.gestures.borrow_mut().pointer_leave();
        apply(&self.inner, commands);
    }

    pub fn toggle_pause(&self) {
        let inner = self.inner.clone();
        spawn_local(async move {
            inner.client.toggle_running().await;
        });
    }

    /// Reset the simulation. Overlays are hidden and, if the frame cycle
    /// was lost while the reset was in flight, it is restarted exactly
    /// once.
    pub fn reset(&self) {
        let inner = self.inner.clone();
        spawn_local(async move {
            inner.client.request_reset().await;
            hide(&inner.preview);
            hide(&inner.marker);
            if inner.loop_state.borrow().needs_kick() {
                schedule_frame(&inner);
            }
        });
    }

    pub fn bird_count(&self) -> usize {
        self.inner.client.bird_count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.inner.client.obstacle_count()
    }

    pub fn step(&self) -> u64 {
        self.inner.client.step()
    }

    pub fn is_running(&self) -> bool {
        self.inner.client.is_running()
    }
}

/// One frame of the loop. The pending handle is spent; a single cooperative
/// task steps (when running) and renders the snapshot that step returned,
/// then schedules the next frame. While paused the task only reschedules,
/// so a later resume is picked up on the next frame.
fn on_frame(inner: &Rc<Inner>) {
    inner.loop_state.borrow_mut().frame_fired();
    let inner = inner.clone();
    spawn_local(async move {
        if inner.client.is_running() {
            inner.client.advance_step().await;
            let snapshot = inner.client.snapshot();
            if let Err(err) = render::render(&inner.context, &inner.canvas, &snapshot) {
                log::error!("render failed: {err:?}");
            }
        }
        schedule_frame(&inner);
    });
}

/// Schedule the next frame, provided the loop is active and no frame is
/// already pending. All scheduling funnels through here to keep at most one
/// handle alive.
fn schedule_frame(inner: &Rc<Inner>) {
    {
        let state = inner.loop_state.borrow();
        if !state.is_active() || state.has_pending_frame() {
            return;
        }
    }
    let callback = inner.frame_callback.borrow();
    let Some(callback) = callback.as_ref() else {
        return;
    };
    match inner
        .window
        .request_animation_frame(callback.as_ref().unchecked_ref())
    {
        Ok(handle) => inner.loop_state.borrow_mut().scheduled(handle),
        Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
    }
}

fn apply(inner: &Rc<Inner>, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::SpawnBurst(burst) => {
                let inner = inner.clone();
                spawn_local(async move {
                    run_burst(&inner, burst).await;
                });
            }
            Command::ShowPreview { center, radius } => {
                let geometry = surface_geometry(inner);
                place(&inner.preview, &geometry.preview_box(center, radius));
            }
            Command::HidePreview => hide(&inner.preview),
            Command::CommitObstacle { center, radius } => {
                let inner = inner.clone();
                spawn_local(async move {
                    inner.client.submit_obstacle(center, radius).await;
                });
            }
            Command::SetAttractor { position, active } => {
                if active {
                    let geometry = surface_geometry(inner);
                    let (left, top) = geometry.marker_position(position);
                    show_at(&inner.marker, left, top);
                } else {
                    hide(&inner.marker);
                }
                let inner = inner.clone();
                spawn_local(async move {
                    inner.client.submit_attractor(position, active).await;
                });
            }
        }
    }
}

/// Spawn the burst one bird at a time with the planned stagger, so the
/// group appears organically instead of popping in at once
async fn run_burst(inner: &Rc<Inner>, burst: BirdBurst) {
    for (i, spawn) in burst.spawns.iter().enumerate() {
        if i > 0 {
            sleep_ms(&inner.window, burst.interval_ms as i32).await;
        }
        inner.client.submit_bird_at(*spawn).await;
    }
}

/// Geometry is rebuilt from the live bounding rect on every call; the
/// on-screen size can change between events under responsive layout
fn surface_geometry(inner: &Rc<Inner>) -> SurfaceGeometry {
    let rect = inner.canvas.get_bounding_client_rect();
    SurfaceGeometry::new(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        f64::from(inner.canvas.width()),
        f64::from(inner.canvas.height()),
    )
}

fn event_position(inner: &Rc<Inner>, event: &MouseEvent) -> Point {
    surface_geometry(inner).to_simulation(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn place(element: &HtmlElement, css_box: &CssBox) {
    let style = element.style();
    let _ = style.set_property("display", "block");
    let _ = style.set_property("left", &format!("{}px", css_box.left));
    let _ = style.set_property("top", &format!("{}px", css_box.top));
    let _ = style.set_property("width", &format!("{}px", css_box.width));
    let _ = style.set_property("height", &format!("{}px", css_box.height));
}

fn show_at(element: &HtmlElement, left: f64, top: f64) {
    let style = element.style();
    let _ = style.set_property("display", "block");
    let _ = style.set_property("left", &format!("{left}px"));
    let _ = style.set_property("top", &format!("{top}px"));
}

fn hide(element: &HtmlElement) {
    let _ = element.style().set_property("display", "none");
}

async fn sleep_ms(window: &Window, ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
