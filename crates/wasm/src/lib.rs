#![cfg(target_arch = "wasm32")]
//! Browser host for backdrop.
//!
//! Maps the host traits onto the page: [`BrowserDisplay`] over
//! `requestAnimationFrame`, [`WindowContainer`] over the window `resize`
//! event, and [`CanvasPresenter`] blitting each frame into a 2D canvas. JS
//! constructs a [`NeuralBackground`] per section and calls `unmount()` when
//! the section goes away.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use backdrop_core::{SceneError, Srgb, Surface};
use backdrop_host::{
    Background, Container, DisplayLink, FrameCallback, FrameHandle, ListenerId, Presenter,
    ResizeCallback,
};
use backdrop_scenes::pixel::surface_to_rgba;
use backdrop_scenes::SceneKind;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, Window};

#[wasm_bindgen(start)]
pub fn start() {
    console_log::init_with_level(log::Level::Info).ok();
}

/// `requestAnimationFrame` as a [`DisplayLink`].
pub struct BrowserDisplay {
    window: Window,
}

impl BrowserDisplay {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl DisplayLink for BrowserDisplay {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        // Freed by the browser after it runs; a cancelled one is leaked.
        let js = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        match self.window.request_animation_frame(js.unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id as u32)),
            Err(e) => {
                log::debug!("requestAnimationFrame refused: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0 as i32) {
            log::debug!("cancelAnimationFrame failed: {e:?}");
        }
    }
}

/// The browser window as a [`Container`], sized by `innerWidth`/`innerHeight`.
pub struct WindowContainer {
    window: Window,
    listeners: RefCell<HashMap<u32, Closure<dyn FnMut()>>>,
    next_id: Cell<u32>,
}

impl WindowContainer {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }
}

fn window_size(window: &Window) -> Option<(usize, usize)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    if width < 1.0 || height < 1.0 {
        return None;
    }
    Some((width as usize, height as usize))
}

impl Container for WindowContainer {
    fn size(&self) -> Option<(usize, usize)> {
        window_size(&self.window)
    }

    fn subscribe_resize(&self, mut callback: ResizeCallback) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        let window = self.window.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some((width, height)) = window_size(&window) {
                callback(width, height);
            }
        });
        if let Err(e) = self
            .window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        {
            log::warn!("could not listen for resize: {e:?}");
        }
        self.listeners.borrow_mut().insert(id, closure);
        ListenerId(id)
    }

    fn unsubscribe_resize(&self, id: ListenerId) {
        if let Some(closure) = self.listeners.borrow_mut().remove(&id.0) {
            remove_resize_listener(&self.window, &closure);
        }
    }
}

fn remove_resize_listener(window: &Window, closure: &Closure<dyn FnMut()>) {
    if let Err(e) =
        window.remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
    {
        log::debug!("removing resize listener failed: {e:?}");
    }
}

impl Drop for WindowContainer {
    fn drop(&mut self) {
        for (_, closure) in self.listeners.borrow_mut().drain() {
            remove_resize_listener(&self.window, &closure);
        }
    }
}

/// Copies each frame into a 2D canvas, matching the canvas size to the
/// surface.
pub struct CanvasPresenter {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    backdrop: Option<Srgb>,
}

impl CanvasPresenter {
    pub fn new(canvas: HtmlCanvasElement, backdrop: Option<Srgb>) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            context,
            backdrop,
        })
    }
}

impl Presenter for CanvasPresenter {
    fn present(&mut self, surface: &Surface) -> bool {
        if !self.canvas.is_connected() {
            return false;
        }
        let (width, height) = (surface.width() as u32, surface.height() as u32);
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        let bytes = surface_to_rgba(surface, self.backdrop);
        let image = match ImageData::new_with_u8_clamped_array_and_sh(Clamped(&bytes), width, height) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("ImageData rejected the frame: {e:?}");
                return false;
            }
        };
        self.context.put_image_data(&image, 0.0, 0.0).is_ok()
    }
}

fn js_error(e: SceneError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A mounted background on one canvas.
#[wasm_bindgen]
pub struct NeuralBackground {
    inner: Background<SceneKind>,
}

#[wasm_bindgen]
impl NeuralBackground {
    /// Starts animating `scene` (a preset name) on `canvas`.
    ///
    /// `params_json` is a JSON object merged over the preset; an empty string
    /// means no overrides. An unknown scene name or malformed JSON throws. A
    /// window without a drawable size leaves the background idle.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        scene: &str,
        seed: u32,
        params_json: &str,
    ) -> Result<NeuralBackground, JsValue> {
        if !SceneKind::list_scenes().iter().any(|s| *s == scene) {
            return Err(js_error(SceneError::UnknownScene(scene.to_string())));
        }
        let params: Value = if params_json.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(params_json)
                .map_err(|e| JsValue::from_str(&format!("invalid params: {e}")))?
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let presenter = CanvasPresenter::new(canvas, None)?;
        let name = scene.to_string();
        let mut inner = Background::new(
            Rc::new(BrowserDisplay::new(window.clone())),
            move |width, height| SceneKind::from_name(&name, width, height, u64::from(seed), &params),
            presenter,
        );
        if !inner.mount(Rc::new(WindowContainer::new(window))) {
            log::debug!("background for '{scene}' left idle");
        }
        Ok(Self { inner })
    }

    /// Stops the animation and the resize listener. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.inner.unmount();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    /// Names accepted by the constructor.
    #[wasm_bindgen(js_name = sceneNames)]
    pub fn scene_names() -> Vec<String> {
        SceneKind::list_scenes().iter().map(|s| s.to_string()).collect()
    }
}
