//! Region selection overlay
//!
//! Shown while the window is fullscreen and translucent. The user drags
//! out a rectangle; releasing the mouse hands the region to the capture
//! pipeline, Escape backs out.

use crate::app::AppState;
use crate::types::Region;
use dioxus::desktop::use_window;
use dioxus::prelude::*;

/// Drags smaller than this many logical pixels are treated as a stray
/// click rather than a selection.
const MIN_SELECTION: u32 = 4;

#[component]
pub fn SelectionOverlay() -> Element {
    let state = use_context::<AppState>();
    let desktop = use_window();

    let mut drag_start = use_signal(|| None::<(f64, f64)>);
    let mut drag_now = use_signal(|| (0.0_f64, 0.0_f64));

    let handle_keydown = {
        let state = state.clone();
        let desktop = desktop.clone();
        move |evt: KeyboardEvent| {
            if evt.key() == Key::Escape {
                state.cancel_capture(&desktop);
            }
        }
    };

    let handle_mousedown = move |evt: MouseEvent| {
        let point = evt.client_coordinates();
        drag_start.set(Some((point.x, point.y)));
        drag_now.set((point.x, point.y));
    };

    let handle_mousemove = move |evt: MouseEvent| {
        if drag_start.peek().is_some() {
            let point = evt.client_coordinates();
            drag_now.set((point.x, point.y));
        }
    };

    let handle_mouseup = {
        let state = state.clone();
        let desktop = desktop.clone();
        move |evt: MouseEvent| {
            let Some((sx, sy)) = *drag_start.peek() else {
                return;
            };

            let end = evt.client_coordinates();
            drag_start.set(None);

            let selection = Region::from_corners(sx, sy, end.x, end.y);
            if selection.width < MIN_SELECTION || selection.height < MIN_SELECTION {
                state.cancel_capture(&desktop);
                return;
            }

            // The drag is in logical window coordinates; the screenshot
            // backend wants physical pixels on the whole desktop.
            let scale = desktop.window.scale_factor();
            let origin = desktop
                .window
                .inner_position()
                .map(|p| (p.x, p.y))
                .unwrap_or((0, 0));
            let region = selection.scale(scale).translate(origin.0, origin.1);

            tracing::debug!("Selected region {:?}", region);
            state.finish_capture(&desktop, region);
        }
    };

    // Pre-compute the rectangle geometry to avoid type inference issues in rsx!
    let start = *drag_start.read();
    let (nx, ny) = *drag_now.read();
    let is_dragging = start.is_some();

    let (rect_style, size_label) = if let Some((sx, sy)) = start {
        let left = sx.min(nx);
        let top = sy.min(ny);
        let width = (sx - nx).abs();
        let height = (sy - ny).abs();
        (
            format!("left: {left:.0}px; top: {top:.0}px; width: {width:.0}px; height: {height:.0}px;"),
            format!("{width:.0} x {height:.0}"),
        )
    } else {
        (String::new(), String::new())
    };

    rsx! {
        div {
            class: "overlay-root",
            tabindex: "0",
            autofocus: true,
            onkeydown: handle_keydown,
            onmousedown: handle_mousedown,
            onmousemove: handle_mousemove,
            onmouseup: handle_mouseup,

            if !is_dragging {
                div {
                    class: "overlay-hint",
                    "Drag to select the region to recognize. Press Esc to cancel."
                }
            }

            if is_dragging {
                div {
                    class: "selection-rect",
                    style: "{rect_style}",
                    span { class: "selection-size", "{size_label}" }
                }
            }
        }
    }
}
