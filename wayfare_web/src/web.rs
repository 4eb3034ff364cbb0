use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget};

use wayfare::menu::{self, MenuEvent, MenuVisibility};

/// Entry point. Defers until the document is parsed so the menu elements
/// exist before lookup, then binds at most once.
pub fn start() {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if doc.ready_state() == "loading" {
        let cb = Closure::wrap(Box::new(move || {
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                bind_menu(&doc);
            }
        }) as Box<dyn FnMut()>);
        let _ = doc
            .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref());
        cb.forget();
    } else {
        bind_menu(&doc);
    }
}

/// Installs the menu behavior. All-or-nothing: a page variant without the
/// mobile menu resolves to no binding and this is a silent no-op.
fn bind_menu(doc: &Document) {
    let binding = menu::resolve_binding(
        doc.get_element_by_id(menu::OPEN_TRIGGER_ID),
        doc.get_element_by_id(menu::MENU_CONTAINER_ID),
        doc.get_element_by_id(menu::CLOSE_TRIGGER_ID),
    );
    let Some(binding) = binding else {
        return;
    };

    on_click(&binding.open_trigger, {
        let container = binding.container.clone();
        move || apply_event(&container, MenuEvent::OpenActivated)
    });

    on_click(&binding.close_trigger, {
        let container = binding.container.clone();
        move || apply_event(&container, MenuEvent::CloseActivated)
    });

    // Links are collected once at bind time; links added later are not
    // covered.
    let Ok(links) = binding.container.query_selector_all("a") else {
        return;
    };
    for i in 0..links.length() {
        let Some(link) = links.item(i) else {
            continue;
        };
        let container = binding.container.clone();
        on_click(&link, move || {
            apply_event(&container, MenuEvent::LinkActivated)
        });
    }
}

/// Reads the current visibility off the class list, applies the transition,
/// and writes the target state back. The write is unconditional, so redundant
/// activations and out-of-band class edits both resolve to last-writer-wins.
fn apply_event(container: &Element, event: MenuEvent) {
    let classes = container.class_list();
    let current = if classes.contains(menu::HIDDEN_CLASS) {
        MenuVisibility::Hidden
    } else {
        MenuVisibility::Visible
    };

    if current.apply(event).is_hidden() {
        let _ = classes.add_1(menu::HIDDEN_CLASS);
    } else {
        let _ = classes.remove_1(menu::HIDDEN_CLASS);
    }
}

fn on_click(target: &EventTarget, handler: impl FnMut() + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    let _ = target.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
    cb.forget();
}
