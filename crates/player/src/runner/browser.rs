//! Browser runner
//!
//! Binds the page services to the live document: approve buttons, the
//! sign-in form, the logout confirmation, and the poller.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, PageTransitionEvent};

use clearance_domain::{PageContext, PageKind};

use crate::application::services::{LoginService, LogoutService, PageController, PollerHandle};
use crate::config::PlayerConfig;
use crate::infrastructure::page::DomPage;
use crate::infrastructure::platform::{
    current_path, WasmNavigator, WasmSleepProvider, WasmStorageProvider,
};
use crate::ports::outbound::PageSurface;

type BrowserController = PageController<WasmStorageProvider, DomPage, WasmSleepProvider>;

/// Run once the document has been parsed
pub fn run_browser(config: PlayerConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        tracing::error!("No document available");
        return;
    };

    if document.ready_state() == "loading" {
        let callback = Closure::<dyn FnMut(_)>::new(move |_: Event| start(&config));
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
        {
            tracing::error!("Failed to wait for DOMContentLoaded: {:?}", e);
        }
        callback.forget();
    } else {
        start(&config);
    }
}

fn start(config: &PlayerConfig) {
    let Some(page) = DomPage::current() else {
        tracing::error!("No document available");
        return;
    };
    let context = PageContext::from_location(&current_path(), page.has_login_form());

    if context.kind == PageKind::Login {
        bind_login(&context, &page, config);
    }
    bind_logout(&page);

    let controller = PageController::new(
        context,
        WasmStorageProvider,
        page.clone(),
        WasmSleepProvider,
        config.poll_interval_ms,
    );
    let poller = controller.start();
    bind_approve_buttons(&controller, &page);

    let (handle, poll) = poller.start();
    wasm_bindgen_futures::spawn_local(poll);
    stop_on_pagehide(handle);
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::<dyn FnMut(_)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        tracing::error!("Failed to bind {} listener: {:?}", event, e);
    }
    // Listeners live as long as the page.
    callback.forget();
}

fn bind_approve_buttons(controller: &BrowserController, page: &DomPage) {
    for (index, button) in page.query_all(".approveBtn").iter().enumerate() {
        let tracker = controller.tracker().clone();
        listen(button, "click", move |_| {
            let outcome = tracker.approve(index);
            tracing::debug!(index, ?outcome, "Approve clicked");
        });
    }
}

fn bind_login(context: &PageContext, page: &DomPage, config: &PlayerConfig) {
    if context.role.is_none() {
        tracing::error!("Role could not be detected from page name");
        return;
    }
    let Some(form) = page.document().get_element_by_id("loginForm") else {
        return;
    };

    let service = Rc::new(LoginService::new(
        context.role,
        page.clone(),
        WasmSleepProvider,
        WasmNavigator,
        config.login,
    ));
    let document = page.document().clone();

    listen(&form, "submit", move |event| {
        event.prevent_default();
        let email = input_value(&document, "email");
        let password = input_value(&document, "password");

        let service = Rc::clone(&service);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = service.sign_in(&email, &password).await {
                match e.user_message() {
                    Some(message) => alert(&message),
                    None => tracing::error!("Sign-in failed: {}", e),
                }
            }
        });
    });
}

fn bind_logout(page: &DomPage) {
    let document = page.document();
    let (Some(link), Some(confirm)) = (
        document.get_element_by_id("logoutLink"),
        document.get_element_by_id("confirmLogout"),
    ) else {
        return;
    };

    let modal = document.get_element_by_id("logoutModal");
    listen(&link, "click", move |event| {
        event.prevent_default();
        if let Some(modal) = &modal {
            if let Err(e) = show_modal(modal) {
                tracing::error!("Failed to show logout dialog: {:?}", e);
            }
        }
    });

    let href = link.get_attribute("href").unwrap_or_default();
    let service = LogoutService::new(WasmNavigator);
    listen(&confirm, "click", move |_| service.confirm(&href));
}

fn stop_on_pagehide(handle: PollerHandle) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let handle = RefCell::new(handle);
    let callback = Closure::<dyn FnMut(_)>::new(move |event: Event| {
        let persisted = event
            .dyn_ref::<PageTransitionEvent>()
            .is_some_and(PageTransitionEvent::persisted);
        handle.borrow_mut().page_hidden(persisted);
    });
    if let Err(e) =
        window.add_event_listener_with_callback("pagehide", callback.as_ref().unchecked_ref())
    {
        tracing::error!("Failed to bind pagehide listener: {:?}", e);
    }
    callback.forget();
}

fn input_value(document: &web_sys::Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            tracing::error!("Failed to show alert: {:?}", e);
        }
    }
}

/// `new bootstrap.Modal(element).show()`
fn show_modal(element: &Element) -> Result<(), JsValue> {
    let bootstrap = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap"))?;
    let modal_class: js_sys::Function =
        js_sys::Reflect::get(&bootstrap, &JsValue::from_str("Modal"))?.dyn_into()?;
    let modal = js_sys::Reflect::construct(&modal_class, &js_sys::Array::of1(element))?;
    let show: js_sys::Function = js_sys::Reflect::get(&modal, &JsValue::from_str("show"))?.dyn_into()?;
    show.call0(&modal)?;
    Ok(())
}
