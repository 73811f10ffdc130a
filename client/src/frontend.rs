#![cfg(feature = "client")]

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;
use tracing::warn;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::Document;
use web_sys::HtmlElement;
use web_sys::HtmlInputElement;
use web_sys::HtmlSelectElement;

use crate::api::client::ViperClient;
use crate::api::client::fetch::FetchTransport;
use crate::config::BackendConfig;
use crate::form::FormInput;
use crate::submit::OutputSink;
use crate::submit::submit;

const RESULTADO: &str = "resultado";

thread_local! {
    static CLIENT: RefCell<Rc<ViperClient<FetchTransport>>> =
        RefCell::new(Rc::new(ViperClient::new(FetchTransport, BackendConfig::default())));
}

#[wasm_bindgen]
pub fn start() {
    use tracing_subscriber_wasm::MakeConsoleWriter;

    tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter::default())
        .without_time()
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .init();
    info!("Starting client");
}

/// Points the page at another backend than `http://127.0.0.1:8000`.
#[wasm_bindgen]
pub fn set_backend_url(url: String) {
    info!("Backend URL: {url}");
    let client = ViperClient::new(FetchTransport, BackendConfig::new(url));
    CLIENT.with_borrow_mut(|current| *current = Rc::new(client));
}

/// Submits the form: reads `#numero` and `#modo`, posts the spin, and shows the outcome in `#resultado`.
///
/// Failures are rendered in `#resultado` rather than rejected.
#[wasm_bindgen]
pub async fn enviar() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        warn!("No document");
        return;
    };
    let client = CLIENT.with_borrow(Rc::clone);
    let form = DomForm(document.clone());
    let output = DomOutput(document);
    let _ = submit(&form, &client, &output).await;
}

/// Reads fields from `<input>` or `<select>` elements of the same id.
struct DomForm(Document);

impl FormInput for DomForm {
    fn field(&self, name: &'static str) -> Option<String> {
        let element = self.0.get_element_by_id(name)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Some(select.value());
        }
        warn!("#{name} is neither an input nor a select");
        None
    }
}

/// Writes into the `#resultado` element, flagging errors with `data-state="error"`.
struct DomOutput(Document);

impl DomOutput {
    fn show(&self, state: &str, text: &str) {
        let Some(element) = self.0.get_element_by_id(RESULTADO) else {
            warn!("#{RESULTADO} not found");
            return;
        };
        if let Err(error) = element.set_attribute("data-state", state) {
            warn!("Failed to set data-state: {error:?}");
        }
        match element.dyn_ref::<HtmlElement>() {
            Some(element) => element.set_inner_text(text),
            None => element.set_text_content(Some(text)),
        }
    }
}

impl OutputSink for DomOutput {
    fn show_result(&self, text: &str) {
        self.show("ok", text);
    }

    fn show_error(&self, message: &str) {
        self.show("error", message);
    }
}
