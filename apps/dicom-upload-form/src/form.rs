//! Upload card mounted into the page
//!
//! Builds the DOM for the card, wires the toggle, picker and submit events,
//! and re-renders from [`FormView`] after every state change.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, EventTarget, HtmlElement, HtmlInputElement};

use crate::console;
use crate::dispatch::dispatch_uploads;
use crate::progress::UploadProgress;
use crate::selection::SelectionMode;
use crate::transport::{BrowserFile, FetchTransport};
use crate::view::{self, FormView};

/// Handle to a mounted upload form
#[wasm_bindgen]
pub struct UploadForm {
    inner: Rc<FormInner>,
}

struct FormInner {
    endpoint: String,
    mode: Cell<SelectionMode>,
    selected: RefCell<Option<String>>,
    progress: RefCell<UploadProgress>,
    elements: Elements,
}

struct Elements {
    toggle: HtmlElement,
    picker_label: HtmlElement,
    file_input: HtmlInputElement,
    folder_input: HtmlInputElement,
    selected: HtmlElement,
    done: HtmlElement,
    progress: HtmlElement,
    progress_fill: HtmlElement,
}

#[wasm_bindgen]
impl UploadForm {
    /// Build the card inside the element with id `root_id`.
    /// Uploads are posted to `endpoint`.
    pub fn mount(root_id: &str, endpoint: &str) -> Result<UploadForm, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id {}", root_id)))?;

        let card = create(&document, "div", "card")?;
        let title = create(&document, "h2", "")?;
        title.set_text_content(Some(view::TITLE));

        let content = create(&document, "div", "grid")?;
        let toggle = create(&document, "button", "toggle")?;
        let picker_label = create(&document, "label", "")?;
        let file_input = create_picker(&document, SelectionMode::Files)?;
        let folder_input = create_picker(&document, SelectionMode::Folder)?;
        folder_input.set_attribute("webkitdirectory", "")?;
        let selected = create(&document, "div", "selected")?;
        let done = create(&document, "div", "done")?;
        content.append_child(&toggle)?;
        content.append_child(&picker_label)?;
        content.append_child(&file_input)?;
        content.append_child(&folder_input)?;
        content.append_child(&selected)?;
        content.append_child(&done)?;

        let footer = create(&document, "div", "footer")?;
        let submit = create(&document, "button", "submit")?;
        submit.set_text_content(Some(view::SUBMIT_LABEL));
        let progress = create(&document, "div", "progress")?;
        let uploading = create(&document, "div", "")?;
        uploading.set_text_content(Some(view::UPLOADING_LABEL));
        let track = create(&document, "div", "progress-track")?;
        let progress_fill = create(&document, "div", "progress-fill")?;
        track.append_child(&progress_fill)?;
        progress.append_child(&uploading)?;
        progress.append_child(&track)?;
        footer.append_child(&submit)?;
        footer.append_child(&progress)?;

        card.append_child(&title)?;
        card.append_child(&content)?;
        card.append_child(&footer)?;
        root.append_child(&card)?;

        let inner = Rc::new(FormInner {
            endpoint: endpoint.to_string(),
            mode: Cell::new(SelectionMode::default()),
            selected: RefCell::new(None),
            progress: RefCell::new(UploadProgress::default()),
            elements: Elements {
                toggle,
                picker_label,
                file_input,
                folder_input,
                selected,
                done,
                progress,
                progress_fill,
            },
        });

        let handler = inner.clone();
        listen(&inner.elements.toggle, "click", move |_| handler.toggle())?;

        for input in [&inner.elements.file_input, &inner.elements.folder_input] {
            let handler = inner.clone();
            let source = input.clone();
            listen(input, "change", move |_| handler.select(&source))?;
        }

        let handler = inner.clone();
        listen(&submit, "click", move |_| submit_uploads(&handler))?;

        inner.render();
        Ok(UploadForm { inner })
    }

    /// Snapshot of the upload progress: `{ total, completed, started, done }`
    pub fn progress(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&*self.inner.progress.borrow())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Active picker: `"files"` or `"folder"`
    pub fn mode(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.mode.get())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl FormInner {
    fn active_input(&self) -> &HtmlInputElement {
        match self.mode.get() {
            SelectionMode::Files => &self.elements.file_input,
            SelectionMode::Folder => &self.elements.folder_input,
        }
    }

    /// Switch pickers; the previous selection is dropped
    fn toggle(&self) {
        self.mode.set(self.mode.get().toggle());
        self.selected.replace(None);
        self.elements.file_input.set_value("");
        self.elements.folder_input.set_value("");
        self.render();
    }

    fn select(&self, input: &HtmlInputElement) {
        self.progress.borrow_mut().reset();
        let count = input.files().map_or(0, |files| files.length());
        if count > 0 {
            self.selected.replace(Some(view::selection_summary(count)));
        }
        self.render();
    }

    fn render(&self) {
        if let Err(e) = self.try_render() {
            console::error(&format!("Failed to render upload form: {:?}", e));
        }
    }

    fn try_render(&self) -> Result<(), JsValue> {
        let mode = self.mode.get();
        let view = FormView::build(mode, self.selected.borrow().as_deref(), &self.progress.borrow());
        let elements = &self.elements;

        elements.toggle.set_text_content(Some(view.toggle_label));
        elements.picker_label.set_text_content(Some(view.picker_label));
        elements.picker_label.set_attribute("for", view.active_input)?;
        elements.file_input.set_hidden(mode != SelectionMode::Files);
        elements.folder_input.set_hidden(mode != SelectionMode::Folder);
        elements.selected.set_text_content(view.selected_text.as_deref());
        elements.done.set_text_content(view.done_text);
        elements.progress.set_hidden(!view.show_progress);
        elements
            .progress_fill
            .style()
            .set_property("width", &view.progress_width)?;
        Ok(())
    }
}

/// Upload every DICOM file of the active picker
fn submit_uploads(inner: &Rc<FormInner>) {
    let Some(list) = inner.active_input().files() else {
        return;
    };
    if list.length() == 0 {
        return;
    }

    let files: Vec<BrowserFile> = (0..list.length())
        .filter_map(|index| list.get(index))
        .map(BrowserFile::new)
        .collect();

    let inner = inner.clone();
    spawn_local(async move {
        let transport = FetchTransport::new(&inner.endpoint);
        let summary =
            dispatch_uploads(files, &transport, &inner.progress, |_| inner.render()).await;
        console::log(&format!(
            "Dispatched {} of {} DICOM files ({} selected, {} failed)",
            summary.dispatched, summary.matched, summary.selected, summary.failed
        ));
    });
}

fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let element: HtmlElement = document.create_element(tag)?.dyn_into()?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

fn create_picker(document: &Document, mode: SelectionMode) -> Result<HtmlInputElement, JsValue> {
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("file");
    input.set_id(mode.input_id());
    input.set_multiple(true);
    Ok(input)
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // The form lives as long as the page
    closure.forget();
    Ok(())
}
