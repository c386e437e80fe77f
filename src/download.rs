//! Browser download of generated files.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use vote_store::export::ExportError;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Offer `bytes` to the user as a file named `file_name`
pub fn offer_download(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), ExportError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Download("no document".into()))?;
    let body = document
        .body()
        .ok_or_else(|| ExportError::Download("no body".into()))?;

    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(dom_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(dom_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(dom_error)?
        .dyn_into()
        .map_err(|_| ExportError::Download("not an anchor".into()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    body.append_child(&anchor).map_err(dom_error)?;
    anchor.click();
    let removed = body.remove_child(&anchor).map(|_| ()).map_err(dom_error);
    Url::revoke_object_url(&url).map_err(dom_error)?;
    removed
}

fn dom_error(value: JsValue) -> ExportError {
    ExportError::Download(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
