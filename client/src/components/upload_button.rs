//! File picker that loads a room photo into the studio.

use leptos::prelude::*;

use crate::state::studio::StudioHandle;

/// Button-styled `<input type="file">` accepting one image.
///
/// Size and type are checked on the file's metadata first; only an accepted
/// file is read and handed to the studio.
#[component]
pub fn UploadButton(#[prop(into)] label: String, #[prop(optional)] compact: bool) -> impl IntoView {
    let handle = expect_context::<StudioHandle>();

    let on_change = {
        #[cfg(feature = "csr")]
        {
            move |ev: leptos::ev::Event| {
                use wasm_bindgen::JsCast;

                let Some(input) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };
                // Clear so picking the same file again still fires `change`.
                input.set_value("");

                if let Err(e) = crate::util::file::check_metadata(file.size(), &file.type_()) {
                    handle.reject_upload(&e);
                    return;
                }
                leptos::task::spawn_local(async move {
                    match crate::util::file::read_image(&file).await {
                        Ok(image) => {
                            if let Err(e) = handle.upload(image) {
                                log::warn!("upload rejected: {e}");
                            }
                        }
                        Err(e) => log::warn!("file read failed: {e}"),
                    }
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = handle;
            move |_ev: leptos::ev::Event| {}
        }
    };

    view! {
        <label class="upload-button" class:upload-button--compact=compact>
            <input class="upload-button__input" type="file" accept="image/*" on:change=on_change/>
            <span class="upload-button__icon">"\u{2191}"</span>
            <span class="upload-button__label">{label}</span>
        </label>
    }
}
