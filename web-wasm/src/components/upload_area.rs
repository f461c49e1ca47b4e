//! アップロードエリアコンポーネント

use dristi_common::{validate_photo, PhotoFile};
use gloo::file::futures::{read_as_bytes, read_as_data_url};
use leptos::html;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList};

/// 最初の1ファイルだけを対象にする
fn first_file(files: Option<FileList>) -> Option<File> {
    files.and_then(|list| list.get(0))
}

#[component]
pub fn UploadArea<F>(on_file: F) -> impl IntoView
where
    F: Fn(File) + Clone + 'static,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<html::Input>::new();

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(file) = first_file(ev.data_transfer().and_then(|dt| dt.files())) {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |_| {
        let Some(input) = input_ref.get() else {
            return;
        };
        if let Some(file) = first_file(input.files()) {
            on_file(file);
        }
        // 同じファイルを選び直しても changeが発火するように
        input.set_value("");
    };

    view! {
        <div
            class=move || {
                if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                node_ref=input_ref
                type="file"
                accept="image/*"
                style="display: none"
                on:change=on_change
            />
            <div class="upload-icon">"📷"</div>
            <p>"Drag & drop a photo or click to select"</p>
            <p class="text-muted">"JPEG, PNG, GIF, WebP - max 10MB"</p>
        </div>
    }
}

/// ファイルを検証して読み込む（バイト列とプレビュー用Data URL）
///
/// 失敗時はそのまま利用者に見せるメッセージを返す。
pub async fn read_photo(file: File) -> Result<(PhotoFile, String), String> {
    let file = gloo::file::File::from(file);
    let mime_type = file.raw_mime_type();
    validate_photo(&mime_type, file.size()).map_err(|e| e.to_string())?;

    let bytes = read_as_bytes(&file).await.map_err(|e| e.to_string())?;
    let data_url = read_as_data_url(&file).await.map_err(|e| e.to_string())?;

    Ok((
        PhotoFile {
            file_name: file.name(),
            mime_type,
            bytes,
        },
        data_url,
    ))
}
