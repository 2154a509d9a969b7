use dioxus::prelude::*;
use std::path::PathBuf;

use crate::state::controller::FormEvent;
use crate::state::form_state::FormState;
use crate::state::i18n::{self, Language};
use crate::ui::actions::{self, Services};
use crate::ui::upload_form::UploadForm;

const STYLES: Asset = asset!("/assets/styles.css");

/// Spreadsheet preselected at startup, mostly for scripted UI runs.
pub const OPEN_ENV: &str = "HEDSHEET_OPEN";

#[component]
pub fn App() -> Element {
    let services = use_context::<Services>();
    let form = use_signal(FormState::new);
    let mut language = use_signal(|| services.language);

    use_effect({
        let services = services.clone();
        move || {
            actions::dispatch(form, services.clone(), FormEvent::PageLoaded);
            if let Ok(path) = std::env::var(OPEN_ENV) {
                actions::dispatch(form, services.clone(), FormEvent::FileSelected(PathBuf::from(path)));
            }
        }
    });

    let current_language = *language.read();
    let title = i18n::tr(current_language, "app.title");

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "app",
            div { class: "app-header",
                h1 { "{title}" }
                select {
                    class: "form-select",
                    id: "select-language",
                    value: "{current_language.code()}",
                    onchange: move |evt| {
                        if let Some(next_language) = Language::from_code(&evt.value()) {
                            language.set(next_language);
                        }
                    },
                    for lang in Language::all().iter().copied() {
                        option { value: "{lang.code()}", "{i18n::tr(current_language, lang.label_key())}" }
                    }
                }
            }
            UploadForm { form, language }
        }
    }
}
