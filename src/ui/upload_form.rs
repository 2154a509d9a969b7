use dioxus::prelude::*;

use crate::state::controller::FormEvent;
use crate::state::form_state::{FlashRegion, FormState, HedVersionChoice, HED_OTHER_OPTION};
use crate::state::i18n::{self, Language};
use crate::state::tag_columns;
use crate::ui::actions::{self, Services};

#[component]
pub fn UploadForm(form: Signal<FormState>, language: Signal<Language>) -> Element {
    let services = use_context::<Services>();
    let snapshot = form.read().clone();
    let lang = *language.read();

    let display_name = if snapshot.display_name.is_empty() {
        i18n::tr(lang, "label.no_file").to_string()
    } else {
        snapshot.display_name.clone()
    };
    let selected_worksheet = snapshot.worksheet_selected.clone().unwrap_or_default();
    let checked_columns = tag_columns::parse_tag_columns(&snapshot.tag_columns).unwrap_or_default();
    let hed_value = snapshot.hed_version.option_value().to_string();
    let schema_name = snapshot
        .hed_other_file
        .as_ref()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| i18n::tr(lang, "label.no_schema").to_string());
    let results_name = snapshot.results_name();
    let has_column_names = snapshot.has_column_names;
    let spreadsheet_section_label = i18n::tr(lang, "section.spreadsheet");
    let choose_spreadsheet_label = i18n::tr(lang, "button.choose_spreadsheet");
    let worksheet_section_label = i18n::tr(lang, "section.worksheet");
    let worksheet_label = i18n::tr(lang, "label.worksheet");
    let columns_section_label = i18n::tr(lang, "section.columns");
    let column_names_hint_label = i18n::tr(lang, "label.column_names_hint");
    let tag_columns_label = i18n::tr(lang, "label.tag_columns");
    let tag_columns_placeholder = i18n::tr(lang, "placeholder.tag_columns");
    let has_column_names_label = i18n::tr(lang, "label.has_column_names");
    let hed_section_label = i18n::tr(lang, "section.hed_version");
    let hed_other_label = i18n::tr(lang, "option.hed_other");
    let choose_schema_label = i18n::tr(lang, "button.choose_schema");
    let check_for_warnings_label = i18n::tr(lang, "label.check_for_warnings");
    let validate_label = i18n::tr(lang, "button.validate");
    let reset_label = i18n::tr(lang, "button.reset");
    let report_name_label = i18n::tr(lang, "label.report_name");
    let check_for_warnings = snapshot.check_for_warnings;

    rsx! {
        // Spreadsheet
        div { class: "form-section", id: "spreadsheet-section",
            h2 { "{spreadsheet_section_label}" }
            div { class: "form-row",
                button {
                    class: "form-btn",
                    id: "spreadsheet-file",
                    onclick: {
                        let services = services.clone();
                        move |_| {
                            let services = services.clone();
                            spawn(async move {
                                if let Some(path) = actions::pick_spreadsheet(lang).await {
                                    actions::dispatch(form, services, FormEvent::FileSelected(path));
                                }
                            });
                        }
                    },
                    "{choose_spreadsheet_label}"
                }
                span { class: "file-name", id: "spreadsheet-display-name", "{display_name}" }
            }
            FlashLine { form, language, region: FlashRegion::Spreadsheet }
        }

        // Worksheet
        if snapshot.worksheet_select_visible {
            div { class: "form-section", id: "worksheet-select",
                h2 { "{worksheet_section_label}" }
                div { class: "form-row",
                    label { r#for: "worksheet-name", "{worksheet_label}" }
                    select {
                        class: "form-select",
                        id: "worksheet-name",
                        value: "{selected_worksheet}",
                        onchange: {
                            let services = services.clone();
                            move |evt: Event<FormData>| {
                                actions::dispatch(form, services.clone(), FormEvent::WorksheetChanged(evt.value()));
                            }
                        },
                        for name in snapshot.worksheet_names.iter() {
                            option {
                                value: "{name}",
                                selected: *name == selected_worksheet,
                                "{name}"
                            }
                        }
                    }
                }
            }
        }

        // Columns
        div { class: "form-section", id: "columns-section",
            h2 { "{columns_section_label}" }
            if snapshot.column_names_visible {
                p { class: "file-name", "{column_names_hint_label}" }
                table { class: "columns-table", id: "columns-names-table",
                    tbody {
                        for (index, name) in snapshot.column_names.iter().enumerate() {
                            tr { key: "{index}",
                                td {
                                    input {
                                        r#type: "checkbox",
                                        id: format!("column-{}-check", index + 1),
                                        checked: checked_columns.contains(&(index + 1)),
                                        onchange: {
                                            let services = services.clone();
                                            move |_| {
                                                actions::dispatch(
                                                    form,
                                                    services.clone(),
                                                    FormEvent::TagColumnToggled(index + 1),
                                                );
                                            }
                                        }
                                    }
                                }
                                td { {(index + 1).to_string()} }
                                td { "{name}" }
                            }
                        }
                    }
                }
            }
            div { class: "form-row",
                label { r#for: "tag-columns", "{tag_columns_label}" }
                input {
                    class: "form-input",
                    id: "tag-columns",
                    placeholder: "{tag_columns_placeholder}",
                    value: "{snapshot.tag_columns}",
                    oninput: {
                        let services = services.clone();
                        move |evt: Event<FormData>| {
                            actions::dispatch(form, services.clone(), FormEvent::TagColumnsEdited(evt.value()));
                        }
                    }
                }
            }
            div { class: "form-row",
                input {
                    r#type: "checkbox",
                    id: "has-column-names",
                    checked: has_column_names,
                    onchange: {
                        let services = services.clone();
                        move |_| {
                            actions::dispatch(
                                form,
                                services.clone(),
                                FormEvent::HasColumnNamesToggled(!has_column_names),
                            );
                        }
                    }
                }
                label { r#for: "has-column-names", "{has_column_names_label}" }
            }
            FlashLine { form, language, region: FlashRegion::TagColumns }
        }

        // HED version
        div { class: "form-section", id: "hed-select",
            h2 { "{hed_section_label}" }
            div { class: "form-row",
                select {
                    class: "form-select",
                    id: "hed-version",
                    value: "{hed_value}",
                    onchange: {
                        let services = services.clone();
                        move |evt: Event<FormData>| {
                            let choice = HedVersionChoice::from_option_value(&evt.value());
                            actions::dispatch(form, services.clone(), FormEvent::HedVersionSelected(choice));
                        }
                    },
                    for version in snapshot.hed_versions.iter() {
                        option {
                            value: "{version}",
                            selected: *version == hed_value,
                            "{version}"
                        }
                    }
                    option {
                        value: HED_OTHER_OPTION,
                        selected: hed_value == HED_OTHER_OPTION,
                        "{hed_other_label}"
                    }
                }
            }
            if snapshot.hed_other_upload_visible {
                div { class: "form-row", id: "hed-other-version",
                    button {
                        class: "form-btn",
                        id: "hed-xml-file",
                        onclick: {
                            let services = services.clone();
                            move |_| {
                                let services = services.clone();
                                spawn(async move {
                                    if let Some(path) = actions::pick_hed_schema(lang).await {
                                        actions::dispatch(form, services, FormEvent::HedSchemaFileSelected(path));
                                    }
                                });
                            }
                        },
                        "{choose_schema_label}"
                    }
                    span { class: "file-name", id: "hed-display-name", "{schema_name}" }
                }
            }
            FlashLine { form, language, region: FlashRegion::HedSelect }
        }

        // Submit
        div { class: "form-section", id: "submit-section",
            div { class: "form-row",
                input {
                    r#type: "checkbox",
                    id: "check-for-warnings",
                    checked: check_for_warnings,
                    onchange: {
                        let services = services.clone();
                        move |_| {
                            actions::dispatch(
                                form,
                                services.clone(),
                                FormEvent::CheckForWarningsToggled(!check_for_warnings),
                            );
                        }
                    }
                }
                label { r#for: "check-for-warnings", "{check_for_warnings_label}" }
            }
            div { class: "form-row",
                button {
                    class: "form-btn form-btn-primary",
                    id: "spreadsheet-validation-submit",
                    disabled: snapshot.submission_pending,
                    onclick: {
                        let services = services.clone();
                        move |_| {
                            actions::dispatch(form, services.clone(), FormEvent::SubmitClicked);
                        }
                    },
                    "{validate_label}"
                }
                button {
                    class: "form-btn",
                    id: "spreadsheet-reset",
                    onclick: {
                        let services = services.clone();
                        move |_| {
                            actions::dispatch(form, services.clone(), FormEvent::FormReset);
                        }
                    },
                    "{reset_label}"
                }
                if let Some(name) = results_name {
                    span { class: "file-name", id: "results-name",
                        "{report_name_label}: {name}"
                    }
                }
            }
            FlashLine { form, language, region: FlashRegion::Submit }
        }
    }
}

#[component]
fn FlashLine(form: Signal<FormState>, language: Signal<Language>, region: FlashRegion) -> Element {
    let (text, category_class) = match form.read().flash(region) {
        Some(flash) => (
            i18n::flash_text(*language.read(), flash),
            flash.category.css_class(),
        ),
        None => (String::new(), ""),
    };

    rsx! {
        div { class: "flash {category_class}", id: region.id(), "{text}" }
    }
}
