//! Labelled form control for every input kind the admin forms use.

use std::sync::atomic::{AtomicUsize, Ordering};

use dioxus::prelude::*;

static NEXT_FIELD_ID: AtomicUsize = AtomicUsize::new(1);

/// Allocate a unique element id, `field-<n>`.
pub fn next_field_id() -> String {
    format!("field-{}", NEXT_FIELD_ID.fetch_add(1, Ordering::Relaxed))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    #[default]
    Text,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Switch,
    Number,
    Date,
    DateTimeLocal,
    Time,
    Email,
}

impl InputKind {
    /// Value of the native `type` attribute for `<input>` based kinds.
    pub fn input_type(self) -> &'static str {
        match self {
            InputKind::Number => "number",
            InputKind::Date => "date",
            InputKind::DateTimeLocal => "datetime-local",
            InputKind::Time => "time",
            InputKind::Email => "email",
            InputKind::Checkbox | InputKind::Switch => "checkbox",
            InputKind::Radio => "radio",
            InputKind::Text | InputKind::Textarea | InputKind::Select => "text",
        }
    }

    /// Checkbox-like kinds put the label after the control.
    pub fn is_toggle(self) -> bool {
        matches!(self, InputKind::Checkbox | InputKind::Switch)
    }
}

/// Ids of the help and error texts tied to a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    pub input: String,
    pub help: String,
    pub error: String,
}

impl FieldIds {
    pub fn new(input: impl Into<String>) -> Self {
        let input = input.into();
        Self {
            help: format!("{input}-help"),
            error: format!("{input}-error"),
            input,
        }
    }

    /// `aria-describedby` value, or `None` when nothing describes the control.
    pub fn described_by(&self, has_help: bool, has_error: bool) -> Option<String> {
        let ids: Vec<&str> = [(has_help, self.help.as_str()), (has_error, self.error.as_str())]
            .into_iter()
            .filter_map(|(present, id)| present.then_some(id))
            .collect();
        (!ids.is_empty()).then(|| ids.join(" "))
    }
}

/// Props for FormField component.
#[derive(Props, Clone, PartialEq)]
pub struct FormFieldProps {
    pub label: String,
    /// Element id; generated when absent.
    #[props(default)]
    pub id: Option<String>,
    #[props(default)]
    pub name: Option<String>,
    #[props(default)]
    pub kind: InputKind,
    #[props(default)]
    pub value: String,
    /// State of checkbox and switch controls.
    #[props(default = false)]
    pub checked: bool,
    /// `(value, label)` pairs for select and radio controls.
    #[props(default)]
    pub options: Vec<(String, String)>,
    #[props(default)]
    pub placeholder: Option<String>,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub multiple: bool,
    #[props(default)]
    pub help: Option<String>,
    #[props(default)]
    pub error: Option<String>,
    #[props(default)]
    pub min: Option<String>,
    #[props(default)]
    pub max: Option<String>,
    #[props(default)]
    pub step: Option<String>,
    #[props(default = 3)]
    pub rows: u32,
    /// Caller-built `<option>` elements for a select, rendered before `options`.
    #[props(default)]
    pub children: Option<Element>,
    /// New value; `"true"`/`"false"` for checkbox and switch controls.
    pub on_change: EventHandler<String>,
}

/// A single labelled form control with help and error text.
#[component]
pub fn FormField(props: FormFieldProps) -> Element {
    let auto_id = use_hook(next_field_id);
    let ids = FieldIds::new(props.id.clone().unwrap_or(auto_id));
    let described_by = ids.described_by(props.help.is_some(), props.error.is_some());
    let invalid = if props.error.is_some() { "true" } else { "false" };
    let name = props.name.clone().unwrap_or_else(|| ids.input.clone());
    let on_change = props.on_change;
    let kind = props.kind;

    let placeholder_option = !(props.required && props.multiple) && props.children.is_none();

    let control = match kind {
        InputKind::Textarea => rsx! {
            textarea {
                id: "{ids.input}",
                name: "{name}",
                rows: "{props.rows}",
                value: "{props.value}",
                placeholder: props.placeholder.clone(),
                required: props.required,
                disabled: props.disabled,
                "aria-invalid": invalid,
                "aria-describedby": described_by.clone(),
                oninput: move |e| on_change.call(e.value()),
            }
        },
        InputKind::Select => rsx! {
            select {
                id: "{ids.input}",
                name: "{name}",
                value: "{props.value}",
                required: props.required,
                disabled: props.disabled,
                multiple: props.multiple,
                "aria-invalid": invalid,
                "aria-describedby": described_by.clone(),
                onchange: move |e| on_change.call(e.value()),
                if placeholder_option {
                    option { value: "", disabled: props.required,
                        {props.placeholder.clone().unwrap_or_else(|| "Select...".to_string())}
                    }
                }
                if let Some(extra) = props.children.clone() {
                    {extra}
                }
                for (value, label) in props.options.iter() {
                    option {
                        key: "{value}",
                        value: "{value}",
                        selected: *value == props.value,
                        "{label}"
                    }
                }
            }
        },
        InputKind::Radio => rsx! {
            div {
                class: "radio-group",
                role: "radiogroup",
                "aria-invalid": invalid,
                "aria-describedby": described_by.clone(),
                for (i, (value, label)) in props.options.iter().enumerate() {
                    {
                        let option_id = format!("{}-{}", ids.input, i);
                        let picked = value.clone();
                        rsx! {
                            label { key: "{value}", class: "radio-option", r#for: "{option_id}",
                                input {
                                    id: "{option_id}",
                                    r#type: "radio",
                                    name: "{name}",
                                    value: "{value}",
                                    checked: *value == props.value,
                                    disabled: props.disabled,
                                    onchange: move |_| on_change.call(picked.clone()),
                                }
                                span { "{label}" }
                            }
                        }
                    }
                }
            }
        },
        InputKind::Checkbox | InputKind::Switch => rsx! {
            input {
                id: "{ids.input}",
                name: "{name}",
                r#type: "checkbox",
                class: if kind == InputKind::Switch { "switch" } else { "checkbox" },
                role: if kind == InputKind::Switch { "switch" } else { "checkbox" },
                checked: props.checked,
                required: props.required,
                disabled: props.disabled,
                "aria-invalid": invalid,
                "aria-describedby": described_by.clone(),
                onchange: move |e| on_change.call(e.checked().to_string()),
            }
        },
        _ => rsx! {
            input {
                id: "{ids.input}",
                name: "{name}",
                r#type: kind.input_type(),
                value: "{props.value}",
                placeholder: props.placeholder.clone(),
                required: props.required,
                disabled: props.disabled,
                min: props.min.clone(),
                max: props.max.clone(),
                step: props.step.clone(),
                "aria-invalid": invalid,
                "aria-describedby": described_by.clone(),
                oninput: move |e| on_change.call(e.value()),
            }
        },
    };

    rsx! {
        div { class: if props.error.is_some() { "form-group has-error" } else { "form-group" },
            if kind.is_toggle() {
                label { class: "toggle-label", r#for: "{ids.input}",
                    {control}
                    span { "{props.label}" }
                    if props.required {
                        span { class: "required-marker", "aria-hidden": "true", "*" }
                    }
                }
            } else {
                label { r#for: "{ids.input}",
                    "{props.label}"
                    if props.required {
                        span { class: "required-marker", "aria-hidden": "true", "*" }
                    }
                }
                {control}
            }
            if let Some(help) = props.help.clone() {
                p { id: "{ids.help}", class: "form-help", "{help}" }
            }
            if let Some(error) = props.error.clone() {
                p { id: "{ids.error}", class: "form-error", role: "alert", "{error}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = next_field_id();
        let b = next_field_id();
        assert!(a.starts_with("field-"));
        assert_ne!(a, b);
    }

    #[test]
    fn described_by_lists_present_texts() {
        let ids = FieldIds::new("school-name");
        assert_eq!(ids.help, "school-name-help");
        assert_eq!(ids.error, "school-name-error");
        assert_eq!(ids.described_by(false, false), None);
        assert_eq!(ids.described_by(true, false).as_deref(), Some("school-name-help"));
        assert_eq!(
            ids.described_by(true, true).as_deref(),
            Some("school-name-help school-name-error")
        );
    }

    #[test]
    fn input_types() {
        assert_eq!(InputKind::default(), InputKind::Text);
        assert_eq!(InputKind::DateTimeLocal.input_type(), "datetime-local");
        assert_eq!(InputKind::Switch.input_type(), "checkbox");
        assert!(InputKind::Switch.is_toggle());
        assert!(!InputKind::Select.is_toggle());
    }
}
