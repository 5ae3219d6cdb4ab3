//! Toast notifications shared through context.

use dioxus::prelude::*;

/// How long a toast stays on screen.
pub const TOAST_TIMEOUT_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Handle to the toast stack.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    items: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        let mut items = self.items;
        items.write().retain(|t| t.id != id);
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut items = self.items;
        let mut next_id = self.next_id;
        let id = next_id();
        next_id.set(id + 1);
        items.write().push(Toast { id, kind, message });

        let toasts = *self;
        spawn(async move {
            sleep_ms(TOAST_TIMEOUT_MS).await;
            toasts.dismiss(id);
        });
    }
}

async fn sleep_ms(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
    }
}

/// Install the toast stack for the subtree. Call once near the root.
pub fn use_toast_provider() -> Toasts {
    use_context_provider(|| Toasts {
        items: Signal::new(Vec::new()),
        next_id: Signal::new(1),
    })
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

/// Renders the toast stack.
#[component]
pub fn ToastViewport() -> Element {
    let toasts = use_toasts();
    let items = toasts.items;

    rsx! {
        div { class: "toast-viewport", "aria-live": "polite",
            for toast in items.read().iter().cloned() {
                div { key: "{toast.id}", class: toast.kind.class(), role: "status",
                    span { class: "toast-message", "{toast.message}" }
                    button {
                        class: "toast-close",
                        "aria-label": "Dismiss",
                        onclick: move |_| toasts.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
