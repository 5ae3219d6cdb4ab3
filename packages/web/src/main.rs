// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

use dioxus::prelude::*;

use ui::{
    AuditLogsPage, BranchesPage, DashboardPage, PlansPage, SchoolsPage, TeacherPage, TermsPage, TicketsPage,
    ToastViewport, UsersPage, use_toast_provider,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AdminLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/schools")]
        Schools {},
        #[route("/branches")]
        Branches {},
        #[route("/users")]
        Users {},
        #[route("/plans")]
        Plans {},
        #[route("/audit-logs")]
        AuditLogs {},
        #[route("/tickets")]
        Tickets {},
        #[route("/terms")]
        Terms {},
        #[route("/teacher")]
        Teacher {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const ADMIN_CSS: Asset = asset!("/assets/admin.css");

fn main() {
    #[cfg(feature = "server")]
    {
        use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,services=debug")))
            .with(tracing_subscriber::fmt::layer())
            .init();
        tracing::info!("starting school admin console");
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_toast_provider();

    rsx! {
        document::Title { "School Admin" }
        document::Link { rel: "stylesheet", href: ADMIN_CSS }

        Router::<Route> {}
        ToastViewport {}
    }
}

/// Sidebar navigation around every admin screen.
#[component]
fn AdminLayout() -> Element {
    rsx! {
        div { class: "admin-layout",
            aside { class: "admin-sidebar",
                div { class: "sidebar-header",
                    h1 { class: "sidebar-logo", "School Admin" }
                }
                nav { class: "sidebar-nav",
                    div { class: "nav-section",
                        span { class: "nav-section-title", "Platform" }
                        NavLink { to: Route::Dashboard {}, icon: "▦", label: "Dashboard" }
                        NavLink { to: Route::Schools {}, icon: "🏫", label: "Schools" }
                        NavLink { to: Route::Branches {}, icon: "⌂", label: "Branches" }
                        NavLink { to: Route::Users {}, icon: "☺", label: "Users" }
                        NavLink { to: Route::Plans {}, icon: "$", label: "Plans" }
                        NavLink { to: Route::AuditLogs {}, icon: "☰", label: "Audit Logs" }
                    }
                    div { class: "nav-section",
                        span { class: "nav-section-title", "Support" }
                        NavLink { to: Route::Tickets {}, icon: "✉", label: "Tickets" }
                    }
                    div { class: "nav-section",
                        span { class: "nav-section-title", "School" }
                        NavLink { to: Route::Terms {}, icon: "◷", label: "Terms" }
                        NavLink { to: Route::Teacher {}, icon: "✎", label: "Teacher" }
                    }
                }
            }

            main { class: "admin-main",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn NavLink(to: Route, icon: String, label: String) -> Element {
    rsx! {
        Link { to, class: "nav-link", active_class: "active",
            span { class: "nav-icon", "aria-hidden": "true", "{icon}" }
            span { "{label}" }
        }
    }
}

#[component]
fn Dashboard() -> Element {
    rsx! { DashboardPage {} }
}

#[component]
fn Schools() -> Element {
    rsx! { SchoolsPage {} }
}

#[component]
fn Branches() -> Element {
    rsx! { BranchesPage {} }
}

#[component]
fn Users() -> Element {
    rsx! { UsersPage {} }
}

#[component]
fn Plans() -> Element {
    rsx! { PlansPage {} }
}

#[component]
fn AuditLogs() -> Element {
    rsx! { AuditLogsPage {} }
}

#[component]
fn Tickets() -> Element {
    rsx! { TicketsPage {} }
}

#[component]
fn Terms() -> Element {
    rsx! { TermsPage {} }
}

#[component]
fn Teacher() -> Element {
    rsx! { TeacherPage {} }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "not-found",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Dashboard {}, class: "btn btn-primary", "Back to dashboard" }
        }
    }
}
