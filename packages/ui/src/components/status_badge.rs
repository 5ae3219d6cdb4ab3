//! Status badge.

use dioxus::prelude::*;

/// CSS class and label for a status string.
pub fn badge_style(status: &str) -> (&'static str, String) {
    let class = match status {
        "active" | "resolved" | "present" => "badge-success",
        "pending" | "in-progress" | "late" | "medium" => "badge-warning",
        "suspended" | "absent" | "urgent" | "high" => "badge-danger",
        "inactive" | "excused" | "low" => "badge-muted",
        "open" => "badge-info",
        _ => "badge-default",
    };
    (class, title_case(status))
}

/// `in-progress` becomes `In Progress`.
pub fn title_case(value: &str) -> String {
    value
        .split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn StatusBadge(status: String) -> Element {
    let (class, text) = badge_style(&status);

    rsx! {
        span {
            class: "status-badge {class}",
            {text}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_classes() {
        assert_eq!(badge_style("active"), ("badge-success", "Active".to_string()));
        assert_eq!(badge_style("in-progress"), ("badge-warning", "In Progress".to_string()));
        assert_eq!(badge_style("feature_request").1, "Feature Request");
        assert_eq!(badge_style("whatever").0, "badge-default");
    }
}
