use crate::{ClassificationResult, ResultView};

/// Category codes the classification service is known to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    UrgentSupport,
    StandardSupport,
    InfoRequest,
    BillingIssue,
    NoActionNeeded,
}

/// Visual treatment of a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    Red,
    Blue,
    Green,
    Amber,
    Gray,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBadge {
    /// `None` when the code fell back to the generic display.
    pub category: Option<Category>,
    pub label: String,
    pub color: ColorClass,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::UrgentSupport,
        Category::StandardSupport,
        Category::InfoRequest,
        Category::BillingIssue,
        Category::NoActionNeeded,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Category::UrgentSupport => "urgent_support",
            Category::StandardSupport => "standard_support",
            Category::InfoRequest => "info_request",
            Category::BillingIssue => "billing_issue",
            Category::NoActionNeeded => "no_action_needed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::UrgentSupport => "Urgent Support",
            Category::StandardSupport => "Standard Support",
            Category::InfoRequest => "Information Request",
            Category::BillingIssue => "Billing Issue",
            Category::NoActionNeeded => "No Action Needed",
        }
    }

    pub fn color(self) -> ColorClass {
        match self {
            Category::UrgentSupport => ColorClass::Red,
            Category::StandardSupport => ColorClass::Blue,
            Category::InfoRequest => ColorClass::Green,
            Category::BillingIssue => ColorClass::Amber,
            Category::NoActionNeeded => ColorClass::Gray,
        }
    }

    /// Case-insensitive lookup of a category code.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.code().eq_ignore_ascii_case(code))
    }
}

/// Map any category code to a badge. Unknown codes echo the raw code as the label.
pub fn category_badge(code: &str) -> CategoryBadge {
    match Category::from_code(code) {
        Some(category) => CategoryBadge {
            category: Some(category),
            label: category.label().to_string(),
            color: category.color(),
        },
        None => {
            let raw = code.trim();
            CategoryBadge {
                category: None,
                label: if raw.is_empty() {
                    "Unknown".to_string()
                } else {
                    raw.to_string()
                },
                color: ColorClass::Neutral,
            }
        }
    }
}

pub fn render_result(result: &ClassificationResult) -> ResultView {
    ResultView {
        badge: category_badge(&result.category),
        reasoning: result.reasoning.clone(),
        suggested_reply: result.suggested_reply.clone(),
    }
}
