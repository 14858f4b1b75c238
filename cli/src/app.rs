use crate::session::SessionState;
use crate::types::ProductDetails;
use std::time::{Duration, Instant};

const MAX_STATUS_LINES: usize = 8;
pub const COPIED_INDICATOR_TTL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ProductName,
    TargetAudience,
    KeyFeatures,
    UniqueSellingProposition,
}

pub const FIELD_ORDER: [FormField; 4] = [
    FormField::ProductName,
    FormField::TargetAudience,
    FormField::KeyFeatures,
    FormField::UniqueSellingProposition,
];

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductName => "产品名称",
            Self::TargetAudience => "目标用户",
            Self::KeyFeatures => "核心卖点",
            Self::UniqueSellingProposition => "独特优势 (可选)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::ProductName => "例如：AI智能降噪耳机",
            Self::TargetAudience => "例如：需要专注的上班族、学生",
            Self::KeyFeatures => "例如：99%降噪；30小时续航；佩戴舒适",
            Self::UniqueSellingProposition => "例如：同价位唯一支持空间音频",
        }
    }
}

/// View model behind the terminal form and the script display panel.
#[derive(Debug)]
pub struct AppState {
    pub details: ProductDetails,
    pub focused: FormField,
    pub session: SessionState,
    pub status_lines: Vec<String>,
    copied_at: Option<Instant>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            details: ProductDetails::default(),
            focused: FormField::ProductName,
            session: SessionState::Idle,
            status_lines: Vec::new(),
            copied_at: None,
        }
    }

    pub fn focus_next_field(&mut self) {
        let idx = FIELD_ORDER.iter().position(|field| *field == self.focused).unwrap_or(0);
        self.focused = FIELD_ORDER[(idx + 1) % FIELD_ORDER.len()];
    }

    pub fn focus_prev_field(&mut self) {
        let idx = FIELD_ORDER.iter().position(|field| *field == self.focused).unwrap_or(0);
        let prev = if idx == 0 { FIELD_ORDER.len() - 1 } else { idx - 1 };
        self.focused = FIELD_ORDER[prev];
    }

    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::ProductName => &self.details.product_name,
            FormField::TargetAudience => &self.details.target_audience,
            FormField::KeyFeatures => &self.details.key_features,
            FormField::UniqueSellingProposition => &self.details.unique_selling_proposition,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_value_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_value_mut().pop();
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focused {
            FormField::ProductName => &mut self.details.product_name,
            FormField::TargetAudience => &mut self.details.target_audience,
            FormField::KeyFeatures => &mut self.details.key_features,
            FormField::UniqueSellingProposition => &mut self.details.unique_selling_proposition,
        }
    }

    /// Folds the latest published session state into the view. Leaving the
    /// succeeded state retires the copied indicator along with the script.
    pub fn apply_session_state(&mut self, state: SessionState) {
        if !matches!(state, SessionState::Succeeded { .. }) {
            self.copied_at = None;
        }
        self.session = state;
    }

    pub fn script(&self) -> Option<&str> {
        match &self.session {
            SessionState::Succeeded { script } => Some(script),
            _ => None,
        }
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn copied_indicator_active(&self, now: Instant) -> bool {
        self.copied_at
            .map(|at| now.duration_since(at) < COPIED_INDICATOR_TTL)
            .unwrap_or(false)
    }

    pub fn push_status_line(&mut self, line: String) {
        self.status_lines.push(line);
        if self.status_lines.len() > MAX_STATUS_LINES {
            let overflow = self.status_lines.len() - MAX_STATUS_LINES;
            self.status_lines.drain(0..overflow);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_focus_cycles_in_both_directions() {
        let mut app = AppState::new();
        assert_eq!(app.focused, FormField::ProductName);

        for _ in 0..FIELD_ORDER.len() {
            app.focus_next_field();
        }
        assert_eq!(app.focused, FormField::ProductName);

        app.focus_prev_field();
        assert_eq!(app.focused, FormField::UniqueSellingProposition);
    }

    #[test]
    fn typing_edits_the_focused_field() {
        let mut app = AppState::new();
        app.focus_next_field();
        for c in "上班族".chars() {
            app.push_char(c);
        }
        assert_eq!(app.details.target_audience, "上班族");

        app.pop_char();
        assert_eq!(app.details.target_audience, "上班");
        assert!(app.details.product_name.is_empty());
    }

    #[test]
    fn copied_indicator_expires_after_its_ttl() {
        let mut app = AppState::new();
        app.apply_session_state(SessionState::Succeeded { script: "Script text".into() });
        let t0 = Instant::now();
        app.mark_copied(t0);

        assert!(app.copied_indicator_active(t0 + Duration::from_millis(1999)));
        assert!(!app.copied_indicator_active(t0 + COPIED_INDICATOR_TTL));
    }

    #[test]
    fn leaving_succeeded_state_clears_the_copied_indicator() {
        let mut app = AppState::new();
        app.apply_session_state(SessionState::Succeeded { script: "Script text".into() });
        let now = Instant::now();
        app.mark_copied(now);
        assert!(app.copied_indicator_active(now));

        app.apply_session_state(SessionState::Loading);
        assert!(!app.copied_indicator_active(now));
        assert!(app.script().is_none());
    }

    #[test]
    fn status_lines_are_bounded() {
        let mut app = AppState::new();
        for index in 0..20 {
            app.push_status_line(format!("line {index}"));
        }
        assert_eq!(app.status_lines.len(), MAX_STATUS_LINES);
        assert_eq!(app.status_lines.first().map(String::as_str), Some("line 12"));
    }
}
