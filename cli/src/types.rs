/// Product attributes supplied by the user for one generation attempt.
///
/// The first three fields are required; `unique_selling_proposition` may be
/// left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDetails {
    pub product_name: String,
    pub target_audience: String,
    pub key_features: String,
    pub unique_selling_proposition: String,
}

impl ProductDetails {
    /// True when every required field is non-empty after trimming.
    pub fn has_required_fields(&self) -> bool {
        !self.product_name.trim().is_empty()
            && !self.target_audience.trim().is_empty()
            && !self.key_features.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_details() -> ProductDetails {
        ProductDetails {
            product_name: "AI Headphones".into(),
            target_audience: "remote workers".into(),
            key_features: "noise cancelling; 30h battery".into(),
            unique_selling_proposition: String::new(),
        }
    }

    #[test]
    fn required_fields_ignore_surrounding_whitespace() {
        let mut details = complete_details();
        assert!(details.has_required_fields());

        details.product_name = "   ".into();
        assert!(!details.has_required_fields());
    }

    #[test]
    fn usp_is_optional() {
        let details = complete_details();
        assert!(details.unique_selling_proposition.is_empty());
        assert!(details.has_required_fields());
    }
}
