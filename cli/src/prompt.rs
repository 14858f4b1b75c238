use crate::types::ProductDetails;

/// Renders the instruction sent to the provider for one generation attempt.
///
/// Pure and deterministic. The attribute values are embedded as-is; the
/// surrounding copywriting constraints are fixed content, not inputs to any
/// branching.
pub fn build_prompt(details: &ProductDetails) -> String {
    format!(
        "你是一位顶级的短视频营销专家和爆款文案写手，尤其擅长为产品创作具有病毒式传播潜力的口播稿。\n\
         \n\
         请根据以下产品信息，设计一个15-30秒的短视频爆款口播文案。\n\
         \n\
         产品信息:\n\
         - 产品名称: {product_name}\n\
         - 目标用户: {target_audience}\n\
         - 核心卖点 (每点请用一句话概括): {key_features}\n\
         - 独特优势: {unique_selling_proposition}\n\
         \n\
         文案要求:\n\
         1.  **黄金3秒**: 开头必须极具吸引力，用一个痛点问题或颠覆性的观点瞬间抓住用户注意力。\n\
         2.  **节奏紧凑**: 整体节奏要快，语言要口语化、有冲击力和感染力。\n\
         3.  **价值清晰**: 快速展示产品的核心价值，清晰地告诉用户它能解决什么具体问题或带来什么好处。\n\
         4.  **引导互动**: 最重要的目标是引导用户在评论区留言以获取报价。\n\
         5.  **强力CTA**: 结尾必须包含一个明确、不容置疑的行动号召 (Call to Action)，例如：“想知道怎么把它带回家？评论区打个‘报价’，我一个一个告诉你！” 或 “想要同款的，评论区扣‘666’，我把价格私信你！”\n\
         \n\
         请直接输出最终的口播文案，不需要任何标题、解释或前言。",
        product_name = details.product_name,
        target_audience = details.target_audience,
        key_features = details.key_features,
        unique_selling_proposition = details.unique_selling_proposition,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> ProductDetails {
        ProductDetails {
            product_name: "AI Headphones".into(),
            target_audience: "remote workers".into(),
            key_features: "noise cancelling; 30h battery".into(),
            unique_selling_proposition: "open-ear comfort".into(),
        }
    }

    #[test]
    fn embeds_every_attribute_verbatim() {
        let details = sample_details();
        let prompt = build_prompt(&details);
        assert!(prompt.contains("AI Headphones"));
        assert!(prompt.contains("remote workers"));
        assert!(prompt.contains("noise cancelling; 30h battery"));
        assert!(prompt.contains("open-ear comfort"));
    }

    #[test]
    fn is_deterministic() {
        let details = sample_details();
        assert_eq!(build_prompt(&details), build_prompt(&details));
    }

    #[test]
    fn keeps_usp_section_when_empty() {
        let mut details = sample_details();
        details.unique_selling_proposition.clear();
        let prompt = build_prompt(&details);
        assert!(prompt.contains("- 独特优势:"));
        assert!(prompt.contains("- 产品名称: AI Headphones"));
    }

    #[test]
    fn carries_the_fixed_copywriting_constraints() {
        let prompt = build_prompt(&sample_details());
        for marker in ["黄金3秒", "节奏紧凑", "价值清晰", "引导互动", "强力CTA"] {
            assert!(prompt.contains(marker), "missing constraint {marker}");
        }
    }
}
