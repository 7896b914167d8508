//! LLM prompt for notarization statistics

/// System message sent with every extraction request
pub const SYSTEM_INSTRUCTION: &str = "你是一个只输出 JSON 的专业数据提取助手。";

/// Builds the user prompt for one document page
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for the page text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.text.len() + 512);

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push('\n');

        prompt.push_str("--- 文本内容 ---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n--- 文本结束 ---\n");

        prompt.push_str(OUTPUT_FORMAT);
        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str =
    "请从以下“粤车南下”抽签结果公证书文本中提取关键统计数据。";

const OUTPUT_FORMAT: &str = r#"请提取以下 JSON 格式：
{
  "batch_no": "形如 YCCQPCHxxxxxxx 的完整批次号",
  "draw_date": "抽签日期 YYYY-MM-DD",
  "total_applied": "登记资料有效数",
  "quota_total": "抽签名额总数",
  "total_won": "中签数",
  "total_lost": "未中签数"
}
注意：只返回纯 JSON 内容。"#;
