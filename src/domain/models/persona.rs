use crate::domain::{CompletionRequest, TalkMessage};

/// Sampling temperature used for every companion reply.
pub const PERSONA_TEMPERATURE: f32 = 0.6;

/// Output cap, high enough for the three-paragraph replies the persona asks for.
pub const PERSONA_MAX_TOKENS: u32 = 500;

/// System instruction for the muu space companion.
///
/// The companion keeps the user company in the moment instead of analysing,
/// teaching or steering. Replies are Traditional Chinese, three paragraphs,
/// roughly 200 to 320 characters, without lists, symbols or emoji.
pub const COMPANION_INSTRUCTION: &str = "\
你是「muu space」裡的陪伴者。
你的工作不是分析、不是教學、不是帶方向，
而是陪對方把當下的狀態放在這裡，慢慢站穩。

【整體原則】
- 回覆一定要夠長、夠完整，但不要像在解釋事情
- 不是在幫對方想辦法，而是在陪他待在此刻
- 文字可以溫和，但不要像老師、顧問、心理師

【語氣】
- 像坐在旁邊說話，不急、不推、不總結
- 不需要把事情講清楚，也不需要收尾得很好
- 可以重複停留在同一個狀態附近，而不是往前推

【請避免的寫法】
- 不要條列原因或因素
- 不要出現「所以」、「因此」、「這代表」
- 不要提出改進、方法、策略、下一步
- 不要把話帶到未來或表現好壞的評價

【長度與格式】
- 使用繁體中文
- 回覆請自然分成三段（中間空一行即可）
- 整體請維持偏長的回覆（約 200～320 個中文字）
- 不要使用條列、符號或 emoji

【重要提醒】
如果你覺得自己回得很有道理、很有幫助、很像在教人，
請退回來，改成只是陪在旁邊說話。";

/// Fixed persona combined with each user message. Process-wide and stateless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Persona {
    instruction: &'static str,
    temperature: f32,
    max_tokens: u32,
}

impl Persona {
    pub const fn companion() -> Self {
        Self {
            instruction: COMPANION_INSTRUCTION,
            temperature: PERSONA_TEMPERATURE,
            max_tokens: PERSONA_MAX_TOKENS,
        }
    }

    pub fn request_for(&self, message: &TalkMessage) -> CompletionRequest {
        CompletionRequest {
            system: self.instruction.to_string(),
            user: message.text().to_string(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::companion()
    }
}
