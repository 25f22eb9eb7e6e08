//! 固定文案与装饰素材

pub const PROMPT: &str = "Choose wisely... 😼";
pub const DEFAULT_TEASER: &str = "Take your time... or don't 👀";
pub const DEFAULT_DECLINE_LABEL: &str = "❌ NO";
pub const AFFIRM_LABEL: &str = "💖 YES";
pub const RATING_NOTE: &str = "Rate this experience";

pub const AFFIRMATIONS: [&str; 5] = [
    "Yay! I knew it! 😼❤️",
    "Wait, fr?? You're not lying right? 😂",
    "The committee approves! (probably) 😾",
    "Main character energy confirmed! ✌️",
    "For real for real? 🥀",
];

pub const DECLINES: [&str; 6] = [
    "Huh?? Think again 😾",
    "You can't do this to me 😔",
    "But why?? 😭",
    "Blehh... that's harsh 🥀",
    "You're breaking my heart 💔",
    "Wrong button, try the other one 😾",
];

pub const DECLINE_LABELS: [&str; 5] = ["❌ NO", "😾 NO", "🥀 NO", "😭 NO", "😂 NO"];

pub const TEASERS: [&str; 5] = [
    "Someone is watching... 👀",
    "The YES button looks lonely 🤣",
    "Still waiting... 😼",
    "No pressure... 👀",
    "Just choose... it's not that deep 😂",
];

/// `{count}` 会被替换为星星数
pub const RATING_MESSAGES: [&str; 5] = [
    "Only {count}? Huh?? 😾",
    "{count} stars? Blehh... 🥀",
    "{count}? You're harsh 😭",
    "{count} stars? I'll take it! 😼",
    "All {count}! Yesss! ✌️",
];

pub const STAR_COUNT: usize = RATING_MESSAGES.len();

pub const SECRET_MESSAGE: &str = "Alright, secret mode unlocked 😼

I joke a lot, but genuinely, you make things feel easy. Talking to you never feels forced, and that's kinda rare these days.

This whole thing, the jokes, the chaos, is just a dumb little way of saying \"you matter\" ❤️

Okay done before this gets awkward 😂✌️";

pub const HEART_GLYPHS: [&str; 14] = [
    "❤", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "🤎", "💖", "💗", "💓", "💞", "💕",
];

pub const STICKERS: [&str; 4] = ["😻", "🌹", "💌", "🧸"];

/// 按评分下标生成提示文案
pub fn rating_message(index: usize) -> String {
    let index = index.min(STAR_COUNT - 1);
    RATING_MESSAGES[index].replace("{count}", &(index + 1).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_message_substitutes_count() {
        assert_eq!(rating_message(2), "3? You're harsh 😭");
        assert_eq!(rating_message(4), "All 5! Yesss! ✌️");
    }

    #[test]
    fn test_secret_message_has_line_breaks() {
        assert!(SECRET_MESSAGE.contains('\n'));
    }
}
