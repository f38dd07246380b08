pub const MESSAGE_TEMPLATES: [&str; 5] = [
    "Every moment with you feels like a beautiful dream I never want to wake up from. 💕",
    "You're the reason my heart beats a little faster and my smile shines a little brighter. ✨",
    "In a world full of billions, my heart chose you. Will you be my forever? 💖",
    "They say love is a journey, and I want every step of mine to be with you. 🌹",
    "You're not just my Valentine, you're my every day. Be mine? 💘",
];

/// Looks up a template by its 1-based position, as listed to users.
pub fn message_template(position: usize) -> Option<&'static str> {
    position
        .checked_sub(1)
        .and_then(|index| MESSAGE_TEMPLATES.get(index))
        .copied()
}
