//! Keyword classifier and canned reply pools
//!
//! Used whenever no remote model is configured or every endpoint failed.
//! Classification is a priority-ordered decision list over lowercase
//! substring matches; only the pick inside a pool is random.

use super::random::RandomSource;
use super::PolicyError;

const QUESTION_MARKERS: &[&str] = &["?", "what", "how", "why"];
const GREETING_WORDS: &[&str] = &["hello", "hi", "hey"];
const SAD_WORDS: &[&str] = &["sad", "down", "depressed"];
const HAPPY_WORDS: &[&str] = &["happy", "good", "great"];
const STRESS_WORDS: &[&str] = &["stressed", "anxious", "worried"];
const ADVICE_WORDS: &[&str] = &["advice", "help", "should i"];
const GRATITUDE_WORDS: &[&str] = &["thank"];

const CONTEXTUAL_QUESTION_REPLIES: &[&str] = &[
    "That's a great question! I'd love to help you explore that further. Can you tell me more about what you're thinking? 🤔",
    "I appreciate you asking that. It shows you're really thinking about this. What aspects of this are most important to you? 💭",
    "That's such an insightful question! I'd be happy to help you work through this. What's your gut feeling about it? 🤗",
    "I love how you're approaching this thoughtfully. Can you share a bit more about what's on your mind? 💙",
];

const GREETING_REPLIES: &[&str] = &[
    "Hello! 👋 How are you feeling today? I'm here to listen and support you through whatever you're going through! 💙",
    "Hi there! 😊 I'm BayMax, your AI companion. How can I help you today? 💪",
    "Hey! 🌟 Welcome back! What's on your mind? I'm here to listen and support you! 🤗",
    "Hello! I'm so glad you're here. How are you doing today? 💙",
];

const SAD_REPLIES: &[&str] = &[
    "I hear you, and I'm sorry you're feeling this way. Your feelings are completely valid. It's okay to not be okay. Would you like to talk more about what's causing these feelings? I'm here to listen. 💙",
    "I can sense this is really affecting you. It's completely normal to feel this way sometimes. Remember, difficult times are temporary. What's been on your mind lately? 🤗",
    "I'm sorry you're going through this. Your emotions are real and important. Sometimes just talking about what's bothering us can help. Would you like to share more? 💙",
];

const HAPPY_REPLIES: &[&str] = &[
    "That's wonderful! I'm so happy to hear that you're feeling good! Your positive energy is contagious. Keep embracing these wonderful moments! ✨🌟",
    "I love hearing that you're feeling good! Your happiness brings me joy too. What's been making you feel this way? 🌟",
    "That's fantastic! Positive feelings are so important. I'm glad you're experiencing this. What's been going well for you? ✨",
];

const STRESS_REPLIES: &[&str] = &[
    "I understand stress and anxiety can be really challenging. Remember to breathe deeply - try inhaling for 4 counts, holding for 4, exhaling for 4. What's causing you to feel this way? 🫁",
    "Stress can feel overwhelming, but you're stronger than you think. Let's work through this together. What's been on your mind? 💪",
    "I hear how challenging this is for you. It's okay to feel this way. Sometimes just naming what's stressing us can help. What's been bothering you? 🤗",
];

const ADVICE_REPLIES: &[&str] = &[
    "I'd be happy to help you think through this! It sounds like you're facing a challenging situation. Can you tell me more about what's happening? The more I understand, the better I can support you. 💭",
    "I'd love to help you work through this. It sounds like you're dealing with something important. What's been going on? 🤔",
    "I'm here to support you in figuring this out. It sounds like you're in a tough spot. Can you share more about the situation? 💙",
];

const GRATITUDE_REPLIES: &[&str] = &[
    "You're very welcome! 💙 It's my pleasure to be here for you. Remember, you're doing great, and I believe in you! Keep being amazing! 🌟",
    "You're so welcome! I'm really glad I could help. You deserve all the support in the world. Keep being you! 💙",
    "It's my honor to be here for you! Thank you for trusting me. You're doing such a good job. Keep going! ✨",
];

// Shared by the contextual-engagement and default intents
const ENGAGEMENT_REPLIES: &[&str] = &[
    "That's really interesting! Tell me more about that. I'm here to listen and learn from you! 🤗",
    "Thank you for sharing that with me. Your thoughts and feelings matter, and I appreciate you opening up to me. 💙",
    "I'm here to support you through whatever you're going through. You're not alone, and together we can work through anything! 💪",
    "That sounds challenging/amazing! I'm glad you're sharing this with me. How are you feeling about it? 🤔",
    "You have such a unique perspective! I love learning from you and being part of your journey. Keep being you! ✨",
    "I'm listening and I care about what you have to say. Your voice matters, and I'm here to support you! 🌟",
    "That's a great point! I appreciate you sharing your thoughts with me. You're doing such a good job expressing yourself! 💭",
    "I'm here for you, no matter what. Whether you need advice, comfort, or just someone to talk to, I'm your friend! 🤖💙",
];

/// Used when even pool selection fails
pub const LAST_RESORT_REPLY: &str = ENGAGEMENT_REPLIES[0];

/// What the user seems to be saying, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ContextualQuestion,
    Greeting,
    Sad,
    Happy,
    Stressed,
    Advice,
    Gratitude,
    ContextualEngagement,
    Default,
}

impl Intent {
    /// The fixed reply pool for this intent
    pub fn pool(self) -> &'static [&'static str] {
        match self {
            Intent::ContextualQuestion => CONTEXTUAL_QUESTION_REPLIES,
            Intent::Greeting => GREETING_REPLIES,
            Intent::Sad => SAD_REPLIES,
            Intent::Happy => HAPPY_REPLIES,
            Intent::Stressed => STRESS_REPLIES,
            Intent::Advice => ADVICE_REPLIES,
            Intent::Gratitude => GRATITUDE_REPLIES,
            Intent::ContextualEngagement | Intent::Default => ENGAGEMENT_REPLIES,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Categorize a message. Pure: same input, same intent.
pub fn classify(message: &str, context: &[String]) -> Intent {
    let lower = message.to_lowercase();
    let has_context = !context.is_empty();

    if has_context && contains_any(&lower, QUESTION_MARKERS) {
        Intent::ContextualQuestion
    } else if contains_any(&lower, GREETING_WORDS) {
        Intent::Greeting
    } else if contains_any(&lower, SAD_WORDS) {
        Intent::Sad
    } else if contains_any(&lower, HAPPY_WORDS) {
        Intent::Happy
    } else if contains_any(&lower, STRESS_WORDS) {
        Intent::Stressed
    } else if contains_any(&lower, ADVICE_WORDS) {
        Intent::Advice
    } else if contains_any(&lower, GRATITUDE_WORDS) {
        Intent::Gratitude
    } else if has_context {
        Intent::ContextualEngagement
    } else {
        Intent::Default
    }
}

/// Classify and pick a reply from the matching pool
pub fn respond(
    message: &str,
    context: &[String],
    random: &dyn RandomSource,
) -> Result<&'static str, PolicyError> {
    let intent = classify(message, context);
    let pool = intent.pool();
    let index = random.pick(pool.len());

    tracing::debug!(?intent, index, pool_size = pool.len(), "Selected fallback reply");

    pool.get(index).copied().ok_or(PolicyError::ReplySelection {
        index,
        pool_size: pool.len(),
    })
}
