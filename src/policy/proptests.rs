//! Property-based tests for fallback classification
//!
//! Invariants:
//! - Greetings win whenever there is no history
//! - Gratitude is recognised regardless of history
//! - Question markers only matter once there is history
//! - Unmatched messages land in the default pool
//! - The chosen reply always comes from the classified intent's pool

use super::classifier::{classify, respond, Intent};
use super::random::ThreadRandom;
use super::ResponsePolicy;
use crate::llm::testing::MockTransport;
use crate::llm::{RemoteModelClient, DEFAULT_BASE_URL};
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Strategies
// ============================================================================

/// One of the greeting words with arbitrary casing
fn arb_greeting() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("hello"), Just("hi"), Just("hey")],
        proptest::collection::vec(any::<bool>(), 5),
    )
        .prop_map(|(word, upper)| {
            word.chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
}

/// Text that cannot contain any keyword or question marker
fn arb_neutral_filler() -> impl Strategy<Value = String> {
    "[0-9 .,!]{0,30}"
}

fn arb_context() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z ,.!?]{0,40}", 0..6)
}

fn arb_nonempty_context() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-zA-Z ,.!?]{0,40}", 1..6)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Without history, any message containing a greeting word is a greeting
    #[test]
    fn prop_greeting_without_context(
        prefix in "[a-zA-Z ,.!?]{0,20}",
        greeting in arb_greeting(),
        suffix in "[a-zA-Z ,.!?]{0,20}",
    ) {
        let message = format!("{prefix}{greeting}{suffix}");
        prop_assert_eq!(classify(&message, &[]), Intent::Greeting);
    }

    /// Gratitude with otherwise neutral text, with or without history
    #[test]
    fn prop_gratitude_any_context(
        prefix in arb_neutral_filler(),
        casing in prop_oneof![Just("thank"), Just("Thank"), Just("THANKS")],
        suffix in arb_neutral_filler(),
        context in arb_context(),
    ) {
        let message = format!("{prefix}{casing}{suffix}");
        prop_assert_eq!(classify(&message, &context), Intent::Gratitude);
    }

    /// With history, a question mark beats every keyword
    #[test]
    fn prop_contextual_question_priority(
        before in "[a-zA-Z ,.!]{0,30}",
        after in "[a-zA-Z ,.!]{0,30}",
        context in arb_nonempty_context(),
    ) {
        let message = format!("{before}?{after}");
        prop_assert_eq!(classify(&message, &context), Intent::ContextualQuestion);
    }

    /// Neutral text splits on whether there is history
    #[test]
    fn prop_unmatched_splits_on_context(
        message in arb_neutral_filler(),
        context in arb_context(),
    ) {
        let expected = if context.is_empty() {
            Intent::Default
        } else {
            Intent::ContextualEngagement
        };
        prop_assert_eq!(classify(&message, &context), expected);
    }

    /// Classification is pure and the pick stays inside the intent's pool
    #[test]
    fn prop_reply_comes_from_classified_pool(
        message in "[a-zA-Z0-9 ,.!?']{0,60}",
        context in arb_context(),
    ) {
        let intent = classify(&message, &context);
        prop_assert_eq!(intent, classify(&message, &context));

        let reply = respond(&message, &context, &ThreadRandom);
        prop_assert!(reply.is_ok());
        prop_assert!(intent.pool().contains(&reply.unwrap_or_default()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// End to end through the policy with no key configured
    #[test]
    fn prop_offline_greeting_reply(greeting in arb_greeting(), suffix in arb_neutral_filler()) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let policy = ResponsePolicy::new(
            RemoteModelClient::new(Arc::new(MockTransport::new()), DEFAULT_BASE_URL),
            Arc::new(ThreadRandom),
        );

        let reply = runtime.block_on(policy.get_reply(&format!("{greeting}{suffix}"), &[]));

        prop_assert!(reply.success);
        prop_assert!(Intent::Greeting.pool().contains(&reply.message.as_str()));
    }
}
