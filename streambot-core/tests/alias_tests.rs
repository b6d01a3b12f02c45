//! Alias behavior end to end: derived formats and help text, the alias's own
//! badge gate, and redirection into the target command.

use streambot_common::traits::AliasRepository;
use streambot_common::{Alias, Badge};
use streambot_core::test_utils::{FakeAlertDispatcher, TestHarness};

async fn seed_aliases(h: &TestHarness) {
    let rows = [
        Alias::new("test_alert", "!alert test_text_1", Badge::Chat),
        Alias::new("chat_test_alias", "!get_count test_count", Badge::Chat),
        Alias::new("sub_test_alias", "!get_count test_count", Badge::Subscriber),
        Alias::new("reset_session", "!reset_count test_count test_count_2", Badge::Broadcaster),
        Alias::new("test_alias_args", "!set_count test_count", Badge::Vip),
        Alias::new("mod_test_alias", "!set_count test_count 10", Badge::Vip),
        Alias::new("broadcaster_test_alias", "!set_count test_count 10", Badge::Broadcaster),
    ];
    for row in rows {
        h.aliases.add(&row).await.unwrap();
    }
}

async fn send(h: &TestHarness, text: &str, badges: &[Badge]) {
    h.service.receive_message("test_user", text, badges).await;
}

#[tokio::test]
async fn get_aliases_filters_by_badge() {
    let h = TestHarness::new();
    seed_aliases(&h).await;

    send(&h, "!get_aliases", &[]).await;
    assert_eq!(
        h.sink.last().await.unwrap(),
        "Commands include: chat_test_alias, test_alert"
    );

    send(&h, "!get_aliases", &[Badge::Subscriber]).await;
    assert_eq!(
        h.sink.last().await.unwrap(),
        "Commands include: chat_test_alias, sub_test_alias, test_alert"
    );

    send(&h, "!get_aliases", &[Badge::Vip]).await;
    assert_eq!(
        h.sink.last().await.unwrap(),
        "Commands include: chat_test_alias, mod_test_alias, sub_test_alias, test_alert, \
         test_alias_args"
    );

    send(&h, "!get_aliases", &[Badge::Broadcaster]).await;
    assert_eq!(
        h.sink.last().await.unwrap(),
        "Commands include: broadcaster_test_alias, chat_test_alias, mod_test_alias, \
         reset_session, sub_test_alias, test_alert, test_alias_args"
    );
}

#[tokio::test]
async fn alias_with_fully_baked_args_runs_the_target() {
    let h = TestHarness::new();
    seed_aliases(&h).await;

    // the alias's own gate is vip; a subscriber is dropped silently
    send(&h, "!mod_test_alias", &[Badge::Subscriber]).await;
    assert!(h.sink.sent().await.is_empty());

    // the target needs vip too, but the redirect bypasses the second gate
    send(&h, "!mod_test_alias", &[Badge::Vip]).await;
    assert_eq!(h.sink.last().await.unwrap(), "test_count: 10");
}

#[tokio::test]
async fn alias_forwards_typed_arguments() {
    let h = TestHarness::new();
    seed_aliases(&h).await;

    send(&h, "!test_alias_args 14", &[Badge::Vip]).await;
    assert_eq!(h.sink.last().await.unwrap(), "test_count: 14");

    // derived help keeps only the unbaked trailing words
    send(&h, "!test_alias_args blah", &[Badge::Vip]).await;
    assert_eq!(h.sink.last().await.unwrap(), "Format: !test_alias_args number");
}

#[tokio::test]
async fn chat_level_alias_reaches_a_gated_alert() {
    let alerts = FakeAlertDispatcher::new()
        .with_alert("test_text_1", "Test Text 1")
        .await;
    let h = TestHarness::with_alerts(alerts);
    seed_aliases(&h).await;

    send(&h, "!test_alert", &[]).await;
    assert_eq!(h.sink.last().await.unwrap(), "/me Test Text 1");

    // immediate repeat from a plain chatter hits the alert cooldown
    send(&h, "!test_alert", &[]).await;
    assert_eq!(
        h.sink.last().await.unwrap(),
        "No spamming test_user. Wait another 15 seconds."
    );
}

#[tokio::test]
async fn alias_colliding_with_a_builtin_is_dropped() {
    let h = TestHarness::new();
    h.aliases
        .add(&Alias::new("echo", "!set_count test_count 10", Badge::Chat))
        .await
        .unwrap();

    // the builtin keeps its name and its broadcaster gate
    send(&h, "!echo hello", &[]).await;
    assert!(h.sink.sent().await.is_empty());
    send(&h, "!echo hello", &[Badge::Broadcaster]).await;
    assert_eq!(h.sink.last().await.unwrap(), "hello");
}

#[tokio::test]
async fn alias_to_an_unknown_command_is_dropped() {
    let h = TestHarness::new();
    h.aliases
        .add(&Alias::new("ghost", "!no_such_command arg", Badge::Chat))
        .await
        .unwrap();

    send(&h, "!ghost", &[]).await;
    assert_eq!(h.sink.last().await.unwrap(), "Unknown command: ghost");
}
