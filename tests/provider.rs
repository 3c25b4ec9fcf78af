#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use maxui_toast::viewport::{MemorySurface, StaticHost, SurfaceRef};
use maxui_toast::{
    Appearance, Platform, ToastAction, ToastHandle, ToastId, ToastOptions, ToastProvider,
    use_toast,
};
use tokio::time::sleep;

fn attached_provider() -> (ToastProvider, Arc<MemorySurface>) {
    let body = MemorySurface::new();
    let surface: SurfaceRef = body.clone();
    let provider = ToastProvider::builder()
        .host(StaticHost::new(surface))
        .build();
    (provider, body)
}

fn messages(handle: &ToastHandle) -> Vec<String> {
    handle
        .visible()
        .into_iter()
        .map(|record| record.options.message)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn capacity_evicts_oldest_and_cancels_its_timer() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    let t1 = toasts.show(ToastOptions::new("A"));
    assert_eq!(toasts.visible_ids(), vec![t1.clone()]);

    let t2 = toasts.show(ToastOptions::new("B"));
    let t3 = toasts.show(ToastOptions::new("C"));
    let t4 = toasts.show(ToastOptions::new("D"));

    assert_eq!(toasts.visible_ids(), vec![t2, t3, t4]);
    assert!(!toasts.has_timer(&t1));
    assert_eq!(toasts.pending_timers(), 3);
}

#[tokio::test(start_paused = true)]
async fn survivors_are_the_most_recent_distinct_ids() {
    let provider = ToastProvider::builder().max_visible(2).build();
    let toasts = provider.handle();

    for name in ["a", "b", "c", "d", "e"] {
        toasts.show(ToastOptions::new(name).id(name));
        assert!(toasts.len() <= 2);
    }
    assert_eq!(messages(&toasts), ["d", "e"]);
    assert_eq!(toasts.pending_timers(), 2);
}

#[tokio::test(start_paused = true)]
async fn dismiss_right_after_show_removes_before_any_timer() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    let id = toasts.show(ToastOptions::new("quick"));
    toasts.dismiss(&id);

    assert!(toasts.is_empty());
    assert_eq!(toasts.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn dismiss_is_idempotent() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    let keep = toasts.show(ToastOptions::new("keep"));
    let gone = toasts.show(ToastOptions::new("gone"));
    toasts.dismiss(&gone);
    toasts.dismiss(&gone);
    toasts.dismiss(&ToastId::from("never-shown"));

    assert_eq!(toasts.visible_ids(), vec![keep]);
}

#[tokio::test(start_paused = true)]
async fn default_duration_expires_at_three_seconds() {
    let (provider, surface) = attached_provider();
    let toasts = provider.handle();

    toasts.show(ToastOptions::new("timed"));
    sleep(Duration::from_millis(2_999)).await;
    assert_eq!(toasts.len(), 1);

    sleep(Duration::from_millis(2)).await;
    assert!(toasts.is_empty());
    assert_eq!(toasts.pending_timers(), 0);
    assert!(surface.last_frame().is_empty());
}

#[tokio::test(start_paused = true)]
async fn zero_duration_is_never_auto_dismissed() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    toasts.show(ToastOptions::new("sticky").persistent());
    assert_eq!(toasts.pending_timers(), 0);

    sleep(Duration::from_secs(3_600)).await;
    assert_eq!(messages(&toasts), ["sticky"]);
}

#[tokio::test(start_paused = true)]
async fn zero_default_duration_disables_auto_dismiss() {
    let provider = ToastProvider::builder()
        .default_duration(Duration::ZERO)
        .build();
    let toasts = provider.handle();

    toasts.show(ToastOptions::new("m"));
    let timed = toasts.show(ToastOptions::new("t").duration(Duration::from_millis(500)));
    assert_eq!(toasts.pending_timers(), 1);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(messages(&toasts), ["m"]);
    assert!(!toasts.has_timer(&timed));
}

#[tokio::test(start_paused = true)]
async fn clear_empties_store_and_silences_timers() {
    let (provider, surface) = attached_provider();
    let toasts = provider.handle();

    toasts.show(ToastOptions::new("a"));
    toasts.show(ToastOptions::new("b").duration(Duration::from_millis(10)));
    toasts.clear();

    assert!(toasts.is_empty());
    assert_eq!(toasts.pending_timers(), 0);
    let frames = surface.frames().len();

    sleep(Duration::from_secs(10)).await;
    assert_eq!(surface.frames().len(), frames);
}

#[tokio::test(start_paused = true)]
async fn reshow_by_id_replaces_in_place_with_one_timer() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    toasts.show(ToastOptions::new("before"));
    let x = toasts.show(ToastOptions::new("first").id("x"));
    toasts.show(ToastOptions::new("after"));
    let again = toasts.show(ToastOptions::new("second").id("x"));

    assert_eq!(x, again);
    assert_eq!(messages(&toasts), ["before", "second", "after"]);
    assert!(toasts.has_timer(&x));
    assert_eq!(toasts.pending_timers(), 3);
}

#[tokio::test(start_paused = true)]
async fn reshow_restarts_the_timer() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    let x = toasts.show(ToastOptions::new("first").id("x"));
    sleep(Duration::from_millis(2_000)).await;
    toasts.show(ToastOptions::new("second").id("x"));

    // the first timer would have fired at 3000ms
    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(messages(&toasts), ["second"]);

    sleep(Duration::from_millis(1_501)).await;
    assert!(toasts.is_empty());
    assert!(!toasts.has_timer(&x));
}

#[tokio::test(start_paused = true)]
async fn reshow_as_persistent_cancels_previous_timer() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    let x = toasts.show(ToastOptions::new("loading").id("x"));
    toasts.show(ToastOptions::new("still loading").id("x").persistent());
    assert!(!toasts.has_timer(&x));

    sleep(Duration::from_secs(10)).await;
    assert_eq!(messages(&toasts), ["still loading"]);
}

#[tokio::test(start_paused = true)]
async fn action_without_auto_close_keeps_toast() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();
    let clicks = Arc::new(AtomicUsize::new(0));

    let counted = Arc::clone(&clicks);
    let id = toasts.show(ToastOptions::new("undo?").action(
        ToastAction::new("Undo")
            .auto_close(false)
            .on_click(move || {
                counted.fetch_add(1, Ordering::SeqCst);
            }),
    ));

    toasts.trigger_action(&id);
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
    assert_eq!(toasts.visible_ids(), vec![id.clone()]);
    assert!(toasts.has_timer(&id));

    sleep(Duration::from_millis(3_001)).await;
    assert!(toasts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn action_auto_closes_by_default() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();
    let clicks = Arc::new(AtomicUsize::new(0));

    let counted = Arc::clone(&clicks);
    let id = toasts.show(
        ToastOptions::new("synced").action(ToastAction::new("Open").on_click(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        })),
    );

    toasts.trigger_action(&id);
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
    assert!(toasts.is_empty());
    assert_eq!(toasts.pending_timers(), 0);
}

#[tokio::test(start_paused = true)]
async fn action_callback_may_show_another_toast() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    let follow_up = toasts.clone();
    let id = toasts.show(ToastOptions::new("deleted").action(
        ToastAction::new("Undo").on_click(move || {
            follow_up.show(ToastOptions::new("restored").id("restored"));
        }),
    ));

    toasts.trigger_action(&id);
    assert_eq!(messages(&toasts), ["restored"]);
}

#[tokio::test(start_paused = true)]
async fn rendered_views_drive_the_provider() {
    let (provider, surface) = attached_provider();
    let toasts = provider.handle();

    toasts.show(ToastOptions::new("one").id("one"));
    toasts.show(
        ToastOptions::new("two")
            .id("two")
            .appearance(Appearance::Negative)
            .action(ToastAction::new("Retry")),
    );
    assert_eq!(
        surface.last_frame(),
        ["[neutral] one [⊗]", "[negative] two [Retry] [⊗]"]
    );

    let views = surface.current();
    views[0].close();
    assert_eq!(toasts.visible_ids(), vec![ToastId::from("two")]);

    views[1].activate_action();
    assert!(toasts.is_empty());
    assert!(surface.last_frame().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unmount_cancels_timers_and_detaches() {
    let (provider, surface) = attached_provider();
    let toasts = provider.handle();

    toasts.show(ToastOptions::new("a"));
    toasts.show(ToastOptions::new("b"));
    drop(provider);

    assert!(toasts.is_detached());
    assert!(surface.last_frame().is_empty());
    let frames = surface.frames().len();

    sleep(Duration::from_secs(10)).await;
    assert_eq!(surface.frames().len(), frames);
}

#[tokio::test(start_paused = true)]
async fn detached_handle_accepts_every_call() {
    let toasts = ToastHandle::default();
    let id = toasts.show(ToastOptions::new("nobody listens"));
    assert!(id.is_empty());
    toasts.dismiss(&id);
    toasts.trigger_action(&id);
    toasts.clear();
    assert!(toasts.is_empty());

    let provider = ToastProvider::headless();
    let late = provider.handle();
    drop(provider);
    assert!(late.show(ToastOptions::new("too late")).is_empty());
}

#[tokio::test(start_paused = true)]
async fn headless_provider_still_tracks_state() {
    let provider = ToastProvider::headless();
    assert!(!provider.is_attached());

    let toasts = provider.handle();
    toasts.show(ToastOptions::new("invisible"));
    assert_eq!(toasts.len(), 1);

    // an explicit target needs a host to attach to
    let orphan = MemorySurface::new();
    let target: SurfaceRef = orphan.clone();
    provider.set_portal_container(Some(target));
    assert!(!provider.is_attached());
    assert!(orphan.frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn designated_root_wins_over_body() {
    let body = MemorySurface::new();
    let root = MemorySurface::new();
    let provider = ToastProvider::builder()
        .host(StaticHost::with_root(body.clone(), root.clone()))
        .platform(Platform::Ios)
        .build();

    provider.handle().show(ToastOptions::new("hello"));
    assert_eq!(root.last_frame(), ["[neutral] hello [×]"]);
    assert!(body.frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn portal_container_reattaches_only_on_identity_change() {
    let (provider, body) = attached_provider();
    let toasts = provider.handle();
    toasts.show(ToastOptions::new("moving").persistent());

    let explicit = MemorySurface::new();
    let target: SurfaceRef = explicit.clone();
    provider.set_portal_container(Some(Arc::clone(&target)));
    assert!(body.last_frame().is_empty());
    assert_eq!(explicit.last_frame(), ["[neutral] moving [⊗]"]);

    let frames = explicit.frames().len();
    provider.set_portal_container(Some(target));
    assert_eq!(explicit.frames().len(), frames);

    toasts.show(ToastOptions::new("next").persistent());
    assert_eq!(explicit.frames().len(), frames + 1);

    provider.set_portal_container(None);
    assert_eq!(body.last_frame().len(), 2);
    assert!(explicit.last_frame().is_empty());
}

#[tokio::test(start_paused = true)]
async fn use_toast_reads_the_scoped_provider() {
    let provider = ToastProvider::headless();

    assert!(use_toast().is_detached());
    let id = provider
        .scope(async { use_toast().show(ToastOptions::new("from a deep caller")) })
        .await;

    assert!(!id.is_empty());
    assert_eq!(provider.handle().visible_ids(), vec![id]);
}

#[test]
fn provider_outside_runtime_never_arms_timers() {
    let provider = ToastProvider::headless();
    let toasts = provider.handle();

    let id = toasts.show(ToastOptions::new("no runtime"));
    assert_eq!(toasts.visible_ids(), vec![id]);
    assert_eq!(toasts.pending_timers(), 0);
}

#[test]
fn config_settings_flow_into_provider() {
    let config = maxui_toast::config::Config::from_toml("[toast]\nmax_visible = 1\n")
        .expect("valid config");
    let provider = ToastProvider::builder().settings(&config.toast).build();
    let toasts = provider.handle();

    toasts.show(ToastOptions::new("a"));
    toasts.show(ToastOptions::new("b"));
    assert_eq!(messages(&toasts), ["b"]);
}
