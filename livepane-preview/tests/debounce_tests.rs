use livepane_preview::{Debouncer, TriggerSource};
use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::advance;

const DELAY: Duration = Duration::from_millis(50);

// Fires a trigger and lets the debounce task observe it at the current
// (paused) instant, so deadlines are deterministic.
async fn fire(handle: &livepane_preview::TriggerHandle, source: TriggerSource) {
    handle.fire(source);
    yield_now().await;
}

// ── Coalescing ───────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn burst_coalesces_to_exactly_one_settle() {
    let (handle, mut settles) = Debouncer::spawn(DELAY);

    for _ in 0..5 {
        fire(&handle, TriggerSource::Keystroke).await;
        advance(Duration::from_millis(10)).await;
    }

    advance(Duration::from_millis(200)).await;
    yield_now().await;

    let settle = settles.try_recv().expect("one settle after the burst");
    assert_eq!(settle.coalesced, 5);
    assert!(settles.try_recv().is_err(), "no second settle");
}

#[tokio::test(start_paused = true)]
async fn settle_is_timed_from_the_last_trigger() {
    let (handle, mut settles) = Debouncer::spawn(DELAY);

    fire(&handle, TriggerSource::SelectionChanged).await;
    advance(Duration::from_millis(30)).await;
    fire(&handle, TriggerSource::PointerClick).await;

    // 49 ms after the *last* trigger: still quiet.
    advance(Duration::from_millis(49)).await;
    yield_now().await;
    assert!(settles.try_recv().is_err());

    // 50 ms after the last trigger: settled.
    advance(Duration::from_millis(1)).await;
    yield_now().await;
    let settle = settles.try_recv().expect("settle at the window edge");
    assert_eq!(settle.coalesced, 2);
}

#[tokio::test(start_paused = true)]
async fn separate_quiet_periods_each_settle() {
    let (handle, mut settles) = Debouncer::spawn(DELAY);

    fire(&handle, TriggerSource::DataRefresh).await;
    advance(Duration::from_millis(100)).await;
    yield_now().await;
    assert!(settles.try_recv().is_ok());

    fire(&handle, TriggerSource::Keystroke).await;
    advance(Duration::from_millis(100)).await;
    yield_now().await;
    assert!(settles.try_recv().is_ok());
    assert!(settles.try_recv().is_err());
}

// ── Teardown ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_task() {
    let (handle, mut settles) = Debouncer::spawn(DELAY);
    let clone = handle.clone();

    drop(handle);
    drop(clone);
    yield_now().await;

    // Channel closes without a settle ever firing.
    assert_eq!(settles.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn trigger_after_teardown_is_swallowed() {
    let (handle, settles) = Debouncer::spawn(DELAY);
    drop(settles);

    // The task notices the departed receiver at the next settle; firing
    // remains a no-op rather than an error either way.
    fire(&handle, TriggerSource::Keystroke).await;
    advance(Duration::from_millis(100)).await;
    handle.fire(TriggerSource::Keystroke);
}
