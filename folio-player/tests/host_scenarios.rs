use folio_core::{
    AmbientMessage, AmbientPhase, AmbientScheduler, AmbientTuning, Carousel,
    CarouselMessage, CarouselTuning, PointerEvent, PointerKind,
    gesture::GestureOutput,
};
use folio_player::{CarouselHost, ManualClock, RecordingSink, TimerKey};

type TestHost = CarouselHost<RecordingSink, ManualClock>;

fn host_with(items: usize, sub_counts: Vec<usize>) -> (TestHost, ManualClock) {
    let clock = ManualClock::new();
    let carousel = Carousel::new(items, &CarouselTuning::default()).unwrap();
    let ambient =
        AmbientScheduler::with_seed(sub_counts, &AmbientTuning::default(), 42);
    let host = CarouselHost::new(
        carousel,
        ambient,
        RecordingSink::new(),
        clock.clone(),
    );
    (host, clock)
}

fn visible(host: &mut TestHost) {
    host.mount();
    host.dispatch(AmbientMessage::VisibilityChanged { visible: true });
}

#[test]
fn navigation_is_locked_until_settle_elapses() {
    let (mut host, clock) = host_with(12, vec![]);
    host.mount();

    host.dispatch(CarouselMessage::Next);
    assert_eq!(host.carousel().current_page(), 2);

    clock.advance(150);
    host.advance();
    host.dispatch(CarouselMessage::Next);
    assert_eq!(host.carousel().current_page(), 2);

    clock.advance(150);
    host.advance();
    assert!(!host.carousel().state().is_transitioning);
    host.dispatch(CarouselMessage::Next);
    assert_eq!(host.carousel().current_page(), 3);
}

#[test]
fn drag_release_commits_and_frames_follow() {
    let (mut host, clock) = host_with(12, vec![]);
    host.mount();
    host.dispatch(CarouselMessage::SetViewportWidth { width: 400.0 });

    host.dispatch(CarouselMessage::Pointer(PointerEvent::down(
        1,
        PointerKind::Mouse,
        300.0,
        0,
    )));
    host.dispatch(CarouselMessage::Pointer(PointerEvent::moved(
        1,
        PointerKind::Mouse,
        200.0,
        16,
    )));
    let dragging = host.sink().last_frame().unwrap();
    assert!(dragging.is_dragging);
    assert!(dragging.transform_percent < 0.0);

    let outcome = host.dispatch(CarouselMessage::Pointer(PointerEvent::up(
        1,
        PointerKind::Mouse,
        200.0,
        32,
    )));
    assert_eq!(outcome.committed_page, Some(2));
    assert!(host.is_scheduled(TimerKey::TransitionSettle));

    let settled = host.sink().last_frame().unwrap();
    assert!(!settled.is_dragging);
    assert_eq!(settled.current_page, 2);
    assert_eq!(settled.transform_percent, -100.0 / 3.0);

    clock.advance(300);
    assert_eq!(host.advance(), 1);
}

#[test]
fn ambient_starts_after_delay_and_stops_on_unmount() {
    let (mut host, clock) = host_with(3, vec![3, 2, 4]);
    visible(&mut host);
    assert_eq!(host.ambient().phase(), AmbientPhase::WarmingUp);
    assert!(host.is_scheduled(TimerKey::AmbientStartup));

    clock.advance(1_999);
    assert_eq!(host.advance(), 0);
    assert!(host.sink().highlights().is_empty());

    clock.advance(1);
    host.advance();
    assert_eq!(host.sink().highlights().len(), 1);
    assert!(host.is_scheduled(TimerKey::AmbientInterval));

    clock.advance(3_500);
    host.advance();
    assert_eq!(host.sink().highlights().len(), 2);

    host.unmount();
    assert_eq!(host.pending_timers(), 0);
    assert_eq!(host.ambient().phase(), AmbientPhase::Idle);

    clock.advance(10_000);
    assert_eq!(host.advance(), 0);
    assert_eq!(host.sink().highlights().len(), 2);
}

#[test]
fn overlay_pauses_rotation() {
    let (mut host, clock) = host_with(3, vec![3, 2, 4]);
    visible(&mut host);
    clock.advance(2_000);
    host.advance();
    assert_eq!(host.sink().highlights().len(), 1);

    host.dispatch(AmbientMessage::OverlayChanged { open: true });
    assert_eq!(host.pending_timers(), 0);
    clock.advance(20_000);
    host.advance();
    assert_eq!(host.sink().highlights().len(), 1);

    host.dispatch(AmbientMessage::OverlayChanged { open: false });
    assert_eq!(host.ambient().phase(), AmbientPhase::WarmingUp);
    clock.advance(2_000);
    host.advance();
    assert_eq!(host.sink().highlights().len(), 2);
}

#[test]
fn late_advance_fires_each_interval_once() {
    let (mut host, clock) = host_with(3, vec![3, 2, 4]);
    visible(&mut host);
    // startup at 2000, then intervals at 5500, 9000, 12500
    clock.set(12_600);
    assert_eq!(host.advance(), 4);
    assert_eq!(host.sink().highlights().len(), 4);
    assert_eq!(host.next_deadline(), Some(16_000));
}

#[test]
fn consecutive_highlights_never_repeat_an_item() {
    let (mut host, clock) = host_with(4, vec![2, 3, 2, 5]);
    visible(&mut host);
    clock.advance(2_000);
    host.advance();
    for _ in 0..60 {
        clock.advance(3_500);
        host.advance();
    }

    let highlights = host.sink().highlights();
    assert_eq!(highlights.len(), 61);
    for pair in highlights.windows(2) {
        assert_ne!(pair[0].item, pair[1].item);
    }
}

#[test]
fn ineligible_items_never_rotate() {
    let (mut host, clock) = host_with(3, vec![1, 1, 0]);
    visible(&mut host);
    assert_eq!(host.ambient().phase(), AmbientPhase::Idle);
    clock.advance(60_000);
    assert_eq!(host.advance(), 0);
    assert!(host.sink().highlights().is_empty());
}

#[test]
fn shrinking_items_clamps_the_page() {
    let (mut host, clock) = host_with(12, vec![]);
    host.mount();
    host.dispatch(CarouselMessage::RequestPage { page: 3 });
    clock.advance(300);
    host.advance();

    host.dispatch(CarouselMessage::SetItemCount { total_items: 5 });
    let frame = host.sink().last_frame().unwrap();
    assert_eq!(frame.total_pages, 2);
    assert_eq!(frame.current_page, 2);
}

#[test]
fn unmount_mid_drag_leaves_carousel_usable() {
    let (mut host, _) = host_with(12, vec![]);
    host.mount();
    host.dispatch(CarouselMessage::Pointer(PointerEvent::down(
        7,
        PointerKind::Touch,
        300.0,
        0,
    )));
    host.dispatch(CarouselMessage::Pointer(PointerEvent::moved(
        7,
        PointerKind::Touch,
        200.0,
        16,
    )));
    assert!(host.carousel().state().is_dragging);

    host.unmount();
    host.mount();
    assert!(!host.carousel().state().is_dragging);
    assert!(!host.sink().last_frame().unwrap().is_dragging);

    let outcome = host.dispatch(CarouselMessage::Next);
    assert_eq!(outcome.committed_page, Some(2));
    assert_eq!(host.carousel().current_page(), 2);
}

#[test]
fn fresh_pointer_is_tracked_after_remount() {
    let (mut host, _) = host_with(12, vec![]);
    host.mount();
    host.dispatch(CarouselMessage::Pointer(PointerEvent::down(
        1,
        PointerKind::Mouse,
        300.0,
        0,
    )));
    host.unmount();
    host.mount();

    let outcome = host.dispatch(CarouselMessage::Pointer(PointerEvent::down(
        2,
        PointerKind::Mouse,
        300.0,
        50,
    )));
    assert_eq!(outcome.gesture, Some(GestureOutput::Armed));
}
