use std::time::Duration;

use folio_core::{
    AmbientMessage, AmbientScheduler, AmbientTuning, Carousel, CarouselMessage,
    CarouselTuning,
};
use folio_player::{CarouselHost, RecordingSink, SystemClock, driver};

fn spawn_host() -> (
    driver::HostHandle,
    RecordingSink,
    tokio::task::JoinHandle<CarouselHost<RecordingSink, SystemClock>>,
) {
    let carousel = Carousel::new(12, &CarouselTuning::default()).unwrap();
    let ambient =
        AmbientScheduler::with_seed(vec![3, 3, 2], &AmbientTuning::default(), 9);
    let sink = RecordingSink::new();
    let host =
        CarouselHost::new(carousel, ambient, sink.clone(), SystemClock::new());
    let (handle, inbox) = driver::channel();
    let task = tokio::spawn(driver::run(host, inbox));
    (handle, sink, task)
}

#[tokio::test(start_paused = true)]
async fn driver_fires_timers_on_tokio_time() {
    let (handle, sink, task) = spawn_host();

    handle
        .send(AmbientMessage::VisibilityChanged { visible: true })
        .await
        .unwrap();
    handle.send(CarouselMessage::Next).await.unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(sink.last_frame().unwrap().current_page, 2);
    assert!(sink.highlights().is_empty());

    tokio::time::sleep(Duration::from_millis(2_100)).await;
    assert_eq!(sink.highlights().len(), 1);

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(sink.highlights().len(), 2);

    handle.shutdown();
    let host = task.await.unwrap();
    assert!(!host.is_mounted());
    assert_eq!(host.pending_timers(), 0);
    assert!(!host.carousel().state().is_transitioning);
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_driver() {
    let (handle, sink, task) = spawn_host();
    handle.send(CarouselMessage::Next).await.unwrap();
    drop(handle);

    let host = task.await.unwrap();
    assert!(!host.is_mounted());
    assert_eq!(host.pending_timers(), 0);
    assert!(!sink.frames().is_empty());
}
