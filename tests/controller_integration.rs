use shuffle_slideshow::slideshow::{Action, ImageRef, SlideDuration, SlideOrder, SlideshowState};
use shuffle_slideshow::tasks::controller::{self, ControllerOptions};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

fn configured(durations: &[u32]) -> SlideshowState {
    let mut order = SlideOrder::Insertion;
    let images = (0..durations.len())
        .map(|i| ImageRef::new(format!("/photos/{i}.jpg")))
        .collect();
    let mut state = SlideshowState::new().apply(Action::Replace(images), &mut order);
    for (index, secs) in durations.iter().enumerate() {
        let duration = SlideDuration::from_secs(*secs).unwrap();
        state = state.apply(Action::SetDuration { index, duration }, &mut order);
    }
    state
}

struct Harness {
    actions: mpsc::Sender<Action>,
    state: watch::Receiver<SlideshowState>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn spawn(initial: SlideshowState) -> Self {
        let (actions, action_rx) = mpsc::channel(16);
        let (state_tx, state) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let options = ControllerOptions {
            tick_interval: Duration::from_secs(1),
            order: SlideOrder::Insertion,
        };
        let handle = tokio::spawn(controller::run(action_rx, state_tx, options, cancel.clone()));
        Self {
            actions,
            state,
            cancel,
            handle,
        }
    }

    async fn send(&self, action: Action) {
        self.actions.send(action).await.expect("controller alive");
        // let the controller drain its queue before time moves on
        tokio::task::yield_now().await;
    }

    fn snapshot(&self) -> SlideshowState {
        self.state.borrow().clone()
    }

    async fn shutdown(self) {
        self.cancel.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn countdown_advances_and_finishes() {
    let harness = Harness::spawn(configured(&[2, 3]));
    harness.send(Action::Start).await;

    let started = harness.snapshot();
    assert_eq!(started.current_index(), 0);
    assert_eq!(started.time_left(), 2);
    assert!(started.countdown_active());

    sleep(Duration::from_millis(2500)).await;
    let at_zero = harness.snapshot();
    assert_eq!(at_zero.current_index(), 0);
    assert!(at_zero.is_time_up());

    sleep(Duration::from_secs(1)).await;
    let advanced = harness.snapshot();
    assert_eq!(advanced.current_index(), 1);
    assert_eq!(advanced.time_left(), 3);
    assert!(advanced.timer_active());

    sleep(Duration::from_secs(4)).await;
    let finished = harness.snapshot();
    assert!(finished.is_finished());
    assert_eq!(finished.current_index(), 1);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(harness.snapshot(), finished);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn stop_holds_countdown_until_restart() {
    let harness = Harness::spawn(configured(&[30, 60]));
    harness.send(Action::Start).await;

    sleep(Duration::from_millis(5500)).await;
    assert_eq!(harness.snapshot().time_left(), 25);

    harness.send(Action::StopTimer).await;
    sleep(Duration::from_secs(10)).await;
    let stopped = harness.snapshot();
    assert_eq!(stopped.time_left(), 25);
    assert!(!stopped.timer_active());

    harness.send(Action::RestartTimer).await;
    let resumed = harness.snapshot();
    assert_eq!(resumed.time_left(), 30);
    assert!(resumed.countdown_active());

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(harness.snapshot().time_left(), 29);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn manual_navigation_gets_a_full_second() {
    let harness = Harness::spawn(configured(&[30, 60]));
    harness.send(Action::Start).await;

    sleep(Duration::from_millis(600)).await;
    harness.send(Action::Next).await;

    // the tick armed for the first slide would have fired at 1.0s
    sleep(Duration::from_millis(700)).await;
    let moved = harness.snapshot();
    assert_eq!(moved.current_index(), 1);
    assert_eq!(moved.time_left(), 60);

    sleep(Duration::from_millis(400)).await;
    assert_eq!(harness.snapshot().time_left(), 59);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn replace_discards_pending_tick() {
    let mut harness = Harness::spawn(configured(&[30]));
    harness.send(Action::Start).await;
    sleep(Duration::from_millis(500)).await;

    harness
        .send(Action::Replace(vec![ImageRef::new("/other/new.png")]))
        .await;
    let replaced = harness.state.borrow_and_update().clone();
    assert!(!replaced.is_started());
    assert_eq!(replaced.time_left(), 0);

    sleep(Duration::from_secs(5)).await;
    assert!(!harness.state.has_changed().unwrap());
    assert_eq!(harness.snapshot(), replaced);

    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn rejects_out_of_range_duration_edit() {
    let harness = Harness::spawn(configured(&[30]));
    let before = harness.snapshot();
    harness
        .send(Action::SetDuration {
            index: 3,
            duration: SlideDuration::from_secs(60).unwrap(),
        })
        .await;
    assert_eq!(harness.snapshot(), before);
    harness.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn stops_when_senders_are_dropped() {
    let Harness {
        actions, handle, ..
    } = Harness::spawn(configured(&[30]));
    drop(actions);
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("controller should exit")
        .unwrap()
        .unwrap();
}
