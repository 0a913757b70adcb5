//! Behaviour shared by every dispatcher, run against both implementations.
//!
//! Parallel delivery gives no completion signal, so each recording observer
//! reports its calls through a channel owned by the test.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use fanout::{Dispatch, Observe, ObserverRef, ParallelDispatcher, SyncDispatcher};
use tokio::sync::mpsc;
use tokio::time::timeout;

#[derive(Clone, Debug, PartialEq)]
struct Ping(u32);

const WAIT: Duration = Duration::from_secs(5);
const QUIET: Duration = Duration::from_millis(100);

struct Recorder {
    name: &'static str,
    calls: AtomicUsize,
    tx: mpsc::UnboundedSender<u32>,
}

impl Observe<Ping> for Recorder {
    fn on_event(&self, event: &Ping) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(event.0);
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

struct Listener {
    obs: Arc<Recorder>,
    rx: mpsc::UnboundedReceiver<u32>,
}

impl Listener {
    fn new(name: &'static str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let obs = Arc::new(Recorder {
            name,
            calls: AtomicUsize::new(0),
            tx,
        });
        Self { obs, rx }
    }

    fn handle(&self) -> ObserverRef<Ping> {
        Arc::clone(&self.obs) as ObserverRef<Ping>
    }

    fn calls(&self) -> usize {
        self.obs.calls.load(Ordering::SeqCst)
    }

    /// Waits for exactly `expected` deliveries, then checks nothing else arrives.
    async fn expect(&mut self, expected: &[u32]) {
        for want in expected {
            let got = timeout(WAIT, self.rx.recv())
                .await
                .unwrap_or_else(|_| panic!("{}: timed out waiting for {want}", self.obs.name))
                .expect("channel closed");
            assert_eq!(got, *want, "{}: unexpected event", self.obs.name);
        }
        self.expect_quiet().await;
    }

    async fn expect_quiet(&mut self) {
        if let Ok(Some(extra)) = timeout(QUIET, self.rx.recv()).await {
            panic!("{}: unexpected extra event {extra}", self.obs.name);
        }
    }
}

async fn register_two_then_remove_one<D: Dispatch<Ping>>(d: D) {
    let mut l1 = Listener::new("l1");
    let mut l2 = Listener::new("l2");
    assert!(d.add(l1.handle()));
    assert!(d.add(l2.handle()));

    d.emit(Ping(1));
    l1.expect(&[1]).await;
    l2.expect(&[1]).await;

    assert!(d.remove(&l1.handle()));
    d.emit(Ping(2));
    l2.expect(&[2]).await;
    l1.expect_quiet().await;

    assert_eq!(l1.calls(), 1);
    assert_eq!(l2.calls(), 2);
}

async fn add_twice_delivers_once<D: Dispatch<Ping>>(d: D) {
    let mut l1 = Listener::new("l1");
    assert!(d.add(l1.handle()));
    assert!(!d.add(l1.handle()));
    assert_eq!(d.len(), 1);

    d.emit(Ping(1));
    l1.expect(&[1]).await;
    assert_eq!(l1.calls(), 1);
}

async fn remove_is_symmetric<D: Dispatch<Ping>>(d: D) {
    let l1 = Listener::new("l1");
    let never = Listener::new("never");
    assert!(!d.remove(&never.handle()));

    d.add(l1.handle());
    assert!(d.remove(&l1.handle()));
    assert!(!d.remove(&l1.handle()));
    assert!(d.add(l1.handle()));
    assert!(d.contains(&l1.handle()));
}

async fn absent_observer_rejected<D: Dispatch<Ping>>(d: D) {
    assert!(!d.add_maybe(None));
    assert!(d.is_empty());
    assert!(!d.remove_maybe(None));

    // nothing registered: emit is a no-op
    d.emit(Ping(0));
}

/// Removes itself from the dispatcher the first time it is called.
struct Quitter<D> {
    dispatcher: Weak<D>,
    me: Weak<Quitter<D>>,
    rec: Arc<Recorder>,
}

impl<D> Observe<Ping> for Quitter<D>
where
    D: Dispatch<Ping> + Send + Sync + 'static,
{
    fn on_event(&self, event: &Ping) {
        if let (Some(d), Some(me)) = (self.dispatcher.upgrade(), self.me.upgrade()) {
            let me: ObserverRef<Ping> = me;
            d.remove(&me);
        }
        self.rec.on_event(event);
    }

    fn name(&self) -> &'static str {
        "quitter"
    }
}

async fn self_removal_during_delivery<D>(d: D)
where
    D: Dispatch<Ping> + Send + Sync + 'static,
{
    let d = Arc::new(d);
    let mut rec = Listener::new("quitter");
    let quitter = Arc::new_cyclic(|me| Quitter {
        dispatcher: Arc::downgrade(&d),
        me: me.clone(),
        rec: Arc::clone(&rec.obs),
    });
    d.add(quitter as ObserverRef<Ping>);

    d.emit(Ping(1));
    rec.expect(&[1]).await;

    d.emit(Ping(2));
    rec.expect_quiet().await;
    assert_eq!(rec.calls(), 1);
    assert!(d.is_empty());
}

/// On its first call, registers `newcomer` and unregisters `victim`.
struct Mutator<D> {
    dispatcher: Weak<D>,
    newcomer: ObserverRef<Ping>,
    victim: ObserverRef<Ping>,
    done: mpsc::UnboundedSender<()>,
    fired: AtomicUsize,
}

impl<D> Observe<Ping> for Mutator<D>
where
    D: Dispatch<Ping> + Send + Sync + 'static,
{
    fn on_event(&self, _: &Ping) {
        if self.fired.fetch_add(1, Ordering::SeqCst) == 0 {
            if let Some(d) = self.dispatcher.upgrade() {
                d.add(Arc::clone(&self.newcomer));
                d.remove(&self.victim);
            }
        }
        let _ = self.done.send(());
    }
}

async fn mutation_does_not_affect_inflight_emit<D>(d: D)
where
    D: Dispatch<Ping> + Send + Sync + 'static,
{
    let d = Arc::new(d);
    let mut victim = Listener::new("victim");
    let mut newcomer = Listener::new("newcomer");
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    let mutator = Arc::new(Mutator {
        dispatcher: Arc::downgrade(&d),
        newcomer: newcomer.handle(),
        victim: victim.handle(),
        done: done_tx,
        fired: AtomicUsize::new(0),
    });
    d.add(mutator as ObserverRef<Ping>);
    d.add(victim.handle());

    d.emit(Ping(1));
    timeout(WAIT, done_rx.recv()).await.unwrap();
    victim.expect(&[1]).await;
    newcomer.expect_quiet().await;

    d.emit(Ping(2));
    timeout(WAIT, done_rx.recv()).await.unwrap();
    newcomer.expect(&[2]).await;
    victim.expect_quiet().await;
}

async fn panicking_observer_does_not_reach_caller<D: Dispatch<Ping>>(d: D) {
    struct Bomb;
    impl Observe<Ping> for Bomb {
        fn on_event(&self, _: &Ping) {
            panic!("observer failure");
        }
    }

    let mut after = Listener::new("after");
    d.add(Arc::new(Bomb) as ObserverRef<Ping>);
    d.add(after.handle());

    d.emit(Ping(1));
    after.expect(&[1]).await;
}

async fn concurrent_emit_and_churn<D>(d: D)
where
    D: Dispatch<Ping> + Send + Sync + 'static,
{
    let d = Arc::new(d);
    let mut steady = Listener::new("steady");
    d.add(steady.handle());

    let churn = {
        let d = Arc::clone(&d);
        std::thread::spawn(move || {
            let extra = Listener::new("extra");
            for _ in 0..500 {
                d.add(extra.handle());
                d.remove(&extra.handle());
            }
        })
    };
    let emitters: Vec<_> = (0..4)
        .map(|_| {
            let d = Arc::clone(&d);
            std::thread::spawn(move || {
                for i in 0..25 {
                    d.emit(Ping(i));
                }
            })
        })
        .collect();

    churn.join().unwrap();
    for e in emitters {
        e.join().unwrap();
    }

    let mut received = 0;
    while received < 100 {
        timeout(WAIT, steady.rx.recv()).await.unwrap().unwrap();
        received += 1;
    }
    steady.expect_quiet().await;
    assert_eq!(d.len(), 1);
}

macro_rules! contract {
    ($suite:ident, $make:expr) => {
        mod $suite {
            use super::*;

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn register_two_then_remove_one() {
                super::register_two_then_remove_one($make).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn add_twice_delivers_once() {
                super::add_twice_delivers_once($make).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn remove_is_symmetric() {
                super::remove_is_symmetric($make).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn absent_observer_rejected() {
                super::absent_observer_rejected($make).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn self_removal_during_delivery() {
                super::self_removal_during_delivery($make).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn mutation_does_not_affect_inflight_emit() {
                super::mutation_does_not_affect_inflight_emit($make).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn panicking_observer_does_not_reach_caller() {
                super::panicking_observer_does_not_reach_caller($make).await;
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn concurrent_emit_and_churn() {
                super::concurrent_emit_and_churn($make).await;
            }
        }
    };
}

contract!(sync_dispatcher, SyncDispatcher::<Ping>::new());
contract!(parallel_dispatcher, ParallelDispatcher::<Ping>::new().unwrap());
