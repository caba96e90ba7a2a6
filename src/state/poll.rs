// Interval polling scoped to a single target (a lobby, a game).
use gloo::timers::callback::Interval;
use yew::prelude::*;

/// Holds at most one running poll. Retargeting drops the old handle (which
/// cancels it) before the new one is started.
pub struct PollSlot<K, H> {
    current: Option<(K, H)>,
}

impl<K: Clone + PartialEq, H> Default for PollSlot<K, H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<K: Clone + PartialEq, H> PollSlot<K, H> {
    pub fn retarget(&mut self, target: Option<K>, start: impl FnOnce(K) -> H) {
        if self.target() == target.as_ref() {
            return;
        }
        self.stop();
        if let Some(key) = target {
            let handle = start(key.clone());
            self.current = Some((key, handle));
        }
    }

    pub fn stop(&mut self) {
        self.current = None;
    }

    pub fn target(&self) -> Option<&K> {
        self.current.as_ref().map(|(k, _)| k)
    }
}

/// Emits `tick` for `target` right away and then every `period_ms` until the
/// target changes or the component unmounts.
#[hook]
pub fn use_poll<K>(target: Option<K>, period_ms: u32, tick: Callback<K>)
where
    K: Clone + PartialEq + 'static,
{
    let slot = use_mut_ref(PollSlot::<K, Interval>::default);
    use_effect_with((target, period_ms), move |(target, period_ms)| {
        let period = *period_ms;
        slot.borrow_mut().retarget(target.clone(), |key| {
            tick.emit(key.clone());
            Interval::new(period, move || tick.emit(key.clone()))
        });
        move || slot.borrow_mut().stop()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Handle {
        key: i64,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("stop {}", self.key));
        }
    }

    fn start(log: &Rc<RefCell<Vec<String>>>) -> impl FnOnce(i64) -> Handle + '_ {
        move |key| {
            log.borrow_mut().push(format!("start {key}"));
            Handle { key, log: log.clone() }
        }
    }

    #[test]
    fn switching_target_stops_previous_before_starting_next() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot: PollSlot<i64, Handle> = PollSlot::default();
        slot.retarget(Some(1), start(&log));
        slot.retarget(Some(2), start(&log));
        assert_eq!(slot.target(), Some(&2));
        assert_eq!(*log.borrow(), vec!["start 1", "stop 1", "start 2"]);
    }

    #[test]
    fn same_target_keeps_running() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot: PollSlot<i64, Handle> = PollSlot::default();
        slot.retarget(Some(4), start(&log));
        slot.retarget(Some(4), start(&log));
        assert_eq!(*log.borrow(), vec!["start 4"]);
    }

    #[test]
    fn clearing_target_or_stopping_cancels() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot: PollSlot<i64, Handle> = PollSlot::default();
        slot.retarget(Some(1), start(&log));
        slot.retarget(None, start(&log));
        assert_eq!(slot.target(), None);
        slot.retarget(Some(3), start(&log));
        slot.stop();
        assert_eq!(*log.borrow(), vec!["start 1", "stop 1", "start 3", "stop 3"]);
    }
}
