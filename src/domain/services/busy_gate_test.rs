use super::BusyGate;

#[test]
fn it_starts_idle() {
    let gate = BusyGate::default();
    assert!(!gate.is_busy());
}

#[test]
fn it_allows_a_single_holder() {
    let gate = BusyGate::default();
    let guard = gate.try_acquire();

    assert!(guard.is_some());
    assert!(gate.is_busy());
    assert!(gate.try_acquire().is_none());
}

#[test]
fn it_releases_on_drop() {
    let gate = BusyGate::default();
    {
        let _guard = gate.try_acquire().unwrap();
        assert!(gate.is_busy());
    }

    assert!(!gate.is_busy());
    assert!(gate.try_acquire().is_some());
}

#[test]
fn it_shares_state_between_clones() {
    let gate = BusyGate::default();
    let other = gate.clone();
    let _guard = gate.try_acquire().unwrap();

    assert!(other.is_busy());
    assert!(other.try_acquire().is_none());
}

#[test]
fn it_releases_when_the_holder_panics() {
    let gate = BusyGate::default();
    let worker_gate = gate.clone();

    let res = std::thread::spawn(move || {
        let _guard = worker_gate.try_acquire().unwrap();
        panic!("backend exploded");
    })
    .join();

    assert!(res.is_err());
    assert!(!gate.is_busy());
}
