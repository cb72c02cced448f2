#![warn(rust_2018_idioms)]

use protected::Protected;

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

#[test]
fn get_and_set() {
    let map = Protected::new(HashMap::new());

    assert_eq!(None, map.get_cloned("missing"));

    assert_eq!(None, map.set("a", Some(1)));
    assert_eq!(Some(1), map.get_cloned("a"));

    assert_eq!(Some(1), map.set("a", Some(2)));
    assert_eq!(Some(2), map.get_cloned("a"));

    // storing the absent value removes the entry
    assert_eq!(Some(2), map.set("a", None));
    assert_eq!(None, map.get_cloned("a"));
}

#[test]
fn removing_a_missing_key_is_a_no_op() {
    let map: Protected<HashMap<&str, i32>> = Protected::new(HashMap::new());

    assert_eq!(None, map.set("ghost", None));
    assert_eq!(None, map.get_cloned("ghost"));
}

#[test]
fn concurrent_writes_to_distinct_keys() {
    const WRITERS: usize = 4;
    const KEYS_PER_WRITER: usize = 25;

    let map = Arc::new(Protected::new(HashMap::new()));
    let mut handles = Vec::with_capacity(WRITERS);

    for writer in 0..WRITERS {
        let map = map.clone();
        handles.push(thread::spawn(move || {
            for k in 0..KEYS_PER_WRITER {
                let key = writer * KEYS_PER_WRITER + k;
                map.set(key, Some(key * 10));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    for key in 0..WRITERS * KEYS_PER_WRITER {
        assert_eq!(Some(key * 10), map.get_cloned(&key));
    }
}

#[test]
fn compound_check_then_act_is_not_atomic() {
    // Each keyed call is atomic on its own, but a get followed by a set
    // spans two critical sections, and the other thread may run between
    // them. The final count is any interleaved outcome; only a single
    // `mutate` call would guarantee both increments are kept.
    let map = Arc::new(Protected::new(HashMap::new()));
    map.set("n", Some(0));

    let m = map.clone();
    let t = thread::spawn(move || {
        let seen = m.get_cloned("n").unwrap();
        m.set("n", Some(seen + 1));
    });

    let seen = map.get_cloned("n").unwrap();
    map.set("n", Some(seen + 1));
    t.join().unwrap();

    let n = map.get_cloned("n").unwrap();
    assert!(n == 1 || n == 2, "interleaved outcome out of range: {n}");
}
