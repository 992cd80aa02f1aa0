use chainbst::ChainedHashMap;
use quickcheck::{Arbitrary, Gen};

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::Op;

/// A key whose hash only depends on its id modulo three, so that any handful
/// of keys is bound to share buckets.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Colliding(u8);

impl Hash for Colliding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.0 % 3).hash(state);
    }
}

impl Arbitrary for Colliding {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(u8::arbitrary(g))
    }
}

fn do_ops<K, V>(ops: &[Op<K, V>], map: &mut ChainedHashMap<K, V>, model: &mut HashMap<K, V>)
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                map.put(k.clone(), v.clone());
                model.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                map.remove(k);
                model.remove(k);
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut map = ChainedHashMap::new();
    let mut model = HashMap::new();

    do_ops(&ops, &mut map, &mut model);
    map.len() == model.len() && model.keys().all(|key| map.get(key) == model.get(key))
}

#[quickcheck]
fn fuzz_colliding_keys(ops: Vec<Op<Colliding, i8>>) -> bool {
    let mut map = ChainedHashMap::with_buckets(7).unwrap();
    let mut model = HashMap::new();

    do_ops(&ops, &mut map, &mut model);
    map.len() == model.len() && model.keys().all(|key| map.get(key) == model.get(key))
}

#[quickcheck]
fn removing_one_collider_keeps_the_others(ids: Vec<u8>, victim: u8) -> bool {
    let mut map = ChainedHashMap::with_buckets(5).unwrap();
    for id in &ids {
        map.put(Colliding(*id), *id);
    }

    map.remove(&Colliding(victim));

    map.get(&Colliding(victim)).is_none()
        && ids
            .iter()
            .filter(|id| **id != victim)
            .all(|id| map.get(&Colliding(*id)) == Some(id))
}

#[quickcheck]
fn put_then_get(xs: Vec<(i8, String)>, key: i8, value: String) -> bool {
    let mut map = ChainedHashMap::with_buckets(3).unwrap();
    map.extend(xs);
    map.put(key, value.clone());

    map.get(&key) == Some(&value) && map.contains(&value)
}

#[test]
fn zero_buckets_is_an_invalid_argument() {
    let result = ChainedHashMap::<u8, u8>::with_buckets(0);

    assert!(matches!(result, Err(chainbst::Error::InvalidArgument(_))));
}
