use chainbst::OrderedMap;
use quickcheck::{Gen, QuickCheck};

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to the map and to a `BTreeMap`.
/// This way we can ensure that after a random smattering of puts
/// and deletes we have the same entries in both.
fn do_ops<K, V>(ops: &[Op<K, V>], map: &mut OrderedMap<K, V>, model: &mut BTreeMap<K, V>)
where
    K: Ord + Clone,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                map.put(k.clone(), v.clone());
                model.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                map.delete(k);
                model.remove(k);
            }
        }
    }
}

fn same_contents(ops: Vec<Op<i16, i16>>) -> bool {
    let mut map = OrderedMap::new();
    let mut model = BTreeMap::new();

    do_ops(&ops, &mut map, &mut model);
    map.len() == model.len() && map.iter().eq(model.iter())
}

#[test]
fn long_operation_sequences() {
    QuickCheck::new()
        .gen(Gen::new(1000))
        .quickcheck(same_contents as fn(Vec<Op<i16, i16>>) -> bool);
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    same_contents(
        ops.into_iter()
            .map(|op| match op {
                Op::Insert(k, v) => Op::Insert(i16::from(k), i16::from(v)),
                Op::Remove(k) => Op::Remove(i16::from(k)),
            })
            .collect(),
    )
}

#[quickcheck]
fn put_then_get(xs: Vec<(i8, String)>, key: i8, value: String) -> bool {
    let mut map: OrderedMap<_, _> = xs.into_iter().collect();
    map.put(key, value.clone());

    map.get(&key) == Some(&value)
}

#[quickcheck]
fn len_counts_distinct_keys(xs: Vec<i8>) -> bool {
    let map: OrderedMap<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let distinct: HashSet<_> = xs.into_iter().collect();

    map.len() == distinct.len()
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let map: OrderedMap<_, _> = xs.iter().map(|x| (*x, *x)).collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| map.get(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut map: OrderedMap<_, _> = xs.iter().map(|x| (*x, *x)).collect();
    let mut len = map.len();
    for delete in &deletes {
        if map.delete(delete).is_some() {
            len -= 1;
        }
        // Deleting a key that's gone must not change the size.
        if map.len() != len {
            return false;
        }
    }

    let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();

    deletes.iter().all(|x| map.get(x).is_none())
        && xs.iter().filter(|x| !deletes.contains(*x)).all(|x| map.get(x) == Some(x))
        && keys.windows(2).all(|pair| pair[0] < pair[1])
}
