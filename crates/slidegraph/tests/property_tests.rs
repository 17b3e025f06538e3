//! Property-based tests for the priority queue and the window graph.
//!
//! These tests verify invariants that should hold after any operation
//! sequence:
//! - Heap order: `peek_min` is the global minimum, `pop_min` is sorted
//! - Link bookkeeping: counters, queue and adjacency agree
//! - Window: no link is newer than the clock, and nothing at or below the
//!   threshold survives a clock advance

use proptest::prelude::*;
use std::collections::HashMap;

mod minpq_props {
    use super::*;
    use slidegraph::IndexedMinPQ;

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, i32),
        Remove(u8),
        Update(u8, i32),
        Pop,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u8..32, -100i32..100).prop_map(|(k, p)| Op::Add(k, p)),
            1 => (0u8..32).prop_map(Op::Remove),
            2 => (0u8..32, -100i32..100).prop_map(|(k, p)| Op::Update(k, p)),
            1 => Just(Op::Pop),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn peek_min_is_global_min(ops in prop::collection::vec(arb_op(), 0..200)) {
            let mut pq = IndexedMinPQ::new();
            let mut model: HashMap<u8, i32> = HashMap::new();

            for op in ops {
                match op {
                    Op::Add(k, p) => {
                        let fresh = !model.contains_key(&k);
                        prop_assert_eq!(pq.add(k, p), fresh);
                        model.entry(k).or_insert(p);
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(pq.remove(&k), model.remove(&k).is_some());
                    }
                    Op::Update(k, p) => {
                        let known = model.contains_key(&k);
                        prop_assert_eq!(pq.update(&k, p), known);
                        if known {
                            model.insert(k, p);
                        }
                    }
                    Op::Pop => {
                        let popped = pq.pop_min();
                        match popped {
                            Some((k, p)) => {
                                prop_assert_eq!(model.remove(&k), Some(p));
                                prop_assert!(model.values().all(|&v| v >= p));
                            }
                            None => prop_assert!(model.is_empty()),
                        }
                    }
                }

                prop_assert_eq!(pq.len(), model.len());
                let min = model.values().min().copied();
                prop_assert_eq!(pq.peek_min().map(|(_, &p)| p), min);
                for (k, v) in &model {
                    prop_assert_eq!(pq.value(k), Some(v));
                }
            }
        }

        #[test]
        fn pop_sequence_non_decreasing(values in prop::collection::vec(-1000i64..1000, 0..300)) {
            let mut pq = IndexedMinPQ::new();
            for (i, v) in values.iter().enumerate() {
                pq.add(i, *v);
            }

            let mut last = i64::MIN;
            let mut count = 0;
            while let Some((_, v)) = pq.pop_min() {
                prop_assert!(v >= last);
                last = v;
                count += 1;
            }
            prop_assert_eq!(count, values.len());
        }
    }
}

mod graph_props {
    use super::*;
    use slidegraph::TimeWindowGraph;

    #[derive(Debug, Clone)]
    enum Op {
        AddNode(u8),
        RemoveNode(u8),
        AddLink(u8, u8, i64),
        UpdateLink(u8, u8, i64),
        RemoveLink(u8, u8),
        RemoveMin,
        Advance(i64),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u8..12).prop_map(Op::AddNode),
            1 => (0u8..12).prop_map(Op::RemoveNode),
            4 => (0u8..12, 0u8..12, 0i64..200).prop_map(|(a, b, t)| Op::AddLink(a, b, t)),
            2 => (0u8..12, 0u8..12, 0i64..200).prop_map(|(a, b, t)| Op::UpdateLink(a, b, t)),
            1 => (0u8..12, 0u8..12).prop_map(|(a, b)| Op::RemoveLink(a, b)),
            1 => Just(Op::RemoveMin),
            1 => (-20i64..200).prop_map(Op::Advance),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn bookkeeping_holds(
            window in 1i64..50,
            prune in any::<bool>(),
            ops in prop::collection::vec(arb_op(), 0..150),
        ) {
            let mut g = TimeWindowGraph::new(window).with_pruning(prune);
            let mut last_time = g.current_time();

            for op in ops {
                let mut advanced = false;
                match op {
                    Op::AddNode(n) => { g.add_node(n); }
                    Op::RemoveNode(n) => { g.remove_node(&n); }
                    Op::AddLink(a, b, t) => { g.add_link(&a, &b, t); }
                    Op::UpdateLink(a, b, t) => { g.update_link(&a, &b, t); }
                    Op::RemoveLink(a, b) => { g.remove_link(&a, &b); }
                    Op::RemoveMin => { g.remove_min_link(); }
                    Op::Advance(t) => {
                        // Negative or backwards times are ignored outright.
                        advanced = t >= 0 && t >= g.current_time();
                        g.set_current_time(t);
                    }
                }

                prop_assert!(g.is_consistent(), "inconsistent after {:?}", op);
                prop_assert!(g.current_time() >= last_time);

                let now = g.current_time();
                prop_assert!(g.links().all(|(_, ts)| ts <= now), "link from the future after {:?}", op);
                if advanced || now > last_time {
                    let threshold = now - window;
                    prop_assert!(
                        g.links().all(|(_, ts)| ts > threshold),
                        "stale link survived {:?}",
                        op
                    );
                }
                last_time = now;

                let expected = if g.num_nodes() == 0 {
                    0.0
                } else {
                    2.0 * g.num_links() as f64 / g.num_nodes() as f64
                };
                prop_assert_eq!(g.average_degree(), expected);
            }
        }

        #[test]
        fn add_then_remove_restores(
            a in 0u8..8,
            b in 0u8..8,
            t in 0i64..100,
            existing in prop::collection::vec((0u8..8, 0u8..8), 0..10),
        ) {
            prop_assume!(a != b);
            let mut g = TimeWindowGraph::new(1000);
            for n in 0..8u8 {
                g.add_node(n);
            }
            for (x, y) in existing {
                if (x, y) != (a, b) && (x, y) != (b, a) {
                    g.add_link(&x, &y, 0);
                }
            }

            let links_before = g.num_links();
            let degrees_before: Vec<usize> = (0..8u8).map(|n| g.degree(&n)).collect();

            prop_assert!(g.add_link(&a, &b, t));
            prop_assert!(g.remove_link(&b, &a));

            prop_assert_eq!(g.num_links(), links_before);
            let degrees_after: Vec<usize> = (0..8u8).map(|n| g.degree(&n)).collect();
            prop_assert_eq!(degrees_after, degrees_before);
        }
    }
}
