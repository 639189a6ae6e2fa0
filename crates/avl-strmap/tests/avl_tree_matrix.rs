use avl_strmap::{AvlError, AvlTree, DuplicatePolicy, TreeConfig};

fn tree_of(entries: &[(&str, i32)]) -> AvlTree<i32> {
    let mut tree = AvlTree::new();
    for (k, v) in entries {
        tree.insert(k, *v).unwrap();
        tree.check_invariants().unwrap();
    }
    tree
}

#[test]
fn three_keys_need_no_rotation() {
    let mut tree = tree_of(&[("B", 1), ("A", 2), ("C", 3)]);
    assert_eq!(
        tree.print(),
        "\"B\" = 1 [h=1]\n├─ \"A\" = 2 [h=0]\n└─ \"C\" = 3 [h=0]"
    );

    tree.insert("D", 4).unwrap();
    tree.check_invariants().unwrap();
    assert_eq!(
        tree.print(),
        "\"B\" = 1 [h=2]\n├─ \"A\" = 2 [h=0]\n└─ \"C\" = 3 [h=1]\n   ├─ ∅\n   └─ \"D\" = 4 [h=0]"
    );
}

#[test]
fn two_child_delete_promotes_predecessor() {
    let mut tree = tree_of(&[("M", 0), ("F", 1), ("T", 2), ("B", 3), ("H", 4), ("O", 5)]);
    assert_eq!(tree.height(), 2);

    assert_eq!(tree.remove("M").unwrap(), Some(0));
    tree.check_invariants().unwrap();

    assert_eq!(tree.get("M").unwrap(), None);
    assert_eq!(tree.get("H").unwrap(), Some(&4));
    for (k, v) in [("F", 1), ("T", 2), ("B", 3), ("O", 5)] {
        assert_eq!(tree.get(k).unwrap(), Some(&v));
    }
    assert_eq!(tree.len(), 5);
    assert_eq!(
        tree.print(),
        concat!(
            "\"H\" = 4 [h=2]\n",
            "├─ \"F\" = 1 [h=1]\n",
            "│  ├─ \"B\" = 3 [h=0]\n",
            "│  └─ ∅\n",
            "└─ \"T\" = 2 [h=1]\n",
            "   ├─ \"O\" = 5 [h=0]\n",
            "   └─ ∅",
        )
    );
}

#[test]
fn single_child_deletes_splice_child_in() {
    let mut tree = tree_of(&[("b", 1), ("a", 2), ("d", 3), ("c", 4)]);

    assert_eq!(tree.remove("d").unwrap(), Some(3));
    tree.check_invariants().unwrap();
    assert_eq!(tree.get("c").unwrap(), Some(&4));

    assert_eq!(tree.remove("b").unwrap(), Some(1));
    tree.check_invariants().unwrap();
    assert_eq!(tree.len(), 2);
}

#[test]
fn overwrite_keeps_count() {
    let mut tree = tree_of(&[("k", 1), ("j", 2)]);
    assert_eq!(tree.insert("k", 10).unwrap(), Some(1));
    assert_eq!(tree.get("k").unwrap(), Some(&10));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.count_nodes(), 2);
}

#[test]
fn ignore_policy_keeps_stored_value() {
    let mut tree = AvlTree::with_config(TreeConfig {
        duplicate_policy: DuplicatePolicy::Ignore,
    });
    tree.insert("k", 1).unwrap();
    assert_eq!(tree.insert("k", 10).unwrap(), Some(10));
    assert_eq!(tree.get("k").unwrap(), Some(&1));
    assert_eq!(tree.len(), 1);
}

#[test]
fn deleting_absent_key_changes_nothing() {
    let mut tree = tree_of(&[("d", 1), ("b", 2), ("f", 3), ("a", 4), ("c", 5)]);
    let before = tree.print();

    assert_eq!(tree.remove("e").unwrap(), None);
    assert_eq!(tree.remove("zz").unwrap(), None);
    assert_eq!(tree.print(), before);
    assert_eq!(tree.len(), 5);

    let mut empty = AvlTree::<i32>::new();
    assert_eq!(empty.remove("a").unwrap(), None);
    assert!(empty.is_empty());
}

#[test]
fn keys_compare_bytewise() {
    let tree = tree_of(&[("a", 1), ("B", 2), ("ab", 3), ("é", 4), ("A", 5)]);
    assert!(tree.is_ordered_correctly());
    assert_eq!(tree.get("ab").unwrap(), Some(&3));
    assert_eq!(tree.get("é").unwrap(), Some(&4));
    assert_eq!(tree.get("b").unwrap(), None);
}

#[test]
fn empty_key_is_a_precondition_violation() {
    let mut tree = tree_of(&[("a", 1)]);
    assert_eq!(tree.insert("", 2), Err(AvlError::EmptyKey));
    assert_eq!(tree.len(), 1);
}

#[test]
fn ladder_insert_delete_matrix() {
    let mut tree = AvlTree::new();
    for i in 0..300 {
        tree.insert(&format!("{i:04}"), i).unwrap();
        tree.check_invariants().unwrap();
    }
    assert_eq!(tree.len(), 300);
    // 300 sorted inserts into an AVL tree stay within 1.44 * log2(n).
    assert!(tree.height() <= 11, "height {}", tree.height());

    for i in (0..300).step_by(3) {
        assert_eq!(tree.remove(&format!("{i:04}")).unwrap(), Some(i));
        tree.check_invariants().unwrap();
    }

    for i in 0..300 {
        let got = tree.get(&format!("{i:04}")).unwrap();
        if i % 3 == 0 {
            assert_eq!(got, None);
        } else {
            assert_eq!(got, Some(&i));
        }
    }
    assert_eq!(tree.len(), 200);
}

#[test]
fn drain_in_every_order() {
    let keys: Vec<String> = (0..64).map(|i| format!("k{i:02}")).collect();

    let orders: [Box<dyn Fn(usize) -> usize>; 3] = [
        Box::new(|i| i),
        Box::new(|i| 63 - i),
        Box::new(|i| (i * 37) % 64),
    ];
    for order in orders.iter() {
        let mut tree = AvlTree::new();
        for (i, k) in keys.iter().enumerate() {
            tree.insert(k, i).unwrap();
        }
        for step in 0..64 {
            let i = order(step);
            assert_eq!(tree.remove(&keys[i]).unwrap(), Some(i));
            tree.check_invariants().unwrap();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }
}

#[test]
fn clear_and_destroy() {
    let mut tree = tree_of(&[("x", 1), ("y", 2), ("z", 3)]);
    tree.clear();
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.count_nodes(), 0);
    tree.check_invariants().unwrap();

    tree.insert("x", 4).unwrap();
    assert_eq!(tree.get("x").unwrap(), Some(&4));
    tree.destroy();

    AvlTree::<()>::new().destroy();
}
