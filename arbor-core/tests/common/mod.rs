//! Shared helpers for integration tests.

use arbor_core::{read, Document, Node};

/// Read a buffer that must parse into a tree.
pub fn parse(input: &str) -> Document<'_> {
    read(input)
        .expect("read failed")
        .expect("unrecognized format")
}

/// Assert two nodes have the same shape: name, value, attributes, and
/// recursively all children.
pub fn assert_same_shape(a: Node<'_, '_>, b: Node<'_, '_>) {
    assert_eq!(a.name(), b.name(), "names differ at {}", a.path());
    assert_eq!(a.value(), b.value(), "values differ at {}", a.path());

    let attrs = |n: Node<'_, '_>| -> Vec<(String, String)> {
        n.attributes()
            .iter()
            .map(|at| (at.name.to_string(), at.value.to_string()))
            .collect()
    };
    assert_eq!(attrs(a), attrs(b), "attributes differ at {}", a.path());

    let a_children: Vec<_> = a.children().collect();
    let b_children: Vec<_> = b.children().collect();
    assert_eq!(
        a_children.len(),
        b_children.len(),
        "child counts differ at {}",
        a.path()
    );
    for (ca, cb) in a_children.into_iter().zip(b_children) {
        assert_same_shape(ca, cb);
    }
}
