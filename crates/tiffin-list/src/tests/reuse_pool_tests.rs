use super::*;
use tiffin_core::AnyRenderable;
use tiffin_testing::{Text, TextView};

#[test]
fn dequeue_creates_when_nothing_is_free() {
    let mut pool = MemoryReusePool::new();
    let container = pool.dequeue("text");

    assert_eq!(container.reuse_identifier(), "text");
    assert!(!container.has_view());
    assert_eq!(
        pool.stats(),
        ReuseStats {
            created: 1,
            reused: 0,
            enqueued: 0
        }
    );
}

#[test]
fn enqueued_containers_come_back_unbound_with_their_view() {
    let text = AnyRenderable::new(Text::new("hello"));
    let mut pool = MemoryReusePool::new();
    let mut container = pool.dequeue(text.reuse_identifier());
    container.bind(&text);
    pool.enqueue(container);

    assert_eq!(pool.free_count(text.reuse_identifier()), 1);
    let reused = pool.dequeue(text.reuse_identifier());
    assert!(!reused.is_bound());
    assert_eq!(reused.typed_view::<TextView>().map(|view| view.reuses), Some(1));
    assert_eq!(pool.stats().reused, 1);
    assert_eq!(pool.total_free(), 0);
}

#[test]
fn identifiers_do_not_share_containers() {
    let mut pool = MemoryReusePool::new();
    let field = pool.dequeue("field");
    pool.enqueue(field);

    let text = pool.dequeue("text");
    assert_eq!(text.reuse_identifier(), "text");
    assert_eq!(pool.free_count("field"), 1);
    assert_eq!(pool.reuse_identifiers().collect::<Vec<_>>(), vec!["field"]);

    pool.clear();
    assert_eq!(pool.total_free(), 0);
}
