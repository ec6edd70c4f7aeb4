//! Checks that syntax trees release exactly what they allocated.
//!
//! A counting global allocator tracks live allocations per thread, so the
//! harness threads running next to the test cannot disturb the count.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use erupt::{
    ast::ast::{Node, NodeList},
    config::Config,
    lexer::lexer::tokenize,
    parser::{lookups::LOGICAL_NOT, parser::parse},
};

struct CountingAllocator;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

fn live() -> isize {
    LIVE.with(Cell::get)
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            adjust(1);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        adjust(-1);
        System.dealloc(ptr, layout);
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

const SOURCE: &str = "\
use io
struct Pair { left, mut right = [1, 2.5, \"three\"] }
module m {
  f a b => {
    if a < b { return -a } else unless b { return ~b } else { return a ** b }
  }
  match f(1, 2) {
    0 => g()
    n => h(n)
  }
}
";

fn build_and_drop(source: &str) -> usize {
    let config = Config::new("alloc.er");
    let (tokens, _) = tokenize(source, &config);
    let (nodes, diagnostics) = parse(tokens, &config);

    assert!(diagnostics.is_empty());
    nodes.len()
}

#[test]
fn test_trees_release_every_allocation() {
    // the operator tables are initialised once and live for the process
    build_and_drop(SOURCE);

    let before = live();
    assert_eq!(build_and_drop(SOURCE), 3);
    assert_eq!(live(), before);

    let before = live();
    let mut node = Node::call("x", NodeList::new());
    for _ in 0..100_000 {
        node = Node::unary_expr(LOGICAL_NOT, node);
    }
    let nested = NodeList::from(vec![Node::module("deep", NodeList::from(vec![node]))]);
    assert!(live() > before);

    drop(nested);
    assert_eq!(live(), before);
}
