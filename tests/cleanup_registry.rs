// ==============================================
// CLEANUP REGISTRY TESTS (integration)
// ==============================================
//
// Best-effort teardown: every registered task runs once, failures are
// isolated from each other, and re-registration replaces the action.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use memokit::cleanup::CleanupRegistry;
use memokit::error::CleanupError;

fn tally() -> Rc<RefCell<Vec<&'static str>>> {
    Rc::new(RefCell::new(Vec::new()))
}

// ==============================================
// Failure Isolation
// ==============================================

mod failure_isolation {
    use super::*;

    #[test]
    fn failing_middle_task_does_not_stop_others() {
        let runs = tally();
        let mut registry = CleanupRegistry::new();

        let r = Rc::clone(&runs);
        registry.register("first", move || r.borrow_mut().push("first"));
        let r = Rc::clone(&runs);
        registry.register_fallible("second", move || {
            r.borrow_mut().push("second");
            Err::<(), _>("socket already closed")
        });
        let r = Rc::clone(&runs);
        registry.register("third", move || r.borrow_mut().push("third"));

        let report = registry.cleanup_all();

        assert_eq!(*runs.borrow(), vec!["first", "second", "third"]);
        assert_eq!(report.ran, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name(), "second");
        assert!(registry.is_empty());
    }

    #[test]
    fn panicking_task_is_contained() {
        let runs = tally();
        let mut registry = CleanupRegistry::new();

        registry.register("explodes", || panic!("listener gone"));
        let r = Rc::clone(&runs);
        registry.register("after", move || r.borrow_mut().push("after"));

        let report = registry.cleanup_all();

        assert_eq!(*runs.borrow(), vec!["after"]);
        assert!(matches!(
            &report.failures[..],
            [CleanupError::Panicked { name, message }]
                if name == "explodes" && message == "listener gone"
        ));
    }

    #[test]
    fn second_cleanup_all_runs_nothing() {
        let count = Rc::new(Cell::new(0));
        let mut registry = CleanupRegistry::new();
        let c = Rc::clone(&count);
        registry.register("once", move || c.set(c.get() + 1));

        assert_eq!(registry.cleanup_all().ran, 1);
        assert_eq!(registry.cleanup_all().ran, 0);
        assert_eq!(count.get(), 1);
    }
}

// ==============================================
// Named Cleanup
// ==============================================

mod named_cleanup {
    use super::*;

    #[test]
    fn last_registration_wins_and_runs_once() {
        let runs = tally();
        let mut registry = CleanupRegistry::new();

        let r = Rc::clone(&runs);
        registry.register("timer", move || r.borrow_mut().push("old"));
        let r = Rc::clone(&runs);
        registry.register("timer", move || r.borrow_mut().push("new"));

        assert!(registry.cleanup("timer").unwrap());
        assert!(!registry.cleanup("timer").unwrap());
        assert_eq!(*runs.borrow(), vec!["new"]);
    }

    #[test]
    fn unknown_name_is_not_an_error() {
        let mut registry = CleanupRegistry::new();
        assert!(!registry.cleanup("never-registered").unwrap());
    }

    #[test]
    fn named_failure_is_reported_and_task_is_gone() {
        let mut registry = CleanupRegistry::new();
        registry.register_fallible("flush", || Err::<(), _>("read-only"));
        registry.register("other", || {});

        let err = registry.cleanup("flush").unwrap_err();
        assert_eq!(err.name(), "flush");
        assert!(!registry.contains("flush"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["other"]);
    }
}
