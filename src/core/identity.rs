//! Thread, task and host naming used when capturing call contexts

use parking_lot::RwLock;
use std::cell::RefCell;

static HOST_NAME: RwLock<String> = parking_lot::const_rwlock(String::new());

// Thread-local caches so capturing a context does not hit the thread handle every time
thread_local! {
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static TASK_NAME: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Register a name for the calling thread. Overrides the std thread name.
pub fn set_thread_name(name: impl Into<String>) {
    let name = name.into();
    THREAD_NAME_CACHE.with(|cache| *cache.borrow_mut() = Some(name));
}

/// Registered name of the calling thread.
///
/// Falls back to the std thread name, then to the debug form of the thread id.
pub fn thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                let current = std::thread::current();
                current
                    .name()
                    .map(String::from)
                    .unwrap_or_else(|| format!("{:?}", current.id()))
            })
            .clone()
    })
}

/// Name the task currently running on this thread.
pub fn set_task_name(name: impl Into<String>) {
    let name = name.into();
    TASK_NAME.with(|task| *task.borrow_mut() = name);
}

pub fn clear_task_name() {
    TASK_NAME.with(|task| task.borrow_mut().clear());
}

/// Task running on this thread, empty if none was set.
pub fn task_name() -> String {
    TASK_NAME.with(|task| task.borrow().clone())
}

pub fn set_host_name(name: impl Into<String>) {
    *HOST_NAME.write() = name.into();
}

/// Process-wide host name, empty unless configured.
pub fn host_name() -> String {
    HOST_NAME.read().clone()
}
