//! JSONP fallback support
//!
//! Each fallback request registers a callback name that is unique among the
//! requests currently in flight. The registration is held by a guard and
//! released when the guard drops, whichever way the request ends.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

const CALLBACK_PREFIX: &str = "geocode_callback_";

/// Callback names of in-flight fallback requests
#[derive(Debug, Default)]
pub(crate) struct CallbackRegistry {
    names: Mutex<HashSet<String>>,
}

impl CallbackRegistry {
    /// Reserve a fresh callback name
    pub(crate) fn register(self: &Arc<Self>) -> CallbackGuard {
        let mut names = self.names.lock();
        let name = loop {
            let candidate = format!(
                "{CALLBACK_PREFIX}{}_{}",
                Utc::now().timestamp_millis(),
                Uuid::new_v4().simple()
            );
            if names.insert(candidate.clone()) {
                break candidate;
            }
        };
        drop(names);

        CallbackGuard {
            registry: Arc::clone(self),
            name,
        }
    }

    /// Number of callbacks currently registered
    pub(crate) fn len(&self) -> usize {
        self.names.lock().len()
    }

    fn release(&self, name: &str) {
        self.names.lock().remove(name);
    }
}

/// Registration of one callback name, released on drop
#[derive(Debug)]
pub(crate) struct CallbackGuard {
    registry: Arc<CallbackRegistry>,
    name: String,
}

impl CallbackGuard {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for CallbackGuard {
    fn drop(&mut self) {
        self.registry.release(&self.name);
    }
}

/// Extract the JSON argument from `callback({...})` or `callback({...});`
///
/// Returns `None` unless the body invokes exactly the given callback.
pub(crate) fn unwrap_payload<'a>(body: &'a str, callback: &str) -> Option<&'a str> {
    let body = body.trim();
    let body = body.strip_prefix("/**/").unwrap_or(body).trim_start();
    let rest = body.strip_prefix(callback)?.trim_start();
    let rest = rest.strip_prefix('(')?;
    let rest = rest.trim_end();
    let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
    rest.strip_suffix(')')
}
