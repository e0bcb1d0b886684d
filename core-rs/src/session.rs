//! Process-wide session of declarations and instances
//!
//! Exactly one session is current at a time. It is created lazily the first
//! time anything asks for it and lives until a caller replaces it; there is
//! no teardown. Declaring a class or property and constructing an instance
//! always register into whichever session is current at that moment.
//!
//! The session only indexes: declarations and instances stay shared with
//! whoever else holds them.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::model::Instance;
use crate::registry::{ClassDeclaration, PropertyDeclaration};

static CURRENT_SESSION: Lazy<RwLock<Arc<Session>>> =
    Lazy::new(|| RwLock::new(Arc::new(Session::new())));

#[derive(Debug, Default)]
struct SessionIndex {
    classes: Vec<Arc<ClassDeclaration>>,
    properties: Vec<Arc<PropertyDeclaration>>,
    instances: Vec<Arc<Instance>>,
}

/// Index of everything declared or constructed while the session was current
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    index: Mutex<SessionIndex>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh, empty session that is not yet current
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            index: Mutex::new(SessionIndex::default()),
        }
    }

    /// Start a fresh session and make it current
    pub fn begin() -> Arc<Session> {
        let session = Arc::new(Session::new());
        replace_current(Arc::clone(&session));
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn index(&self) -> MutexGuard<'_, SessionIndex> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register_class(&self, class: Arc<ClassDeclaration>) {
        self.index().classes.push(class);
    }

    pub fn register_property(&self, property: Arc<PropertyDeclaration>) {
        self.index().properties.push(property);
    }

    pub fn register_instance(&self, instance: Arc<Instance>) {
        self.index().instances.push(instance);
    }

    /// Classes declared since the session started, in declaration order
    pub fn classes(&self) -> Vec<Arc<ClassDeclaration>> {
        self.index().classes.clone()
    }

    /// Properties declared since the session started, in declaration order
    pub fn properties(&self) -> Vec<Arc<PropertyDeclaration>> {
        self.index().properties.clone()
    }

    /// Instances constructed since the session started, in construction order
    pub fn instances(&self) -> Vec<Arc<Instance>> {
        self.index().instances.clone()
    }

    /// Find a registered instance by identifier
    pub fn instance(&self, uri: &str) -> Option<Arc<Instance>> {
        self.index()
            .instances
            .iter()
            .find(|i| i.uri() == uri)
            .cloned()
    }

    /// Registered instances of the class with this identifier
    pub fn instances_of(&self, class_identifier: &str) -> Vec<Arc<Instance>> {
        self.index()
            .instances
            .iter()
            .filter(|i| i.class().identifier() == class_identifier)
            .cloned()
            .collect()
    }
}

/// The session declarations and instances currently register into
pub fn current_session() -> Arc<Session> {
    let slot = CURRENT_SESSION.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&slot)
}

/// Make `session` current and hand back the one it replaces
pub fn replace_current(session: Arc<Session>) -> Arc<Session> {
    let mut slot = CURRENT_SESSION.write().unwrap_or_else(PoisonError::into_inner);
    let previous = std::mem::replace(&mut *slot, session);

    let (classes, instances) = {
        let index = previous.index();
        (index.classes.len(), index.instances.len())
    };
    info!(
        previous = %previous.id(),
        current = %slot.id(),
        classes,
        instances,
        "replaced current session"
    );
    previous
}
