use crate::Resource;

/// Per-resource container: latest collection, focused entity and lifecycle flags.
///
/// Only [`crate::update`] writes to it; readers get clones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityState<T> {
    loading: bool,
    updating: bool,
    update_success: bool,
    error_message: Option<String>,
    entities: Vec<T>,
    entity: T,
    total_items: Option<u64>,
}

impl<T: Resource> EntityState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn updating(&self) -> bool {
        self.updating
    }

    /// One-shot: true after a mutation settled successfully, until the next
    /// operation starts or the state is reset.
    pub fn update_success(&self) -> bool {
        self.update_success
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Server response order of the last successful list fetch.
    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// `X-Total-Count` of the last successful list fetch, if the server sent one.
    pub fn total_items(&self) -> Option<u64> {
        self.total_items
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.error_message = None;
        self.update_success = false;
        self.loading = true;
    }

    pub(crate) fn begin_mutation(&mut self) {
        self.error_message = None;
        self.update_success = false;
        self.updating = true;
    }

    pub(crate) fn replace_entities(&mut self, entities: Vec<T>, total_items: Option<u64>) {
        self.loading = false;
        self.entities = entities;
        self.total_items = total_items;
    }

    pub(crate) fn focus(&mut self, entity: T) {
        self.loading = false;
        self.entity = entity;
    }

    pub(crate) fn mutation_succeeded(&mut self, entity: T) {
        self.updating = false;
        self.loading = false;
        self.update_success = true;
        self.entity = entity;
    }

    pub(crate) fn deletion_succeeded(&mut self) {
        self.updating = false;
        self.update_success = true;
        self.entity = T::default();
    }

    pub(crate) fn fetch_failed(&mut self, message: String) {
        self.loading = false;
        self.error_message = Some(message);
    }

    pub(crate) fn mutation_failed(&mut self, message: String) {
        self.updating = false;
        self.update_success = false;
        self.error_message = Some(message);
    }
}
