//! In-memory work item store for escalation tests and local runs.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::escalation::{
    domain::{Comment, PatchDocument, ProjectName, WorkItem, WorkItemId, fields},
    ports::{WorkItemStore, WorkItemStoreError, WorkItemStoreResult},
};

/// Store operation, used to record calls and inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// [`WorkItemStore::get_work_item`].
    Get,
    /// [`WorkItemStore::create_work_item`].
    Create,
    /// [`WorkItemStore::update_work_item`].
    Update,
    /// [`WorkItemStore::get_comments`].
    ListComments,
}

/// One recorded store call.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    /// A work item was read.
    Get(WorkItemId),
    /// A work item was created.
    Create {
        /// Target project.
        project: String,
        /// Work item type name.
        type_name: String,
        /// Submitted patch document.
        document: PatchDocument,
    },
    /// A work item was updated.
    Update {
        /// Target work item.
        id: WorkItemId,
        /// Submitted patch document.
        document: PatchDocument,
    },
    /// Comments of a work item were listed.
    ListComments {
        /// Project the listing was scoped to.
        project: String,
        /// Listed work item.
        id: WorkItemId,
    },
}

/// Thread-safe in-memory work item store.
///
/// Writing `System.History` appends a comment stamped with the store clock,
/// as the remote service does.
pub struct InMemoryWorkItemStore<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryStoreState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryWorkItemStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug)]
struct InMemoryStoreState {
    next_id: u32,
    next_comment_id: u64,
    work_items: BTreeMap<WorkItemId, StoredWorkItem>,
    journal: Vec<StoreCall>,
    failing_operations: HashSet<StoreOperation>,
    failing_update_calls: HashMap<usize, String>,
    update_calls: usize,
}

#[derive(Debug, Clone)]
struct StoredWorkItem {
    work_item: WorkItem,
    project: Option<String>,
    type_name: Option<String>,
    comments: Vec<Comment>,
}

impl Default for InMemoryStoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            next_comment_id: 1,
            work_items: BTreeMap::new(),
            journal: Vec::new(),
            failing_operations: HashSet::new(),
            failing_update_calls: HashMap::new(),
            update_calls: 0,
        }
    }
}

fn lock_error(err: impl std::fmt::Display) -> WorkItemStoreError {
    WorkItemStoreError::transport(std::io::Error::other(err.to_string()))
}

fn injected_failure(operation: StoreOperation) -> WorkItemStoreError {
    WorkItemStoreError::transport(std::io::Error::other(format!(
        "injected {operation:?} failure"
    )))
}

impl<C> InMemoryWorkItemStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryStoreState::default())),
            clock: Arc::new(clock),
        }
    }

    /// Seeds a work item and its comments. Later identifiers are assigned
    /// above the highest seeded identifier.
    ///
    /// # Errors
    ///
    /// Returns store transport errors when lock acquisition fails.
    pub fn insert(&self, work_item: WorkItem, comments: Vec<Comment>) -> WorkItemStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let id = work_item.id();
        state.next_id = state.next_id.max(id.value().saturating_add(1));
        let next_comment_id = comments
            .iter()
            .map(|comment| comment.id.saturating_add(1))
            .max()
            .unwrap_or(1);
        state.next_comment_id = state.next_comment_id.max(next_comment_id);
        state.work_items.insert(
            id,
            StoredWorkItem {
                work_item,
                project: None,
                type_name: None,
                comments,
            },
        );
        Ok(())
    }

    /// Makes every subsequent call of `operation` fail.
    ///
    /// # Errors
    ///
    /// Returns store transport errors when lock acquisition fails.
    pub fn fail_on(&self, operation: StoreOperation) -> WorkItemStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_operations.insert(operation);
        Ok(())
    }

    /// Makes the `call`-th update (1-based) fail with `message`.
    ///
    /// # Errors
    ///
    /// Returns store transport errors when lock acquisition fails.
    pub fn fail_update_call(
        &self,
        call: usize,
        message: impl Into<String>,
    ) -> WorkItemStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_update_calls.insert(call, message.into());
        Ok(())
    }

    /// Returns all recorded calls in order.
    ///
    /// # Errors
    ///
    /// Returns store transport errors when lock acquisition fails.
    pub fn journal(&self) -> WorkItemStoreResult<Vec<StoreCall>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.journal.clone())
    }

    /// Returns a stored work item without recording a call.
    ///
    /// # Errors
    ///
    /// Returns store transport errors when lock acquisition fails.
    pub fn peek(&self, id: WorkItemId) -> WorkItemStoreResult<Option<WorkItem>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .work_items
            .get(&id)
            .map(|stored| stored.work_item.clone()))
    }

    /// Returns the comments of a work item without recording a call.
    ///
    /// # Errors
    ///
    /// Returns store transport errors when lock acquisition fails.
    pub fn peek_comments(&self, id: WorkItemId) -> WorkItemStoreResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .work_items
            .get(&id)
            .map(|stored| stored.comments.clone())
            .unwrap_or_default())
    }

    /// Returns identifiers of work items created through the store with
    /// the given type name.
    ///
    /// # Errors
    ///
    /// Returns store transport errors when lock acquisition fails.
    pub fn created_of_type(&self, type_name: &str) -> WorkItemStoreResult<Vec<WorkItemId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .work_items
            .iter()
            .filter(|(_, stored)| stored.type_name.as_deref() == Some(type_name))
            .map(|(id, _)| *id)
            .collect())
    }

    /// Returns the project a created work item was filed in.
    ///
    /// # Errors
    ///
    /// Returns store transport errors when lock acquisition fails.
    pub fn project_of(&self, id: WorkItemId) -> WorkItemStoreResult<Option<String>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .work_items
            .get(&id)
            .and_then(|stored| stored.project.clone()))
    }

    fn apply(
        &self,
        stored: &mut StoredWorkItem,
        next_comment_id: &mut u64,
        document: &PatchDocument,
    ) {
        for operation in document {
            if let Some(relation) = operation.relation() {
                stored.work_item.push_relation(relation);
                continue;
            }
            let Some(field) = operation.field_name() else {
                continue;
            };
            if field == fields::HISTORY {
                let text = operation.value.as_str().unwrap_or_default();
                stored
                    .comments
                    .push(Comment::new(*next_comment_id, text, self.clock.utc()));
                *next_comment_id = next_comment_id.saturating_add(1);
            } else {
                stored.work_item.set_field(field, operation.value.clone());
            }
        }
    }
}

fn check_injected(
    state: &InMemoryStoreState,
    operation: StoreOperation,
) -> WorkItemStoreResult<()> {
    if state.failing_operations.contains(&operation) {
        return Err(injected_failure(operation));
    }
    Ok(())
}

#[async_trait]
impl<C> WorkItemStore for InMemoryWorkItemStore<C>
where
    C: Clock + Send + Sync,
{
    async fn get_work_item(&self, id: WorkItemId) -> WorkItemStoreResult<WorkItem> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.journal.push(StoreCall::Get(id));
        check_injected(&state, StoreOperation::Get)?;
        state
            .work_items
            .get(&id)
            .map(|stored| stored.work_item.clone())
            .ok_or(WorkItemStoreError::NotFound(id))
    }

    async fn create_work_item(
        &self,
        project: &ProjectName,
        type_name: &str,
        document: &PatchDocument,
    ) -> WorkItemStoreResult<WorkItem> {
        let mut guard = self.state.write().map_err(lock_error)?;
        let state = &mut *guard;
        state.journal.push(StoreCall::Create {
            project: project.as_str().to_owned(),
            type_name: type_name.to_owned(),
            document: document.clone(),
        });
        check_injected(state, StoreOperation::Create)?;

        let id = WorkItemId::new(state.next_id).map_err(WorkItemStoreError::transport)?;
        state.next_id = state.next_id.saturating_add(1);
        let mut stored = StoredWorkItem {
            work_item: WorkItem::new(id)
                .with_field(fields::TEAM_PROJECT, project.as_str())
                .with_field("System.WorkItemType", type_name),
            project: Some(project.as_str().to_owned()),
            type_name: Some(type_name.to_owned()),
            comments: Vec::new(),
        };
        self.apply(&mut stored, &mut state.next_comment_id, document);
        let created = stored.work_item.clone();
        state.work_items.insert(id, stored);
        Ok(created)
    }

    async fn update_work_item(
        &self,
        id: WorkItemId,
        document: &PatchDocument,
    ) -> WorkItemStoreResult<WorkItem> {
        let mut guard = self.state.write().map_err(lock_error)?;
        let state = &mut *guard;
        state.journal.push(StoreCall::Update {
            id,
            document: document.clone(),
        });
        state.update_calls = state.update_calls.saturating_add(1);
        check_injected(state, StoreOperation::Update)?;
        if let Some(message) = state.failing_update_calls.get(&state.update_calls) {
            return Err(WorkItemStoreError::Rejected {
                status: 400,
                message: message.clone(),
            });
        }

        let stored = state
            .work_items
            .get_mut(&id)
            .ok_or(WorkItemStoreError::NotFound(id))?;
        self.apply(stored, &mut state.next_comment_id, document);
        Ok(stored.work_item.clone())
    }

    async fn get_comments(
        &self,
        project: &ProjectName,
        id: WorkItemId,
    ) -> WorkItemStoreResult<Vec<Comment>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.journal.push(StoreCall::ListComments {
            project: project.as_str().to_owned(),
            id,
        });
        check_injected(&state, StoreOperation::ListComments)?;
        state
            .work_items
            .get(&id)
            .map(|stored| stored.comments.clone())
            .ok_or(WorkItemStoreError::NotFound(id))
    }
}
