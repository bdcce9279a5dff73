//! Directory list view controller.
//!
//! Holds the client-side list state and is the single mutation entry point
//! for it. Rendering layers read the state through the accessors and feed
//! user actions and timer events back in.
//!
//! Deletes are optimistic and deferred behind an undo window:
//!
//! ```text
//! Idle --delete--> PendingUndo --undo--------------------> Restored
//!                              --countdown 0 / dismiss--> CommittedDeleted
//! ```
//!
//! Only one delete can be pending. Deleting another employee while one is
//! pending commits the earlier delete first.

use tokio::sync::mpsc::UnboundedSender;

use staffdir_core::{Department, Employee, EmployeeInput};

use crate::api::EmployeeApi;
use crate::error::ClientError;
use crate::filter::{self, DepartmentFilter};
use crate::notification::{Toast, ToastKind, UndoPrompt, COUNTDOWN_UNIT, TOAST_LIFETIME};
use crate::timer::{Deadline, Ticker, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// The list fetch failed; `retry` re-issues it.
    Failed(String),
}

/// What the employee form is open for.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Employee),
}

impl FormMode {
    /// Initial field values of the form.
    pub fn initial_input(&self) -> EmployeeInput {
        match self {
            FormMode::Create => EmployeeInput {
                department: Some(Department::Engineering.as_str().to_string()),
                ..EmployeeInput::default()
            },
            FormMode::Edit(employee) => EmployeeInput::from(employee),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Required fields were blank; nothing was sent.
    Rejected,
    /// The server refused the write; state is unchanged.
    Failed,
}

/// The single pending-undo slot.
#[derive(Debug)]
struct PendingDelete {
    employee: Employee,
    undo_invoked: bool,
}

pub struct DirectoryController<A> {
    api: A,
    employees: Vec<Employee>,
    search_term: String,
    department_filter: DepartmentFilter,
    load_state: LoadState,
    form: Option<FormMode>,
    pending: Option<PendingDelete>,
    undo_prompt: Option<UndoPrompt>,
    toast: Option<Toast>,
    events: Option<UnboundedSender<UiEvent>>,
    undo_timer: Option<Ticker>,
    toast_timer: Option<Deadline>,
    undo_token: u64,
    toast_token: u64,
    last_token: u64,
}

impl<A: EmployeeApi> DirectoryController<A> {
    /// Controller without timers. Countdown and toast expiry are driven
    /// by calling [`tick`](Self::tick) and [`dismiss_toast`](Self::dismiss_toast).
    pub fn new(api: A) -> Self {
        Self {
            api,
            employees: Vec::new(),
            search_term: String::new(),
            department_filter: DepartmentFilter::All,
            load_state: LoadState::Loading,
            form: None,
            pending: None,
            undo_prompt: None,
            toast: None,
            events: None,
            undo_timer: None,
            toast_timer: None,
            undo_token: 0,
            toast_token: 0,
            last_token: 0,
        }
    }

    /// Controller whose countdown and toast timers post to `events`.
    /// The caller feeds received events to [`handle`](Self::handle).
    /// Must be used inside a tokio runtime.
    pub fn with_timers(api: A, events: UnboundedSender<UiEvent>) -> Self {
        Self {
            events: Some(events),
            ..Self::new(api)
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn department_filter(&self) -> DepartmentFilter {
        self.department_filter
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn form(&self) -> Option<&FormMode> {
        self.form.as_ref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn undo_prompt(&self) -> Option<&UndoPrompt> {
        self.undo_prompt.as_ref()
    }

    /// The employee waiting in the undo window, if any.
    pub fn pending_delete(&self) -> Option<&Employee> {
        self.pending.as_ref().map(|p| &p.employee)
    }

    /// Employees passing the current search and department filter.
    /// Recomputed on every call.
    pub fn visible(&self) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| filter::matches(e, &self.search_term, self.department_filter))
            .collect()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_department_filter(&mut self, filter: DepartmentFilter) {
        self.department_filter = filter;
    }

    /// Fetch the full list, replacing the local one on success.
    pub async fn load(&mut self) {
        self.load_state = LoadState::Loading;

        match self.api.list().await {
            Ok(mut employees) => {
                // A refetch must not resurrect the employee in the undo window
                if let Some(pending) = &self.pending {
                    employees.retain(|e| e.id != pending.employee.id);
                }
                tracing::debug!("Loaded {} employees", employees.len());
                self.employees = employees;
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!("Failed to load employees: {}", e);
                self.load_state = LoadState::Failed(e.user_message());
                self.show_toast("Failed to load employees", ToastKind::Error);
            }
        }
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(FormMode::Create);
    }

    /// Open the form on an existing employee. Returns false if `id` is not listed.
    pub fn open_edit_form(&mut self, id: &str) -> bool {
        match self.employees.iter().find(|e| e.id == id) {
            Some(employee) => {
                self.form = Some(FormMode::Edit(employee.clone()));
                true
            }
            None => false,
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Submit the form. Updates when editing, creates otherwise.
    /// The form closes on success only.
    pub async fn save(&mut self, input: EmployeeInput) -> SaveOutcome {
        if [&input.name, &input.email, &input.position]
            .into_iter()
            .any(|field| is_blank(field))
        {
            self.show_toast("Please fill in all required fields", ToastKind::Warning);
            return SaveOutcome::Rejected;
        }

        let editing_id = match &self.form {
            Some(FormMode::Edit(employee)) => Some(employee.id.clone()),
            _ => None,
        };

        match editing_id {
            Some(id) => match self.api.update(&id, &input).await {
                Ok(updated) => {
                    if let Some(slot) = self.employees.iter_mut().find(|e| e.id == updated.id) {
                        *slot = updated;
                    }
                    self.show_toast("Employee updated successfully!", ToastKind::Success);
                }
                Err(e) => return self.save_failed(e),
            },
            None => match self.api.create(&input).await {
                Ok(created) => {
                    self.employees.insert(0, created);
                    self.show_toast("Employee added successfully!", ToastKind::Success);
                }
                Err(e) => return self.save_failed(e),
            },
        }

        self.form = None;
        SaveOutcome::Saved
    }

    fn save_failed(&mut self, error: ClientError) -> SaveOutcome {
        tracing::warn!("Failed to save employee: {}", error);
        self.show_toast(error.user_message(), ToastKind::Error);
        SaveOutcome::Failed
    }

    /// Remove an employee from the list and open the undo window.
    /// Returns false if `id` is not listed.
    pub async fn delete(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.pending.is_some() {
            self.finalize_delete().await;
        }
        let Some(index) = self.employees.iter().position(|e| e.id == id) else {
            return false;
        };

        let employee = self.employees.remove(index);
        tracing::debug!("Delete pending for {} ({})", employee.name, employee.id);

        self.undo_prompt = Some(UndoPrompt::new(&employee.name));
        self.pending = Some(PendingDelete {
            employee,
            undo_invoked: false,
        });

        let token = self.next_token();
        self.undo_token = token;
        self.undo_timer = self
            .events
            .clone()
            .map(|tx| Ticker::start(COUNTDOWN_UNIT, UiEvent::UndoTick { token }, tx));
        true
    }

    /// Put the pending employee back. Effective once per pending delete.
    pub fn undo(&mut self) -> bool {
        if self.undo_prompt.is_none() {
            return false;
        }
        let Some(mut pending) = self.pending.take() else {
            return false;
        };
        if pending.undo_invoked {
            return false;
        }
        pending.undo_invoked = true;

        let employee = pending.employee;
        tracing::debug!("Undo delete for {}", employee.name);
        if !self.contains(&employee.id) {
            self.employees.push(employee);
        }
        self.show_toast("Delete undone successfully", ToastKind::Info);
        self.close_undo_prompt();
        true
    }

    /// One countdown unit. Commits the delete when the countdown runs out.
    pub async fn tick(&mut self) {
        let expired = match self.undo_prompt.as_mut() {
            Some(prompt) => prompt.tick(),
            None => return,
        };
        if expired {
            self.finalize_delete().await;
        }
    }

    /// Close the undo prompt early, committing the delete.
    pub async fn dismiss_undo(&mut self) {
        self.finalize_delete().await;
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
        self.toast_timer = None;
    }

    /// Apply a timer event. Events for elements that have since closed or
    /// been replaced are ignored.
    pub async fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::UndoTick { token }
                if self.undo_prompt.is_some() && token == self.undo_token =>
            {
                self.tick().await;
            }
            UiEvent::ToastExpired { token }
                if self.toast.is_some() && token == self.toast_token =>
            {
                self.dismiss_toast();
            }
            stale => tracing::trace!("Ignoring stale {:?}", stale),
        }
    }

    /// Issue the server delete for the pending employee unless undo was
    /// invoked. The outcome is applied even though the prompt is gone.
    async fn finalize_delete(&mut self) {
        self.close_undo_prompt();

        let Some(pending) = self.pending.take() else {
            return;
        };
        if pending.undo_invoked {
            return;
        }
        let employee = pending.employee;

        match self.api.delete(&employee.id).await {
            Ok(()) => {
                tracing::info!("Deleted employee {}", employee.id);
                self.show_toast(
                    format!("{} permanently deleted", employee.name),
                    ToastKind::Success,
                );
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("Employee {} was already gone", employee.id);
                self.show_toast(format!("{} removed", employee.name), ToastKind::Success);
            }
            Err(e) => {
                tracing::warn!("Failed to delete employee {}: {}", employee.id, e);
                let message = format!("Failed to delete: {}", e.user_message());
                if !self.contains(&employee.id) {
                    self.employees.push(employee);
                }
                self.show_toast(message, ToastKind::Error);
            }
        }
    }

    fn close_undo_prompt(&mut self) {
        self.undo_prompt = None;
        self.undo_timer = None;
    }

    fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
        });

        let token = self.next_token();
        self.toast_token = token;
        self.toast_timer = self
            .events
            .clone()
            .map(|tx| Deadline::start(TOAST_LIFETIME, UiEvent::ToastExpired { token }, tx));
    }

    fn contains(&self, id: &str) -> bool {
        self.employees.iter().any(|e| e.id == id)
    }

    fn next_token(&mut self) -> u64 {
        self.last_token += 1;
        self.last_token
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |v| v.trim().is_empty())
}
