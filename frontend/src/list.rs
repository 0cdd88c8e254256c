//! Resource list controller.
//!
//! The shared pagination + role-gated-delete state machine behind the
//! Users and Admins screens. Transitions are explicit and synchronous;
//! the view components own the actual network calls and feed results back
//! through `commit_page` / `finish_delete`. A generation counter ties each
//! in-flight fetch to the page state that triggered it, so a stale
//! response can never overwrite a newer one.

use crate::api::RequestError;
use cvadmin_shared::{AdminRole, Claims};

pub const PAGE_SIZES: [u64; 3] = [5, 10, 25];

// =========================================================
// Local permission pre-checks
// =========================================================

/// Client-side pre-check rejection. Shown inline; never sent to the
/// server, which re-enforces the same rules independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDenied(pub String);

impl core::fmt::Display for PermissionDenied {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Viewers may not delete end users.
pub fn user_delete_precheck(role: AdminRole) -> Result<(), PermissionDenied> {
    if role.can_delete_users() {
        Ok(())
    } else {
        Err(PermissionDenied(
            "Viewers are not allowed to delete users".to_string(),
        ))
    }
}

/// Deleting an admin requires `super_admin`, and no one deletes their own
/// account regardless of role.
pub fn admin_delete_precheck(claims: &Claims, target_id: i64) -> Result<(), PermissionDenied> {
    if claims.id == target_id {
        return Err(PermissionDenied(
            "You cannot delete your own account".to_string(),
        ));
    }
    if claims.role != AdminRole::SuperAdmin {
        return Err(PermissionDenied(
            "Only super admins can delete other admins".to_string(),
        ));
    }
    Ok(())
}

// =========================================================
// Server error mapping
// =========================================================

/// Friendlier wording for known user-deletion failures. The analyses
/// table keeps a non-null owner column, so deleting a user with analyses
/// surfaces as a constraint violation.
pub fn map_user_delete_error(err: &RequestError) -> String {
    if err.message.contains("violates not-null constraint") {
        return "Cannot delete user because they have CV analyses. \
                Please delete their analyses first."
            .to_string();
    }
    err.message.clone()
}

/// Friendlier wording for known admin-deletion failures.
pub fn map_admin_delete_error(err: &RequestError) -> String {
    match err.status {
        Some(403) => "Only super admins can delete other admins".to_string(),
        Some(400) => "You cannot delete your own account".to_string(),
        Some(404) => "Admin not found".to_string(),
        _ => err.message.clone(),
    }
}

// =========================================================
// Page state
// =========================================================

/// Client-side pagination state, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: u64,
    pub size: u64,
}

impl PageState {
    pub fn new(size: u64) -> Self {
        Self { page: 0, size }
    }

    /// The 1-based page number the API expects.
    pub fn wire_page(&self) -> u64 {
        self.page + 1
    }

    /// Changing the page size resets to the first page so the request can
    /// never point past the new bound.
    pub fn set_size(&mut self, size: u64) {
        self.size = size;
        self.page = 0;
    }
}

// =========================================================
// List state machine
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Loaded,
    Errored(String),
}

/// Outcome fed back after a confirmed deletion round-trip.
pub enum DeleteOutcome {
    Deleted,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub phase: ListPhase,
    pub records: Vec<T>,
    pub total: u64,
    pub page: PageState,
    /// Ties in-flight fetches to the page state that started them.
    generation: u64,
    pub pending_delete: Option<T>,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl<T: Clone> ListState<T> {
    pub fn new(page_size: u64) -> Self {
        Self {
            phase: ListPhase::Loading,
            records: Vec::new(),
            total: 0,
            page: PageState::new(page_size),
            generation: 0,
            pending_delete: None,
            error: None,
            success: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.success = None;
    }

    /// Enter `Loading` and return the generation tag for this fetch.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.phase = ListPhase::Loading;
        self.generation
    }

    /// Commit a fetch result. Returns false (and changes nothing) when a
    /// newer fetch has started since `generation` was handed out.
    pub fn commit_page(
        &mut self,
        generation: u64,
        result: Result<(Vec<T>, u64), String>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok((records, total)) => {
                self.records = records;
                self.total = total;
                self.phase = ListPhase::Loaded;
            }
            Err(message) => {
                self.phase = ListPhase::Errored(message);
            }
        }
        true
    }

    /// Move to another page. Returns whether anything changed (the caller
    /// refetches only on change).
    pub fn set_page(&mut self, page: u64) -> bool {
        if self.page.page == page {
            return false;
        }
        self.clear_messages();
        self.page.page = page;
        true
    }

    /// Change the page size; always resets to page 0.
    pub fn set_page_size(&mut self, size: u64) -> bool {
        if self.page.size == size {
            return false;
        }
        self.clear_messages();
        self.page.set_size(size);
        true
    }

    /// Number of the last page under the current total, for disabling the
    /// next-page control.
    pub fn last_page(&self) -> u64 {
        if self.total == 0 {
            return 0;
        }
        (self.total - 1) / self.page.size
    }

    /// Run the permission pre-check and, if it passes, arm the
    /// confirmation dialog for `record`. A rejection becomes an inline
    /// error and the dialog never opens.
    pub fn request_delete(
        &mut self,
        record: T,
        precheck: Result<(), PermissionDenied>,
    ) -> bool {
        self.clear_messages();
        match precheck {
            Ok(()) => {
                self.pending_delete = Some(record);
                true
            }
            Err(denied) => {
                self.error = Some(denied.0);
                false
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Close the confirmation workflow. The dialog always closes and the
    /// pending target is always cleared, success or not. On success the
    /// message names the deleted record via `username_of`.
    pub fn finish_delete(
        &mut self,
        outcome: DeleteOutcome,
        username_of: impl Fn(&T) -> String,
    ) {
        let target = self.pending_delete.take();
        match outcome {
            DeleteOutcome::Deleted => {
                let name = target.as_ref().map(&username_of).unwrap_or_default();
                self.success = Some(format!("{} has been successfully deleted", name));
            }
            DeleteOutcome::Failed(message) => {
                self.error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvadmin_shared::Claims;

    fn claims(role: AdminRole, id: i64) -> Claims {
        Claims {
            sub: "self".to_string(),
            id,
            role,
            exp: i64::MAX / 1000,
        }
    }

    #[test]
    fn page_size_change_resets_page_index() {
        let mut state: ListState<String> = ListState::new(10);
        state.set_page(3);
        assert!(state.set_page_size(25));
        assert_eq!(state.page.page, 0);
        assert_eq!(state.page.size, 25);
        // Same size again is a no-op, so no extra fetch is triggered.
        assert!(!state.set_page_size(25));
    }

    #[test]
    fn wire_page_is_one_based() {
        let mut page = PageState::new(10);
        assert_eq!(page.wire_page(), 1);
        page.page = 2;
        assert_eq!(page.wire_page(), 3);
    }

    #[test]
    fn stale_fetch_never_overwrites_newer_state() {
        let mut state: ListState<&str> = ListState::new(10);
        let stale = state.begin_fetch();
        let fresh = state.begin_fetch();

        assert!(state.commit_page(fresh, Ok((vec!["new"], 1))));
        assert!(!state.commit_page(stale, Ok((vec!["old", "old"], 2))));

        assert_eq!(state.records, vec!["new"]);
        assert_eq!(state.total, 1);
        assert_eq!(state.phase, ListPhase::Loaded);
    }

    #[test]
    fn failed_fetch_enters_errored_phase() {
        let mut state: ListState<&str> = ListState::new(10);
        let generation = state.begin_fetch();
        state.commit_page(generation, Err("network error".to_string()));
        assert_eq!(state.phase, ListPhase::Errored("network error".to_string()));
    }

    #[test]
    fn viewer_never_reaches_user_delete_confirmation() {
        let mut state: ListState<&str> = ListState::new(10);
        let opened = state.request_delete("bob", user_delete_precheck(AdminRole::Viewer));
        assert!(!opened);
        assert!(state.pending_delete.is_none());
        assert_eq!(
            state.error.as_deref(),
            Some("Viewers are not allowed to delete users")
        );
    }

    #[test]
    fn admin_may_delete_users() {
        assert!(user_delete_precheck(AdminRole::Admin).is_ok());
        assert!(user_delete_precheck(AdminRole::SuperAdmin).is_ok());
        assert!(user_delete_precheck(AdminRole::Unknown).is_err());
    }

    #[test]
    fn self_deletion_is_rejected_for_every_role() {
        let own = claims(AdminRole::SuperAdmin, 7);
        assert!(admin_delete_precheck(&own, 7).is_err());
        // Not super_admin: rejected even for someone else's record.
        let admin = claims(AdminRole::Admin, 1);
        assert!(admin_delete_precheck(&admin, 2).is_err());
        // super_admin deleting another admin is allowed locally.
        let root = claims(AdminRole::SuperAdmin, 1);
        assert!(admin_delete_precheck(&root, 2).is_ok());
    }

    #[test]
    fn delete_success_message_carries_username() {
        let mut state: ListState<&str> = ListState::new(10);
        state.request_delete("carol", Ok(()));
        state.finish_delete(DeleteOutcome::Deleted, |u| u.to_string());
        assert!(state.pending_delete.is_none());
        assert_eq!(
            state.success.as_deref(),
            Some("carol has been successfully deleted")
        );
    }

    #[test]
    fn delete_failure_surfaces_message_and_clears_target() {
        let mut state: ListState<&str> = ListState::new(10);
        state.request_delete("carol", Ok(()));
        state.finish_delete(
            DeleteOutcome::Failed("boom".to_string()),
            |u| u.to_string(),
        );
        assert!(state.pending_delete.is_none());
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn constraint_violation_maps_to_friendly_text() {
        let err = RequestError {
            status: Some(500),
            message: "update on analyses violates not-null constraint \"owner\"".to_string(),
        };
        let message = map_user_delete_error(&err);
        assert!(message.contains("CV analyses"));
        assert!(!message.contains("not-null"));
    }

    #[test]
    fn unknown_user_delete_error_passes_through() {
        let err = RequestError {
            status: Some(500),
            message: "disk on fire".to_string(),
        };
        assert_eq!(map_user_delete_error(&err), "disk on fire");
    }

    #[test]
    fn admin_delete_statuses_map_to_friendly_text() {
        let forbidden = RequestError {
            status: Some(403),
            message: "Forbidden".to_string(),
        };
        assert_eq!(
            map_admin_delete_error(&forbidden),
            "Only super admins can delete other admins"
        );
        let missing = RequestError {
            status: Some(404),
            message: "Not Found".to_string(),
        };
        assert_eq!(map_admin_delete_error(&missing), "Admin not found");
    }

    #[test]
    fn last_page_bounds() {
        let mut state: ListState<&str> = ListState::new(10);
        assert_eq!(state.last_page(), 0);
        state.total = 25;
        assert_eq!(state.last_page(), 2);
        state.total = 30;
        assert_eq!(state.last_page(), 2);
        state.total = 31;
        assert_eq!(state.last_page(), 3);
    }
}
