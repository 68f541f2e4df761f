//! Delete-confirmation dialog payloads.
//!
//! The admin frontend renders a modal from this payload. In
//! [`DialogMode::SetNewAndDelete`] the user must pick one of `candidates`;
//! the frontend then posts to `delete_url` with `?new_id=<choice>` and the
//! embedded anti-forgery token.

use std::collections::BTreeMap;

use serde::Serialize;
use shopkit_core::types::DbId;

/// How the dialog behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogMode {
    /// Plain "really delete?" confirmation.
    Confirm,
    /// A replacement must be chosen before the delete is allowed.
    SetNewAndDelete,
}

/// Payload of the delete-confirmation dialog.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmDeleteDialog {
    pub mode: DialogMode,
    /// Already-translated question shown to the user.
    pub message: String,
    /// Route name the frontend resolves for the delete action.
    pub delete_route: &'static str,
    /// Concrete URL of the delete action.
    pub delete_url: String,
    /// Id of the record being deleted.
    pub id: DbId,
    /// Replacement candidates (id to name), ordered by id. Empty in
    /// [`DialogMode::Confirm`].
    pub candidates: BTreeMap<DbId, String>,
    /// Anti-forgery token the frontend must send with the delete.
    pub csrf_token: String,
}

/// Builds delete-confirmation dialog payloads.
pub struct ConfirmDeleteDialogFactory;

impl ConfirmDeleteDialogFactory {
    /// Dialog that forces choosing a replacement before deleting.
    pub fn with_replacement_choice(
        message: impl Into<String>,
        delete_route: &'static str,
        delete_url: impl Into<String>,
        id: DbId,
        candidates: BTreeMap<DbId, String>,
        csrf_token: impl Into<String>,
    ) -> ConfirmDeleteDialog {
        ConfirmDeleteDialog {
            mode: DialogMode::SetNewAndDelete,
            message: message.into(),
            delete_route,
            delete_url: delete_url.into(),
            id,
            candidates,
            csrf_token: csrf_token.into(),
        }
    }

    /// Plain confirmation dialog with no replacement choice.
    pub fn simple_confirm(
        message: impl Into<String>,
        delete_route: &'static str,
        delete_url: impl Into<String>,
        id: DbId,
        csrf_token: impl Into<String>,
    ) -> ConfirmDeleteDialog {
        ConfirmDeleteDialog {
            mode: DialogMode::Confirm,
            message: message.into(),
            delete_route,
            delete_url: delete_url.into(),
            id,
            candidates: BTreeMap::new(),
            csrf_token: csrf_token.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
