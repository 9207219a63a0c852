//! Templates for the balance modal on the balance sheet page.

use maud::{Markup, html};

use crate::{
    amount::accounting_amount,
    api::BalanceRecord,
    balance::modal::ModalControl,
    html::{BUTTON_DANGER_STYLE, BUTTON_SUCCESS_STYLE, TABLE_CELL_STYLE, TABLE_ROW_STYLE},
};

/// The ID of the `<dialog>` that shows a balance.
pub const BALANCE_MODAL_ID: &str = "balanceModal";
/// The ID of the modal title.
pub const BALANCE_MODAL_LABEL_ID: &str = "balanceModalLabel";
/// The ID of the element the modal body is swapped into.
pub const BALANCE_MODAL_BODY_ID: &str = "balanceModalBody";
/// The ID of the refresh button inside the modal body.
pub const REFRESH_BUTTON_ID: &str = "refreshBalanceButton";

const BUTTON_DEFAULT_STYLE: &str = "px-4 py-2 bg-blue-600 hover:enabled:bg-blue-700 \
    disabled:opacity-50 text-white rounded btn-default";

/// How the refresh button looks after the last refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshButtonState {
    Ready,
    Refreshed,
    Failed,
}

/// The empty modal, rendered once per balance sheet page.
pub fn balance_modal() -> Markup {
    html!(
        dialog
            id=(BALANCE_MODAL_ID)
            aria-labelledby=(BALANCE_MODAL_LABEL_ID)
            class="w-full max-w-md p-6 rounded-lg shadow bg-white dark:bg-gray-800
                text-gray-900 dark:text-white backdrop:bg-gray-900/50"
        {
            div class="flex items-center justify-between mb-4"
            {
                h3 id=(BALANCE_MODAL_LABEL_ID) class="text-lg font-semibold" {}

                form method="dialog"
                {
                    button type="submit" aria-label="Close" class="font-bold" { "×" }
                }
            }

            div id=(BALANCE_MODAL_BODY_ID) {}
        }
    )
}

/// A balance sheet table row that opens the balance modal when clicked.
///
/// The title is written into the modal label as soon as the request starts.
pub fn balance_row(control: &ModalControl, cells: Markup) -> Markup {
    html!(
        tr
            class={ (TABLE_ROW_STYLE) " cursor-pointer hover:bg-gray-50 dark:hover:bg-gray-600" }
            hx-get=(control.route)
            hx-target={ "#" (BALANCE_MODAL_BODY_ID) }
            hx-swap="innerHTML"
            data-target=(control.target)
            data-title=(control.title)
            data-title-target=(BALANCE_MODAL_LABEL_ID)
        {
            (cells)
        }
    )
}

/// The body of the balance modal.
pub fn balance_modal_body(
    record: &BalanceRecord,
    control: &ModalControl,
    refresh_state: RefreshButtonState,
) -> Markup {
    html!(
        dl class="grid grid-cols-2 gap-2 mb-4"
        {
            dt class="font-medium" { "Account" }
            dd { (record.account) }

            @if let Some(prior) = record.prior {
                dt class="font-medium" { "Beginning" }
                dd { (accounting_amount(prior, &record.currency)) }
            }

            dt class="font-medium" { "Balance" }
            dd { (accounting_amount(record.amount, &record.currency)) }
        }

        (refresh_button(control, refresh_state))
    )
}

/// The button that asks the ledger API to recompute the balance.
///
/// Failed refreshes swap only this button, so it carries its own error target.
pub fn refresh_button(control: &ModalControl, state: RefreshButtonState) -> Markup {
    let (style, label) = match state {
        RefreshButtonState::Ready => (BUTTON_DEFAULT_STYLE, "Refresh"),
        RefreshButtonState::Refreshed => (BUTTON_SUCCESS_STYLE, "Refreshed"),
        RefreshButtonState::Failed => (BUTTON_DANGER_STYLE, "Refresh failed"),
    };

    html!(
        button
            id=(REFRESH_BUTTON_ID)
            type="button"
            class=(style)
            hx-post=(control.refresh_route)
            hx-target={ "#" (BALANCE_MODAL_BODY_ID) }
            hx-target-error="this"
            hx-swap="innerHTML"
            hx-disabled-elt="this"
        {
            (label)
        }
    )
}

/// A cell for a balance sheet table.
pub fn table_cell(content: Markup) -> Markup {
    html!( td class=(TABLE_CELL_STYLE) { (content) } )
}
