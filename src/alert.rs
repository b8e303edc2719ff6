//! Error alerts shown to the user after a failed htmx request.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element of the base page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

const ALERT_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800 shadow";

/// An error message with optional details on how to fix it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    /// Shown below the message, omitted when empty.
    pub details: String,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        html! {
            div role="alert" class=(ALERT_STYLE)
            {
                div class="flex justify-between items-start gap-4"
                {
                    div
                    {
                        p class="font-semibold" { (self.message) }

                        @if !self.details.is_empty() {
                            span class="block mt-1" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert with a specific status code.
    ///
    /// The status must be 4xx or 5xx for htmx to swap the alert into the
    /// element named by `hx-target-error`.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
