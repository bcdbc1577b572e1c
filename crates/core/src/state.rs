// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aircare_domain::{QuoteBreakdown, QuoteInput, RawValue, calculate_quote};

/// State of one quote screen.
///
/// The form keeps raw operator input. It is owned by the screen that shows it
/// and is replaced, never mutated, by each command.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteForm {
    /// Raw form contents.
    pub input: QuoteInput,
}

impl QuoteForm {
    /// Creates a form with one unit and every run at its included length.
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: QuoteInput {
                machine_count: RawValue::from(1),
                len_ref: RawValue::from(4),
                len_power: RawValue::from(8),
                len_drain: RawValue::from(8),
                len_trunk: RawValue::from(4),
                ..QuoteInput::default()
            },
        }
    }

    /// Creates a form from existing input, e.g. a quote restored from a job.
    #[must_use]
    pub const fn from_input(input: QuoteInput) -> Self {
        Self { input }
    }

    /// Computes the quote for the current contents.
    #[must_use]
    pub fn quote(&self) -> QuoteBreakdown {
        calculate_quote(&self.input)
    }
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of applying a command to a quote form.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteTransition {
    /// The form after the command.
    pub form: QuoteForm,
    /// The quote for the new form.
    pub breakdown: QuoteBreakdown,
}
