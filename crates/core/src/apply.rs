// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{LengthField, QuantityField, QuoteCommand};
use crate::state::{QuoteForm, QuoteTransition};
use aircare_domain::{QuoteBreakdown, QuoteInput};

/// Applies a command to a quote form, producing a new form and its quote.
///
/// The input form is not modified. The quote is always recomputed from the
/// new form, so a screen can re-render from the returned value alone.
///
/// # Arguments
///
/// * `form` - The current form (immutable)
/// * `command` - The command to apply
#[must_use]
pub fn apply(form: &QuoteForm, command: QuoteCommand) -> QuoteTransition {
    let mut input: QuoteInput = form.input.clone();

    match command {
        QuoteCommand::SetMachineCount(value) => input.machine_count = value,
        QuoteCommand::SetAcType(label) => input.ac_type = label,
        QuoteCommand::SetBtu(value) => input.btu = value,
        QuoteCommand::SetLength { field, value } => match field {
            LengthField::Refrigerant => input.len_ref = value,
            LengthField::Power => input.len_power = value,
            LengthField::Drain => input.len_drain = value,
            LengthField::Trunking => input.len_trunk = value,
        },
        QuoteCommand::SetQuantity { field, value } => match field {
            QuantityField::WallChase => input.wall_chase_m = value,
            QuantityField::CeilingRun => input.ceiling_run_m = value,
            QuantityField::ThickInsulation => input.thick_insulation_m = value,
            QuantityField::MiscParts => input.misc_parts = value,
            QuantityField::WireTray => input.wire_tray_m = value,
            QuantityField::Pvc => input.pvc_m = value,
        },
        QuoteCommand::SetScaffold(tier) => input.scaffold = tier,
        QuoteCommand::SetGrille(size) => input.grille = size,
        QuoteCommand::SetSiphonPump(pump) => input.siphon_pump = pump,
        QuoteCommand::Reset => input = QuoteForm::new().input,
    }

    let form: QuoteForm = QuoteForm::from_input(input);
    let breakdown: QuoteBreakdown = form.quote();

    QuoteTransition { form, breakdown }
}
