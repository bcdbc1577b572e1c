// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{LengthField, QuantityField, QuoteCommand, QuoteForm, QuoteTransition, apply};
use aircare_domain::{RawValue, SiphonPump, SpecialTask};

#[test]
fn test_new_form_quotes_standard_install() {
    let form: QuoteForm = QuoteForm::new();
    let quote = form.quote();

    assert_eq!(quote.meta.machine_count, 1);
    assert_eq!(quote.extras.total, 0);
    assert_eq!(quote.totals.grand, 3_750);
}

#[test]
fn test_apply_does_not_modify_input_form() {
    let form: QuoteForm = QuoteForm::new();
    let before: QuoteForm = form.clone();

    let transition: QuoteTransition = apply(&form, QuoteCommand::SetBtu(RawValue::from(30_000)));

    assert_eq!(form, before);
    assert_ne!(transition.form, form);
    assert_eq!(transition.breakdown.base_labor.standard, 7_500);
}

#[test]
fn test_commands_compose() {
    let form: QuoteForm = QuoteForm::new();
    let commands = vec![
        QuoteCommand::SetMachineCount(RawValue::from("2")),
        QuoteCommand::SetBtu(RawValue::from("9,000")),
        QuoteCommand::SetLength {
            field: LengthField::Refrigerant,
            value: RawValue::from("10"),
        },
    ];

    let last: QuoteTransition = commands.into_iter().fold(
        QuoteTransition {
            breakdown: form.quote(),
            form,
        },
        |state, command| apply(&state.form, command),
    );

    assert_eq!(last.breakdown.totals.per_machine, 6_750);
    assert_eq!(last.breakdown.totals.grand, 13_500);
}

#[test]
fn test_insulation_without_ceiling_run_is_kept_but_not_priced() {
    let form: QuoteForm = QuoteForm::new();

    let t1 = apply(
        &form,
        QuoteCommand::SetQuantity {
            field: QuantityField::ThickInsulation,
            value: RawValue::from(5),
        },
    );
    assert_eq!(t1.form.input.thick_insulation_m, RawValue::from(5));
    assert_eq!(t1.breakdown.specials.total, 0);

    let t2 = apply(
        &t1.form,
        QuoteCommand::SetQuantity {
            field: QuantityField::CeilingRun,
            value: RawValue::from(2),
        },
    );
    let tasks: Vec<SpecialTask> = t2.breakdown.specials.lines.iter().map(|l| l.task).collect();
    assert_eq!(tasks, vec![SpecialTask::CeilingRun, SpecialTask::ThickInsulation]);
}

#[test]
fn test_reset_restores_initial_form() {
    let form: QuoteForm = QuoteForm::new();
    let changed = apply(&form, QuoteCommand::SetSiphonPump(SiphonPump::Install));
    assert_eq!(changed.breakdown.specials.lines.len(), 1);

    let reset = apply(&changed.form, QuoteCommand::Reset);
    assert_eq!(reset.form, QuoteForm::new());
    assert!(reset.breakdown.specials.lines.is_empty());
}
