// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use aircare_domain::{GrilleSize, RawValue, ScaffoldTier, SiphonPump};

/// A measured run on the quote form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthField {
    /// Refrigerant line.
    Refrigerant,
    /// Power cable.
    Power,
    /// Drain pipe.
    Drain,
    /// Trunking cover.
    Trunking,
}

/// A special task priced by quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityField {
    /// Wall chasing, meters.
    WallChase,
    /// Ceiling routing, meters.
    CeilingRun,
    /// Thick insulation, meters.
    ThickInsulation,
    /// Miscellaneous fittings, pieces.
    MiscParts,
    /// Cable tray, meters.
    WireTray,
    /// PVC conduit, meters.
    Pvc,
}

/// A quote form command represents operator intent as data only.
///
/// Commands are the only way to change a [`QuoteForm`](crate::QuoteForm).
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteCommand {
    /// Set the number of identical units.
    SetMachineCount(RawValue),
    /// Set the unit type label.
    SetAcType(String),
    /// Set the cooling capacity.
    SetBtu(RawValue),
    /// Set a measured run length.
    SetLength {
        /// The run.
        field: LengthField,
        /// The raw length in meters.
        value: RawValue,
    },
    /// Set a special task quantity.
    SetQuantity {
        /// The task.
        field: QuantityField,
        /// The raw quantity.
        value: RawValue,
    },
    /// Select a scaffold tier.
    SetScaffold(ScaffoldTier),
    /// Select a grille size.
    SetGrille(GrilleSize),
    /// Select whether a siphon pump is fitted.
    SetSiphonPump(SiphonPump),
    /// Return the form to its initial state.
    Reset,
}
