// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the crate's unit tests.

extern crate alloc;

use alloc::vec::Vec;

use crate::datum::{DatumId, NormalizedDatum, PieDatum, normalize};
use crate::format::ValueFormat;

pub(crate) struct Record(pub(crate) &'static str, pub(crate) f64);

impl PieDatum for Record {
    fn id(&self) -> DatumId {
        self.0.into()
    }

    fn value(&self) -> f64 {
        self.1
    }
}

pub(crate) fn data(records: &[Record]) -> Vec<NormalizedDatum> {
    normalize(records, ValueFormat::Raw, &[])
}
