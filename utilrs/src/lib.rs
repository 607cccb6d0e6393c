// SPDX-FileCopyrightText: 2024 griff
//
// SPDX-License-Identifier: EUPL-1.2 or MIT
//! Small helpers that don't belong anywhere else: ranges over ordered and
//! calendar values, scoped resource acquisition, fallback chains of optional
//! values and validation error collection.

pub mod optional;
pub mod scope;
pub mod time;
pub mod validation;
