// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Memory bus tests
//!
//! Tests cover:
//! - Address translation and segment mirroring (KUSEG, KSEG0, KSEG1)
//! - Memory region identification and lookup order
//! - Load/store operations with various data sizes (8-bit, 16-bit, 32-bit)
//! - Boundary conditions and unmapped faults
//! - Endianness verification

use super::*;

mod helpers;
