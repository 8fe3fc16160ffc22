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

//! CPU test modules
//!
//! Tests are organized into the following categories:
//! - `basic`: CPU initialization, reset, register access, PC handling
//! - `load_delay`: Load delay slot behavior, including LWL/LWR merging
//! - `branch_delay`: Branch delay slot behavior and branch targets
//! - `cop0`: COP0 moves and cache isolation
//! - `decode`: Instruction classification
//! - `instructions`: ALU, multiply/divide, load and store semantics
//! - `faults`: Fault kinds and the state left behind by a faulting cycle

mod helpers;

mod branch_delay;
