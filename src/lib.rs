// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod config;
pub mod connectivity;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod remote;
pub mod session;
pub mod store;
pub mod sync;
pub mod utils;
pub mod commands;
