// SPDX-License-Identifier: GPL-3.0-only

//! Terminal dashboard for browsing disks and their partitions

pub mod app;
pub mod config;
pub mod layout;
pub mod logging;
pub mod navigation;
pub mod provider;
pub mod terminal;
pub mod ui;
