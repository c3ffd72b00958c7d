// This file is part of admittance_controller.
//
// Developed for the mobile manipulation platform.
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Admittance Controller
//!
//! This library holds the startup and configuration-validation layer of the
//! admittance control node for the coupled platform-arm system.
pub mod application;
pub mod config;
pub mod constants;
pub mod controller;
pub mod mock;
pub mod parameter_source;
