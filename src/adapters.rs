/*
 * Copyright (c) 2020-2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Problem adapters.
//!
//! Problem adapters are small types wrapping another problem. An adapter
//! provides a modified view on the underlying problem. For instance, the
//! [`Swapped`] adapter exchanges the initial state and the goal state of a
//! wrapped problem.
//!
//! Adapters do not copy the underlying problem, they just change the meaning
//! of the methods.

mod swapped;
pub use self::swapped::{swap, Swapped};
