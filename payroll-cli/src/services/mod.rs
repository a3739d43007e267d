// Business logic services layer
//
// This module contains reusable services that are shared by the
// consolidation pipeline and the inspection commands.

pub mod aliases;
