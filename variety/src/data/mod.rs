//! Static tables the domain generators draw from.

pub(crate) mod latin;
pub(crate) mod names;
pub(crate) mod places;
